use std::path::PathBuf;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use shared_utils::layout::DataLayout;
use yt_ingestor::extract::{fetch_channels, fetch_videos_for_channels};
use yt_ingestor::providers::youtube_rest::YouTubeProvider;
use yt_warehouse::{analysis, export, transform, warehouse};

/// Batch ETL for YouTube channel analytics: raw API extraction, staging
/// transforms, and a dimensional warehouse rebuild.
///
/// Stages are sequential and single-process; concurrent invocations
/// against the same data directory are last-writer-wins and unsupported.
#[derive(Parser)]
#[command(version, about = "YouTube channel analytics pipeline")]
struct Cli {
    /// Base directory for raw, staging and warehouse data
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Fetch raw channel metadata into a run-date partition
    FetchChannels {
        /// Comma-separated channel ids
        #[arg(long, value_delimiter = ',')]
        ids: Vec<String>,
        /// Run date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        run_date: Option<NaiveDate>,
    },
    /// Fetch raw video metadata for every channel's uploads
    FetchVideos {
        #[arg(long, value_delimiter = ',')]
        ids: Vec<String>,
        #[arg(long)]
        run_date: Option<NaiveDate>,
        /// Stop after this many videos per channel
        #[arg(long)]
        max_videos_per_channel: Option<usize>,
    },
    /// Run both fetch stages for one run date
    Extract {
        #[arg(long, value_delimiter = ',')]
        ids: Vec<String>,
        #[arg(long)]
        run_date: Option<NaiveDate>,
        #[arg(long)]
        max_videos_per_channel: Option<usize>,
    },
    /// Flatten the latest raw channel partition into staging
    TransformChannels,
    /// Flatten the latest raw video partition into staging
    TransformVideos,
    /// Rebuild the dimension and fact tables from staging
    BuildWarehouse,
    /// Mirror each warehouse table to CSV
    ExportCsv,
    /// Execute SQL files against the warehouse tables
    Analyze {
        /// Paths of .sql files to run, in order
        #[arg(value_name = "FILE", required = true)]
        queries: Vec<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let layout = DataLayout::new(&cli.data_dir);

    match cli.cmd {
        Cmd::FetchChannels { ids, run_date } => {
            let provider = YouTubeProvider::new()?;
            let run_date = run_date.unwrap_or_else(today);
            fetch_channels(&provider, &layout, &ids, run_date).await?;
        }
        Cmd::FetchVideos {
            ids,
            run_date,
            max_videos_per_channel,
        } => {
            let provider = YouTubeProvider::new()?;
            let run_date = run_date.unwrap_or_else(today);
            fetch_videos_for_channels(&provider, &layout, &ids, run_date, max_videos_per_channel)
                .await?;
        }
        Cmd::Extract {
            ids,
            run_date,
            max_videos_per_channel,
        } => {
            let provider = YouTubeProvider::new()?;
            let run_date = run_date.unwrap_or_else(today);
            info!(%run_date, "starting extract");

            let channels_path = fetch_channels(&provider, &layout, &ids, run_date).await?;
            let videos_path = fetch_videos_for_channels(
                &provider,
                &layout,
                &ids,
                run_date,
                max_videos_per_channel,
            )
            .await?;

            println!("Channels raw file: {}", channels_path.display());
            println!("Videos raw file:   {}", videos_path.display());
        }
        Cmd::TransformChannels => {
            transform::transform_channels(&layout)?;
        }
        Cmd::TransformVideos => {
            transform::transform_videos(&layout)?;
        }
        Cmd::BuildWarehouse => {
            warehouse::build_warehouse(&layout)?;
        }
        Cmd::ExportCsv => {
            export::export_warehouse_to_csv(&layout)?;
        }
        Cmd::Analyze { queries } => {
            let mut ctx = analysis::open_context(&layout)?;
            for query in &queries {
                analysis::run_sql_file(&mut ctx, query)?;
            }
        }
    }

    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
