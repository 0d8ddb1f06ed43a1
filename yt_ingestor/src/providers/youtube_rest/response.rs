use serde::Deserialize;

/// Envelope shared by the `channels.list`, `videos.list` and
/// `playlistItems.list` endpoints.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    pub next_page_token: Option<String>,
}
