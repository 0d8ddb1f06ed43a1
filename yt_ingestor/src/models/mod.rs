//! Typed wire models for the YouTube Data API v3 item objects the
//! pipeline persists. Every field that can be absent in a response is an
//! explicit `Option`, so downstream flattening never has to guess at
//! defaults. Only the `snippet` / `statistics` / `contentDetails` parts
//! the pipeline requests are modeled; anything else the API returns is
//! dropped on decode.

pub mod channel;
pub mod playlist;
pub mod video;

pub use channel::RawChannel;
pub use playlist::{PlaylistItemsPage, RawPlaylistItem};
pub use video::RawVideo;
