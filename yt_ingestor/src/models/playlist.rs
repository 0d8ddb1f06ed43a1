use serde::{Deserialize, Serialize};

/// One item from a `playlistItems.list` response, requested with
/// `part=contentDetails`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlaylistItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_details: Option<PlaylistItemContentDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemContentDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
}

impl RawPlaylistItem {
    pub fn video_id(&self) -> Option<&str> {
        self.content_details.as_ref()?.video_id.as_deref()
    }
}

/// One page of playlist items plus the token for the next page, if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaylistItemsPage {
    pub items: Vec<RawPlaylistItem>,
    pub next_page_token: Option<String>,
}
