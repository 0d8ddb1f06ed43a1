use serde::{Deserialize, Serialize};

/// One item from a `channels.list` response, requested with
/// `part=snippet,statistics,contentDetails`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawChannel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<ChannelSnippet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<ChannelStatistics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_details: Option<ChannelContentDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSnippet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// RFC 3339 timestamp of channel creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Channel statistics. The API serializes every count as a string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStatistics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_count: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscriber_count: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden_subscriber_count: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_count: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelContentDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_playlists: Option<RelatedPlaylists>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedPlaylists {
    /// Id of the channel's uploads playlist, when the channel has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploads: Option<String>,
}

impl RawChannel {
    /// The uploads playlist id, if the response carried one.
    pub fn uploads_playlist_id(&self) -> Option<&str> {
        self.content_details
            .as_ref()?
            .related_playlists
            .as_ref()?
            .uploads
            .as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_channels_list_item() {
        let json = r#"{
            "kind": "youtube#channel",
            "id": "UC_x5XG1OV2P6uZZ5FSM9Ttw",
            "snippet": {
                "title": "Google for Developers",
                "description": "dev news",
                "publishedAt": "2007-08-23T00:34:43Z",
                "country": "US"
            },
            "contentDetails": {
                "relatedPlaylists": { "likes": "", "uploads": "UU_x5XG1OV2P6uZZ5FSM9Ttw" }
            },
            "statistics": {
                "viewCount": "123456789",
                "subscriberCount": "2380000",
                "hiddenSubscriberCount": false,
                "videoCount": "5734"
            }
        }"#;

        let ch: RawChannel = serde_json::from_str(json).unwrap();
        assert_eq!(ch.id.as_deref(), Some("UC_x5XG1OV2P6uZZ5FSM9Ttw"));
        assert_eq!(ch.uploads_playlist_id(), Some("UU_x5XG1OV2P6uZZ5FSM9Ttw"));
        let stats = ch.statistics.unwrap();
        assert_eq!(stats.subscriber_count.as_deref(), Some("2380000"));
        assert_eq!(stats.hidden_subscriber_count, Some(false));
    }

    #[test]
    fn missing_parts_decode_to_none() {
        let ch: RawChannel = serde_json::from_str(r#"{"id": "UCabc"}"#).unwrap();
        assert!(ch.snippet.is_none());
        assert!(ch.statistics.is_none());
        assert_eq!(ch.uploads_playlist_id(), None);
    }
}
