use serde::{Deserialize, Serialize};

/// One item from a `videos.list` response, requested with
/// `part=snippet,statistics,contentDetails`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVideo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<VideoSnippet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<VideoStatistics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_details: Option<VideoContentDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// RFC 3339 publish timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

/// Video statistics. Counts arrive as strings, like channel statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatistics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_count: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub like_count: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite_count: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoContentDetails {
    /// ISO-8601 duration, e.g. `PT1H2M3S`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    /// The API encodes this as the string "true"/"false".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub licensed_content: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_videos_list_item() {
        let json = r#"{
            "id": "dQw4w9WgXcQ",
            "snippet": {
                "publishedAt": "2009-10-25T06:57:33Z",
                "channelId": "UCuAXFkgsw1L7xaCfnd5JJOw",
                "title": "a video",
                "description": "",
                "categoryId": "10"
            },
            "contentDetails": {
                "duration": "PT3M33S",
                "definition": "hd",
                "caption": "false",
                "licensedContent": true
            },
            "statistics": {
                "viewCount": "1500000000",
                "likeCount": "17000000",
                "favoriteCount": "0",
                "commentCount": "2300000"
            }
        }"#;

        let v: RawVideo = serde_json::from_str(json).unwrap();
        let snippet = v.snippet.unwrap();
        assert_eq!(snippet.channel_id.as_deref(), Some("UCuAXFkgsw1L7xaCfnd5JJOw"));
        assert_eq!(snippet.category_id.as_deref(), Some("10"));
        let content = v.content_details.unwrap();
        assert_eq!(content.duration.as_deref(), Some("PT3M33S"));
        assert_eq!(content.licensed_content, Some(true));
        assert_eq!(v.statistics.unwrap().favorite_count.as_deref(), Some("0"));
    }
}
