use serde::{Deserialize, Serialize};
use std::fmt;

/// Caption shown in the modal when a thumbnail carries none
pub const DEFAULT_CAPTION: &str = "No description";

// Post ids arrive as strings from data attributes and as integers from the
// like-toggle endpoint; both forms are kept as their textual representation.
mod post_id_format {
    use serde::{self, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPostId {
        Int(i64),
        Text(String),
    }

    pub fn serialize<S>(id: &str, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match id.parse::<i64>() {
            Ok(n) => serializer.serialize_i64(n),
            Err(_) => serializer.serialize_str(id),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawPostId::deserialize(deserializer)? {
            RawPostId::Int(n) => Ok(n.to_string()),
            RawPostId::Text(s) => Ok(s),
        }
    }
}

/// Identifier of a post, string or integer-like
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostId(#[serde(with = "post_id_format")] pub String);

impl PostId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Element id of the like counter belonging to this post
    pub fn likes_count_element_id(&self) -> String {
        format!("likes-count-{}", self.0)
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for PostId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for PostId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// One displayable image within a post's gallery, as carried by a
/// thumbnail-trigger element (`data-full` / `data-caption`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbnailRef {
    /// Full-size image URL
    #[serde(default, rename = "full")]
    pub full_url: Option<String>,
    /// Caption exactly as stored on the element, possibly escaped
    #[serde(default, rename = "caption")]
    pub caption_raw: Option<String>,
}

impl ThumbnailRef {
    pub fn new(full_url: impl Into<String>, caption: Option<&str>) -> Self {
        Self {
            full_url: Some(full_url.into()),
            caption_raw: caption.map(str::to_string),
        }
    }

    /// The full-size URL, if one is present and non-empty
    pub fn source(&self) -> Option<&str> {
        self.full_url.as_deref().filter(|url| !url.is_empty())
    }

    /// Alternate text for the image: the raw caption or empty
    pub fn alt_text(&self) -> &str {
        self.caption_raw.as_deref().unwrap_or("")
    }

    /// Caption fed into the caption pipeline
    pub fn caption_or_default(&self) -> &str {
        match self.caption_raw.as_deref() {
            Some(caption) if !caption.is_empty() => caption,
            _ => DEFAULT_CAPTION,
        }
    }
}

/// Like state of a single button, as last reported by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeState {
    pub post_id: PostId,
    pub liked: bool,
    pub likes_count: u64,
}

impl From<&LikeToggleResponse> for LikeState {
    fn from(response: &LikeToggleResponse) -> Self {
        Self {
            post_id: response.post_id.clone(),
            liked: response.liked,
            likes_count: response.likes_count,
        }
    }
}

/// Body of a successful like-toggle response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeToggleResponse {
    pub liked: bool,
    pub likes_count: u64,
    pub post_id: PostId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_id_accepts_integer_and_string() {
        let from_int: PostId = serde_json::from_str("42").unwrap();
        let from_str: PostId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(from_int, from_str);
        assert_eq!(from_int.likes_count_element_id(), "likes-count-42");
    }

    #[test]
    fn test_toggle_response_from_server_json() {
        let json = r#"{"liked": true, "likes_count": 5, "post_id": 1}"#;
        let response: LikeToggleResponse = serde_json::from_str(json).unwrap();
        assert!(response.liked);
        assert_eq!(response.likes_count, 5);
        assert_eq!(response.post_id, PostId::from(1));
    }

    #[test]
    fn test_like_state_from_response_keeps_numeric_id() {
        let response = LikeToggleResponse {
            liked: false,
            likes_count: 3,
            post_id: PostId::new("7"),
        };
        let state = LikeState::from(&response);
        assert_eq!(state.post_id, response.post_id);
        assert!(!state.liked);
        assert_eq!(
            serde_json::to_string(&state).unwrap(),
            r#"{"post_id":7,"liked":false,"likes_count":3}"#
        );

        let state = LikeState {
            post_id: PostId::new("abc"),
            liked: true,
            likes_count: 1,
        };
        assert!(serde_json::to_string(&state).unwrap().starts_with(r#"{"post_id":"abc""#));
    }

    #[test]
    fn test_thumbnail_caption_defaults() {
        let thumb = ThumbnailRef {
            full_url: Some("a.jpg".to_string()),
            caption_raw: None,
        };
        assert_eq!(thumb.alt_text(), "");
        assert_eq!(thumb.caption_or_default(), DEFAULT_CAPTION);

        let thumb = ThumbnailRef::new("a.jpg", Some("Sunset #sea"));
        assert_eq!(thumb.alt_text(), "Sunset #sea");
        assert_eq!(thumb.caption_or_default(), "Sunset #sea");
    }

    #[test]
    fn test_thumbnail_without_url_has_no_source() {
        assert_eq!(ThumbnailRef::default().source(), None);
        let thumb = ThumbnailRef {
            full_url: Some(String::new()),
            caption_raw: None,
        };
        assert_eq!(thumb.source(), None);
    }
}
