use serde::{Deserialize, Serialize};

/// Keyboard keys the image modal reacts to, named after DOM `KeyboardEvent.key`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModalKey {
    ArrowLeft,
    ArrowRight,
    Escape,
    Other,
}

impl ModalKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModalKey::ArrowLeft => "ArrowLeft",
            ModalKey::ArrowRight => "ArrowRight",
            ModalKey::Escape => "Escape",
            ModalKey::Other => "Other",
        }
    }

    /// Parse a DOM key name; unknown keys map to `Other`
    pub fn parse(s: &str) -> Self {
        match s {
            "ArrowLeft" => ModalKey::ArrowLeft,
            "ArrowRight" => ModalKey::ArrowRight,
            "Escape" => ModalKey::Escape,
            _ => ModalKey::Other,
        }
    }
}

/// Label shown on a like button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LikeLabel {
    Like,
    Unlike,
}

impl LikeLabel {
    pub fn for_liked(liked: bool) -> Self {
        if liked {
            LikeLabel::Unlike
        } else {
            LikeLabel::Like
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LikeLabel::Like => "🤍 Like",
            LikeLabel::Unlike => "❤️ Unlike",
        }
    }
}
