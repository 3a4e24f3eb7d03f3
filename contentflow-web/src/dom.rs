//! The page seam.
//!
//! Controllers only see the traits in this module. [`Document`] and
//! [`ModalRegion`] are an in-memory rendition of the server-rendered page,
//! used by the command-line driver and the tests.

use contentflow_types::{LikeLabel, PostId, ThumbnailRef};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// The singleton image modal overlay and its four named regions
pub trait ModalSurface {
    /// Put the overlay into its open visual state
    fn show(&mut self);
    /// Put the overlay into its closed visual state
    fn close(&mut self);
    fn is_open(&self) -> bool;
    fn set_image(&mut self, src: &str, alt: &str);
    fn set_caption_html(&mut self, html: &str);
    fn set_counter(&mut self, text: &str);
}

/// Resolves thumbnail-trigger elements to the gallery of their post
pub trait Gallery {
    /// All thumbnails of the post enclosing `thumb`, in document order,
    /// and the position of `thumb` among them. `None` when the thumbnail
    /// has no enclosing post container.
    fn post_gallery(&self, thumb: ThumbnailId) -> Option<(Vec<ThumbnailRef>, usize)>;
}

/// The like buttons and like counters of a page
pub trait LikeSurface {
    /// Post id carried by a like button's data attribute
    fn button_post_id(&self, button: ButtonId) -> Option<PostId>;
    fn set_button_state(&mut self, button: ButtonId, label: LikeLabel, liked: bool);
    /// Set the text of the `likes-count-{post_id}` element, if present
    fn set_likes_count_text(&mut self, post_id: &PostId, text: &str);
    /// Blocking user notification
    fn alert(&mut self, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThumbnailId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ButtonId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostHandle(pub usize);

#[derive(Error, Debug)]
pub enum PageError {
    #[error("Failed to read page snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid page snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A like button element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeButtonElement {
    /// `data-post-id`
    pub post_id: Option<PostId>,
    /// `data-liked`
    pub liked: String,
    pub label: String,
}

#[derive(Debug, Clone)]
struct ThumbnailElement {
    post: Option<PostHandle>,
    data: ThumbnailRef,
}

#[derive(Debug, Clone, Default)]
struct PostElement {
    thumbnails: Vec<ThumbnailId>,
}

/// A `.post-time` element carrying its UTC timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTimeElement {
    pub utc: String,
    pub text: String,
}

/// In-memory page
#[derive(Debug, Clone, Default)]
pub struct Document {
    posts: Vec<PostElement>,
    thumbnails: Vec<ThumbnailElement>,
    like_buttons: Vec<LikeButtonElement>,
    /// Text content keyed by element id
    texts: HashMap<String, String>,
    post_times: Vec<PostTimeElement>,
    alerts: Vec<String>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a post container
    pub fn add_post(&mut self) -> PostHandle {
        self.posts.push(PostElement::default());
        PostHandle(self.posts.len() - 1)
    }

    /// Add a thumbnail-trigger, inside a post container or loose on the page
    pub fn add_thumbnail(&mut self, post: Option<PostHandle>, data: ThumbnailRef) -> ThumbnailId {
        let id = ThumbnailId(self.thumbnails.len());
        if let Some(handle) = post {
            if let Some(element) = self.posts.get_mut(handle.0) {
                element.thumbnails.push(id);
            }
        }
        self.thumbnails.push(ThumbnailElement { post, data });
        id
    }

    /// Add a like button together with its `likes-count-{id}` element
    pub fn add_like_button(&mut self, post_id: PostId, liked: bool, likes_count: u64) -> ButtonId {
        self.texts.insert(
            post_id.likes_count_element_id(),
            crate::likes::format_likes_count(likes_count),
        );
        self.like_buttons.push(LikeButtonElement {
            post_id: Some(post_id),
            liked: liked.to_string(),
            label: LikeLabel::for_liked(liked).as_str().to_string(),
        });
        ButtonId(self.like_buttons.len() - 1)
    }

    /// Add a like button with no post id attribute
    pub fn add_bare_like_button(&mut self) -> ButtonId {
        self.like_buttons.push(LikeButtonElement {
            post_id: None,
            liked: "false".to_string(),
            label: LikeLabel::Like.as_str().to_string(),
        });
        ButtonId(self.like_buttons.len() - 1)
    }

    pub fn add_post_time(&mut self, utc: impl Into<String>) -> usize {
        let utc = utc.into();
        self.post_times.push(PostTimeElement {
            text: utc.clone(),
            utc,
        });
        self.post_times.len() - 1
    }

    pub fn thumbnails(&self) -> impl Iterator<Item = ThumbnailId> + '_ {
        (0..self.thumbnails.len()).map(ThumbnailId)
    }

    pub fn thumbnail(&self, id: ThumbnailId) -> Option<&ThumbnailRef> {
        self.thumbnails.get(id.0).map(|t| &t.data)
    }

    pub fn like_button(&self, id: ButtonId) -> Option<&LikeButtonElement> {
        self.like_buttons.get(id.0)
    }

    pub fn like_buttons(&self) -> impl Iterator<Item = ButtonId> + '_ {
        (0..self.like_buttons.len()).map(ButtonId)
    }

    /// Text content of the element with the given id
    pub fn text_of(&self, element_id: &str) -> Option<&str> {
        self.texts.get(element_id).map(String::as_str)
    }

    pub fn post_times(&self) -> &[PostTimeElement] {
        &self.post_times
    }

    pub fn post_times_mut(&mut self) -> &mut [PostTimeElement] {
        &mut self.post_times
    }

    /// Notifications raised through [`LikeSurface::alert`], oldest first
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Build a page from a JSON snapshot
    pub fn from_snapshot(snapshot: &PageSnapshot) -> Self {
        let mut doc = Self::new();
        for post in &snapshot.posts {
            let handle = doc.add_post();
            for thumb in &post.thumbnails {
                doc.add_thumbnail(Some(handle), thumb.clone());
            }
            if let Some(id) = &post.id {
                doc.add_like_button(id.clone(), post.liked, post.likes_count);
            }
            if let Some(utc) = &post.created_at {
                doc.add_post_time(utc.clone());
            }
        }
        for thumb in &snapshot.loose_thumbnails {
            doc.add_thumbnail(None, thumb.clone());
        }
        doc
    }

    /// Load a page from a JSON snapshot file
    pub fn load(path: &Path) -> Result<Self, PageError> {
        let json = std::fs::read_to_string(path)?;
        let snapshot: PageSnapshot = serde_json::from_str(&json)?;
        Ok(Self::from_snapshot(&snapshot))
    }
}

impl Gallery for Document {
    fn post_gallery(&self, thumb: ThumbnailId) -> Option<(Vec<ThumbnailRef>, usize)> {
        let post = self.thumbnails.get(thumb.0)?.post?;
        let members = &self.posts.get(post.0)?.thumbnails;
        let index = members.iter().position(|id| *id == thumb)?;
        let images = members
            .iter()
            .filter_map(|id| self.thumbnails.get(id.0))
            .map(|t| t.data.clone())
            .collect();
        Some((images, index))
    }
}

impl LikeSurface for Document {
    fn button_post_id(&self, button: ButtonId) -> Option<PostId> {
        self.like_buttons.get(button.0)?.post_id.clone()
    }

    fn set_button_state(&mut self, button: ButtonId, label: LikeLabel, liked: bool) {
        if let Some(element) = self.like_buttons.get_mut(button.0) {
            element.label = label.as_str().to_string();
            element.liked = liked.to_string();
        }
    }

    fn set_likes_count_text(&mut self, post_id: &PostId, text: &str) {
        if let Some(element) = self.texts.get_mut(&post_id.likes_count_element_id()) {
            *element = text.to_string();
        }
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

/// `#image-modal` and the regions it renders into
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalRegion {
    /// Whether the container carries the `is-open` state class
    pub open: bool,
    pub image_src: String,
    pub image_alt: String,
    pub caption_html: String,
    pub counter: String,
    pub show_calls: usize,
    pub close_calls: usize,
}

impl ModalRegion {
    pub fn new() -> Self {
        Self::default()
    }

    /// A region that starts out in the open state
    pub fn opened() -> Self {
        Self {
            open: true,
            ..Self::default()
        }
    }
}

impl ModalSurface for ModalRegion {
    fn show(&mut self) {
        self.open = true;
        self.show_calls += 1;
    }

    fn close(&mut self) {
        self.open = false;
        self.close_calls += 1;
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn set_image(&mut self, src: &str, alt: &str) {
        self.image_src = src.to_string();
        self.image_alt = alt.to_string();
    }

    fn set_caption_html(&mut self, html: &str) {
        self.caption_html = html.to_string();
    }

    fn set_counter(&mut self, text: &str) {
        self.counter = text.to_string();
    }
}

/// Serialized page, as written by `contentflow gallery` users
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageSnapshot {
    #[serde(default)]
    pub posts: Vec<PostSnapshot>,
    /// Thumbnails outside any post container
    #[serde(default)]
    pub loose_thumbnails: Vec<ThumbnailRef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostSnapshot {
    #[serde(default)]
    pub id: Option<PostId>,
    #[serde(default)]
    pub liked: bool,
    #[serde(default)]
    pub likes_count: u64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub thumbnails: Vec<ThumbnailRef>,
}
