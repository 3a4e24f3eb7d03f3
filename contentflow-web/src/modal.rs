use contentflow_types::{ModalKey, ThumbnailRef};

use crate::caption::{render_caption, DEFAULT_TAG_URL_BASE};
use crate::dom::{Gallery, ModalSurface, ThumbnailId};
use crate::logging::LogConfig;

/// Images of the post whose thumbnail opened the modal, and the one shown
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalSession {
    pub images: Vec<ThumbnailRef>,
    pub current_index: usize,
}

impl ModalSession {
    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Controller for the page's single image modal.
///
/// Owns the surface it renders into; [`ModalController::dispose`] hands it back.
pub struct ModalController<S: ModalSurface> {
    surface: S,
    tag_url_base: String,
    session: ModalSession,
    log_config: LogConfig,
}

impl<S: ModalSurface> ModalController<S> {
    pub fn new(surface: S, tag_url_base: Option<String>, log_config: LogConfig) -> Self {
        Self {
            surface,
            tag_url_base: tag_url_base.unwrap_or_else(|| DEFAULT_TAG_URL_BASE.to_string()),
            session: ModalSession::default(),
            log_config,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn session(&self) -> &ModalSession {
        &self.session
    }

    pub fn current_index(&self) -> usize {
        self.session.current_index
    }

    pub fn tag_url_base(&self) -> &str {
        &self.tag_url_base
    }

    /// Tear the controller down, returning the surface
    pub fn dispose(self) -> S {
        self.surface
    }

    /// Thumbnail click: open the modal on the gallery of the enclosing post.
    /// Does nothing when the thumbnail sits outside any post container.
    pub fn open_thumbnail<G: Gallery>(&mut self, gallery: &G, thumb: ThumbnailId) {
        match gallery.post_gallery(thumb) {
            Some((images, index)) => self.open(images, index),
            None => {
                log_modal_state!(self.log_config, "Thumbnail {:?} has no post container", thumb);
            }
        }
    }

    /// Start a new session on `images`, showing `index`
    pub fn open(&mut self, images: Vec<ThumbnailRef>, index: usize) {
        if index >= images.len() {
            log_modal_state!(
                self.log_config,
                "Ignoring open at index {} of {} images",
                index,
                images.len()
            );
            return;
        }

        self.session = ModalSession {
            images,
            current_index: index,
        };
        log_modal_state!(
            self.log_config,
            "Opening modal: index={}, images={}",
            index,
            self.session.len()
        );
        self.surface.show();
        self.render(index);
    }

    /// Render the image at `index`. An image without a source URL leaves the
    /// previous frame in place.
    pub fn render(&mut self, index: usize) {
        let Some(image) = self.session.images.get(index) else {
            return;
        };
        let Some(src) = image.source() else {
            log_rendering!(self.log_config, "Image {} has no source, keeping frame", index);
            return;
        };

        self.surface.set_image(src, image.alt_text());
        let caption = render_caption(image.caption_or_default(), &self.tag_url_base);
        self.surface.set_caption_html(&caption);
        let counter = format!("{} / {}", index + 1, self.session.len());
        self.surface.set_counter(&counter);
        log_rendering!(self.log_config, "Rendered frame {} ({})", counter, src);
    }

    pub fn next(&mut self) {
        let len = self.session.len();
        if len == 0 {
            return;
        }
        self.session.current_index = (self.session.current_index + 1) % len;
        self.render(self.session.current_index);
    }

    pub fn prev(&mut self) {
        let len = self.session.len();
        if len == 0 {
            return;
        }
        self.session.current_index = (self.session.current_index + len - 1) % len;
        self.render(self.session.current_index);
    }

    /// Close the overlay. The session stays until the next open replaces it.
    pub fn close(&mut self) {
        log_modal_state!(self.log_config, "Closing modal");
        self.surface.close();
    }

    /// Document-level keydown handler; ignored while the modal is closed
    pub fn handle_key(&mut self, key: ModalKey) {
        if !self.surface.is_open() {
            return;
        }
        log_key_event!(self.log_config, "key={}", key.as_str());

        match key {
            ModalKey::ArrowRight => self.next(),
            ModalKey::ArrowLeft => self.prev(),
            ModalKey::Escape => self.close(),
            ModalKey::Other => {}
        }
    }
}
