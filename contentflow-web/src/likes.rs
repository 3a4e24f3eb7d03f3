use contentflow_types::{LikeLabel, LikeState, PostId};

use crate::api::{ApiError, ApiResult, LikeApi};
use crate::dom::{ButtonId, LikeSurface};
use crate::logging::LogConfig;

/// Notification shown when a toggle fails for any reason
pub const LIKE_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Count text shown next to a like button
pub fn format_likes_count(count: u64) -> String {
    if count == 1 {
        "1 like".to_string()
    } else {
        format!("{} likes", count)
    }
}

/// Click handler for like buttons.
///
/// A click is three steps: [`post_id_for`](Self::post_id_for) reads the
/// button, [`request`](Self::request) talks to the server without touching
/// the page, and [`reconcile`](Self::reconcile) writes the answer back.
/// Several requests may be in flight for one page; whichever is reconciled
/// last wins.
pub struct LikeToggleController<A: LikeApi> {
    api: A,
    log_config: LogConfig,
}

impl<A: LikeApi> LikeToggleController<A> {
    pub fn new(api: A, log_config: LogConfig) -> Self {
        Self { api, log_config }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Toggle the like behind `button` and reconcile the page from the answer.
    ///
    /// On failure nothing on the page changes apart from a single alert.
    pub async fn toggle<P: LikeSurface + ?Sized>(
        &self,
        page: &mut P,
        button: ButtonId,
    ) -> Result<LikeState, ApiError> {
        let post_id = self.post_id_for(page, button)?;
        let outcome = self.request(&post_id).await;
        self.reconcile(page, button, outcome)
    }

    /// Post id carried by `button`. A button without one is reported like
    /// any other failed toggle, and no request should follow.
    pub fn post_id_for<P: LikeSurface + ?Sized>(
        &self,
        page: &mut P,
        button: ButtonId,
    ) -> Result<PostId, ApiError> {
        page.button_post_id(button).ok_or_else(|| {
            self.report(page, ApiError::BadRequest("like button has no post id".to_string()))
        })
    }

    /// Ask the server to flip the like on `post_id`
    pub async fn request(&self, post_id: &PostId) -> ApiResult<LikeState> {
        log_api_call!(self.log_config, "POST like-toggle post_id={}", post_id);

        let response = self.api.toggle_like(post_id).await?;
        log_api_call!(
            self.log_config,
            "like-toggle post_id={} liked={} likes_count={}",
            response.post_id,
            response.liked,
            response.likes_count
        );
        Ok(LikeState::from(&response))
    }

    /// Write the outcome of one request into the page
    pub fn reconcile<P: LikeSurface + ?Sized>(
        &self,
        page: &mut P,
        button: ButtonId,
        outcome: ApiResult<LikeState>,
    ) -> Result<LikeState, ApiError> {
        match outcome {
            Ok(state) => {
                apply_state(page, button, &state);
                Ok(state)
            }
            Err(err) => Err(self.report(page, err)),
        }
    }

    fn report<P: LikeSurface + ?Sized>(&self, page: &mut P, err: ApiError) -> ApiError {
        log::error!("Error toggling like: {}", err);
        page.alert(LIKE_ERROR_MESSAGE);
        err
    }
}

/// Show `state` on the button and on its post's like counter
pub fn apply_state<P: LikeSurface + ?Sized>(page: &mut P, button: ButtonId, state: &LikeState) {
    page.set_button_state(button, LikeLabel::for_liked(state.liked), state.liked);
    page.set_likes_count_text(&state.post_id, &format_likes_count(state.likes_count));
}
