//! Guestbook submission form.

use std::future::Future;

use thiserror::Error;
use tracing::{info, warn};
use ww_core::error::AppError;
use ww_core::models::{GuestMessage, NewWish};

use crate::api::{ClientError, WishesApi};

#[derive(Error, Debug)]
pub enum GuestbookError {
    /// Blank or oversized field; nothing was sent.
    #[error("invalid wish: {0}")]
    Validation(#[from] AppError),

    /// A previous submission has not finished yet.
    #[error("a submission is already in progress")]
    InFlight,

    /// The endpoint could not store the wish. The form keeps its input.
    #[error("submission failed: {0}")]
    SubmitFailed(#[source] ClientError),
}

#[derive(Debug, Default)]
pub struct Guestbook {
    pub name: String,
    pub message: String,
    submitting: bool,
}

impl Guestbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            submitting: false,
        }
    }

    /// True between `begin_submit` and `finish_submit`; the submit control
    /// is disabled meanwhile.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Local check only: both fields non-blank and within their bounds.
    pub fn validate(&self) -> Result<NewWish, GuestbookError> {
        Ok(NewWish::new(self.name.as_str(), self.message.as_str()).validated()?)
    }

    /// Validates the input and marks the form as submitting. The returned
    /// wish is what should be posted.
    pub fn begin_submit(&mut self) -> Result<NewWish, GuestbookError> {
        if self.submitting {
            return Err(GuestbookError::InFlight);
        }
        let wish = self.validate()?;
        self.submitting = true;
        Ok(wish)
    }

    /// Records the outcome of the post started by `begin_submit`.
    ///
    /// Success clears both fields. Failure leaves them untouched so the
    /// guest can resubmit. Either way the form stops submitting.
    pub fn finish_submit(
        &mut self,
        result: Result<GuestMessage, ClientError>,
    ) -> Result<GuestMessage, GuestbookError> {
        self.submitting = false;
        match result {
            Ok(created) => {
                info!(id = %created.id, "wish sent");
                self.name.clear();
                self.message.clear();
                Ok(created)
            }
            Err(e) => {
                warn!(error = %e, "wish submission failed");
                Err(GuestbookError::SubmitFailed(e))
            }
        }
    }

    /// `begin_submit`, post, `finish_submit`, then on success awaits
    /// `on_success` (typically a wall refresh).
    pub async fn submit<A, F, Fut>(
        &mut self,
        api: &A,
        on_success: F,
    ) -> Result<GuestMessage, GuestbookError>
    where
        A: WishesApi + ?Sized,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ()>,
    {
        let wish = self.begin_submit()?;
        let created = self.finish_submit(api.submit_wish(&wish).await)?;
        on_success().await;
        Ok(created)
    }
}
