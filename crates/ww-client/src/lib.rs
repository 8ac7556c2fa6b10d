//! # ww-client
//!
//! The guest-facing side of the data flow: an HTTP client for the message
//! store endpoint, the blessings wall view-model and the guestbook form.
//!
//! The two views never share state. After a successful submission the
//! guestbook invokes a caller-supplied callback, which is expected to
//! refresh the wall from the endpoint.

pub mod api;
pub mod guestbook;
pub mod wall;

pub use api::{ClientError, HttpWishesClient, WishesApi};
pub use guestbook::{Guestbook, GuestbookError};
pub use wall::{BlessingsWall, WallState};

#[cfg(any(test, feature = "testing"))]
pub use api::MockWishesApi;
