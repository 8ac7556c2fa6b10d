//! # ww-api Handlers
//!
//! This module coordinates the flow between HTTP requests and the
//! `MessageStore` port: the JSON endpoint, the guestbook form post and the
//! server-rendered blessings wall.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Form, Json};
use askama::Template;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};
use ww_core::error::AppError;
use ww_core::models::{GuestMessage, NewWish};
use ww_core::traits::MessageStore;
use ww_core::wall::sort_newest_first;
use ww_ui::{FormView, Notice, WallPageTemplate, WallView};

use crate::error::ApiError;

/// State shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MessageStore>,
}

// ============================================================================
// Message store endpoint
// ============================================================================

/// `GET` — the whole list, in store order.
pub async fn list_wishes(
    State(state): State<AppState>,
) -> Result<Json<Vec<GuestMessage>>, ApiError> {
    let wishes = state.store.read_all().await.map_err(ApiError::Store)?;
    Ok(Json(wishes))
}

/// `POST` — validates `{name, message}`, stamps it and prepends it.
///
/// The body is parsed as JSON whatever the declared content type, since
/// browsers posting a plain string send `text/plain`.
pub async fn create_wish(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GuestMessage>, ApiError> {
    let wish: NewWish = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("invalid wish body: {e}")))?;
    let wish = wish.validated()?;

    let stored = state
        .store
        .append(wish.into_message())
        .await
        .map_err(ApiError::Store)?;

    info!(id = %stored.id, store = state.store.name(), "wish recorded");
    Ok(Json(stored))
}

/// Bare `OPTIONS` without CORS request headers; real preflights are
/// answered by the CORS layer before reaching here.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "status": "ok", "store": state.store.name() }))
}

// ============================================================================
// Page
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct WallQuery {
    /// Kept as text so `?page=abc` falls back to page 1 instead of a 400.
    pub page: Option<String>,
    /// Set by the redirect after a successful guestbook post.
    pub signed: Option<String>,
}

impl WallQuery {
    fn page(&self) -> usize {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(1)
    }
}

/// Renders the guestbook form and one page of the blessings wall.
pub async fn wall_page(
    State(state): State<AppState>,
    Query(query): Query<WallQuery>,
) -> Result<Html<String>, ApiError> {
    let mut page = WallPageTemplate::new(load_wall(&state, query.page()).await);
    if query.signed.is_some() {
        page = page.with_notice(Notice::sent());
    }
    Ok(Html(page.render()?))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GuestbookForm {
    pub name: String,
    pub message: String,
}

/// Form post from the page. Success redirects back to the wall; failures
/// re-render the page with the guest's input intact.
pub async fn sign_guestbook(
    State(state): State<AppState>,
    Form(mut form): Form<GuestbookForm>,
) -> Result<Response, ApiError> {
    // Browsers submit textarea line breaks as CRLF but count them as one
    // character against `maxlength`.
    form.message = form.message.replace("\r\n", "\n");

    let wish = match NewWish::new(form.name.clone(), form.message.clone()).validated() {
        Ok(wish) => wish,
        Err(e) => {
            info!(reason = %e, "rejected guestbook form");
            let notice = match e {
                AppError::MissingFields => Notice::missing_fields(),
                AppError::TooLong { .. } => Notice::too_long(),
            };
            return rerender(&state, form, notice, StatusCode::BAD_REQUEST).await;
        }
    };

    match state.store.append(wish.into_message()).await {
        Ok(stored) => {
            info!(id = %stored.id, "guestbook signed");
            Ok(Redirect::to("/?signed=1#blessings").into_response())
        }
        Err(e) => {
            warn!(error = %e, "guestbook submission failed");
            rerender(
                &state,
                form,
                Notice::submit_failed(),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
            .await
        }
    }
}

async fn rerender(
    state: &AppState,
    form: GuestbookForm,
    notice: Notice,
    status: StatusCode,
) -> Result<Response, ApiError> {
    let html = WallPageTemplate::new(load_wall(state, 1).await)
        .with_form(FormView::filled(form.name, form.message))
        .with_notice(notice)
        .render()?;
    Ok((status, Html(html)).into_response())
}

/// Fetches, sorts and lays out the wall. A store failure becomes the
/// wall's error state rather than failing the whole page.
async fn load_wall(state: &AppState, page: usize) -> WallView {
    match state.store.read_all().await {
        Ok(mut messages) => {
            sort_newest_first(&mut messages);
            WallView::loaded(&messages, page)
        }
        Err(e) => {
            warn!(error = %e, "could not load blessings");
            WallView::failed()
        }
    }
}
