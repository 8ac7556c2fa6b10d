//! # ww-ui
//!
//! Server-rendered guestbook page: the submission form and the blessings
//! wall, laid out as three columns of cards with a pager underneath.

use askama::Template;
use chrono::{DateTime, Utc};
use ww_core::models::{GuestMessage, MESSAGE_MAX_CHARS, NAME_MAX_CHARS};
use ww_core::wall::{into_columns, Pager, COLUMN_COUNT, PAGE_SIZE};

#[derive(Template)]
#[template(path = "wall.html")]
pub struct WallPageTemplate {
    pub title: &'static str,
    pub notice: Option<Notice>,
    pub form: FormView,
    pub wall: WallView,
}

impl WallPageTemplate {
    pub fn new(wall: WallView) -> Self {
        Self {
            title: "Wall of Blessings",
            notice: None,
            form: FormView::blank(),
            wall,
        }
    }

    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }

    pub fn with_form(mut self, form: FormView) -> Self {
        self.form = form;
        self
    }
}

/// Toast-style banner shown above the form.
pub struct Notice {
    pub kind: &'static str,
    pub title: &'static str,
    pub body: &'static str,
}

impl Notice {
    pub fn sent() -> Self {
        Self {
            kind: "success",
            title: "Message sent! 💕",
            body: "Thank you for your beautiful wishes!",
        }
    }

    pub fn missing_fields() -> Self {
        Self {
            kind: "error",
            title: "Please fill in all fields",
            body: "Name and message are required",
        }
    }

    pub fn too_long() -> Self {
        Self {
            kind: "error",
            title: "Your wish is a little too long",
            body: "Names can be up to 50 characters and messages up to 500.",
        }
    }

    pub fn submit_failed() -> Self {
        Self {
            kind: "error",
            title: "Submission failed",
            body: "We couldn’t save your wish. Please try again.",
        }
    }
}

/// Values echoed back into the form so a failed submission loses nothing.
pub struct FormView {
    pub name: String,
    pub message: String,
    pub name_max: usize,
    pub message_max: usize,
}

impl FormView {
    pub fn filled(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            ..Self::blank()
        }
    }

    pub fn blank() -> Self {
        Self {
            name: String::new(),
            message: String::new(),
            name_max: NAME_MAX_CHARS,
            message_max: MESSAGE_MAX_CHARS,
        }
    }

    pub fn message_len(&self) -> usize {
        self.message.chars().count()
    }
}

pub struct CardView {
    pub name: String,
    pub message: String,
    pub posted_at: String,
}

impl From<&GuestMessage> for CardView {
    fn from(msg: &GuestMessage) -> Self {
        Self {
            name: msg.name.clone(),
            message: msg.message.clone(),
            posted_at: format_posted_at(msg.timestamp),
        }
    }
}

pub struct PageLink {
    pub number: usize,
    pub current: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallState {
    Failed,
    Empty,
    Loaded,
}

pub struct WallView {
    pub state: WallState,
    pub columns: Vec<Vec<CardView>>,
    pub pages: Vec<PageLink>,
    pub current_page: usize,
    pub total_pages: usize,
    pub previous_page: Option<usize>,
    pub next_page: Option<usize>,
    pub showing_first: usize,
    pub showing_last: usize,
    pub total_items: usize,
}

impl WallView {
    /// Lays out `sorted` (already newest first) at the requested page,
    /// clamped into range.
    pub fn loaded(sorted: &[GuestMessage], page: usize) -> Self {
        if sorted.is_empty() {
            return Self::with_state(WallState::Empty);
        }

        let pager = Pager::at(sorted.len(), PAGE_SIZE, page);
        let columns = into_columns(pager.slice(sorted).iter().map(CardView::from), COLUMN_COUNT);
        let (showing_first, showing_last, total_items) = pager.showing();
        let current = pager.current();

        Self {
            state: WallState::Loaded,
            columns,
            pages: (1..=pager.total_pages())
                .map(|number| PageLink {
                    number,
                    current: number == current,
                })
                .collect(),
            current_page: current,
            total_pages: pager.total_pages(),
            previous_page: pager.has_previous().then(|| current - 1),
            next_page: pager.has_next().then(|| current + 1),
            showing_first,
            showing_last,
            total_items,
        }
    }

    pub fn failed() -> Self {
        Self::with_state(WallState::Failed)
    }

    fn with_state(state: WallState) -> Self {
        Self {
            state,
            columns: Vec::new(),
            pages: Vec::new(),
            current_page: 1,
            total_pages: 0,
            previous_page: None,
            next_page: None,
            showing_first: 0,
            showing_last: 0,
            total_items: 0,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.state == WallState::Failed
    }

    pub fn is_empty(&self) -> bool {
        self.state == WallState::Empty
    }

    pub fn has_pager(&self) -> bool {
        self.total_pages > 1
    }
}

/// `Jun 14, 05:30 PM`
pub fn format_posted_at(ts: DateTime<Utc>) -> String {
    ts.format("%b %-d, %I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;
    use ww_core::wall::sort_newest_first;

    fn messages(n: usize) -> Vec<GuestMessage> {
        let base = Utc.with_ymd_and_hms(2025, 6, 14, 12, 0, 0).unwrap();
        let mut list: Vec<_> = (0..n)
            .map(|i| GuestMessage {
                id: Uuid::new_v4(),
                name: format!("guest {i}"),
                message: format!("wish {i}"),
                timestamp: base + Duration::minutes(i as i64),
            })
            .collect();
        sort_newest_first(&mut list);
        list
    }

    #[test]
    fn test_format_posted_at() {
        let ts = Utc.with_ymd_and_hms(2025, 6, 4, 17, 5, 0).unwrap();
        assert_eq!(format_posted_at(ts), "Jun 4, 05:05 PM");
    }

    #[test]
    fn test_loaded_view_layout() {
        let view = WallView::loaded(&messages(20), 1);
        assert_eq!(view.state, WallState::Loaded);
        assert_eq!(view.total_pages, 3);
        assert_eq!(view.columns.iter().map(Vec::len).sum::<usize>(), 9);
        assert_eq!(view.columns[0][0].name, "guest 19");
        assert_eq!(view.columns[1][0].name, "guest 18");
        assert_eq!(view.previous_page, None);
        assert_eq!(view.next_page, Some(2));
        assert!(view.pages[0].current);
    }

    #[test]
    fn test_out_of_range_page_is_clamped() {
        let view = WallView::loaded(&messages(20), 42);
        assert_eq!(view.current_page, 3);
        assert_eq!((view.showing_first, view.showing_last), (19, 20));
        assert_eq!(view.next_page, None);
    }

    #[test]
    fn test_render_empty_state() {
        let html = WallPageTemplate::new(WallView::loaded(&[], 1)).render().unwrap();
        assert!(html.contains("Be the first to write..."));
        assert!(!html.contains("Love in Transit"));
    }

    #[test]
    fn test_render_failed_state() {
        let html = WallPageTemplate::new(WallView::failed()).render().unwrap();
        assert!(html.contains("Love in Transit"));
    }

    #[test]
    fn test_render_escapes_guest_text() {
        let mut list = messages(1);
        list[0].message = "<script>alert(1)</script>".to_string();
        let html = WallPageTemplate::new(WallView::loaded(&list, 1)).render().unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&#60;script&#62;alert(1)&#60;/script&#62;"));
    }

    #[test]
    fn test_render_pager_only_with_several_pages() {
        let single = WallPageTemplate::new(WallView::loaded(&messages(9), 1)).render().unwrap();
        assert!(!single.contains("blessings</p>"));

        let paged = WallPageTemplate::new(WallView::loaded(&messages(10), 2)).render().unwrap();
        assert!(paged.contains("Showing 10 - 10 of 10 blessings"));
    }

    #[test]
    fn test_too_long_notice_states_the_bounds() {
        let html = WallPageTemplate::new(WallView::loaded(&[], 1))
            .with_notice(Notice::too_long())
            .render()
            .unwrap();
        assert!(html.contains("Your wish is a little too long"));
        assert!(html.contains("up to 500"));
        assert!(!html.contains("Please fill in all fields"));
    }

    #[test]
    fn test_render_keeps_form_values() {
        let html = WallPageTemplate::new(WallView::failed())
            .with_form(FormView::filled("Ada", "Congrats!"))
            .with_notice(Notice::submit_failed())
            .render()
            .unwrap();
        assert!(html.contains("value=\"Ada\""));
        assert!(html.contains(">Congrats!</textarea>"));
        assert!(html.contains("Submission failed"));
    }
}
