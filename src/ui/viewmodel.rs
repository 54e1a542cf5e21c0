//! View model types: display-ready state, no rendering.
//!
//! Rendering, layout, and styling are out of scope for this crate; the host
//! surface draws whatever it likes from these structures. View models are
//! computed on demand from application state and contain pre-resolved
//! display data (selection marks, highlight ranges, relative timestamps,
//! loading placeholders) and no business logic.

use crate::domain::{ContentType, ItemId};

/// Everything the host needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub header: HeaderInfo,
    pub rows: Vec<ListRow>,
    pub preview: Preview,
    pub footer: FooterInfo,
    /// Present when a non-main mode is active.
    pub overlay: Option<OverlayView>,
}

/// Header bar: where the user is and what is filtered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Current location title (stack name when browsing nested).
    pub title: String,

    /// Free-text filter as typed; empty when inactive.
    pub filter_query: String,

    /// Label of the active content-type filter.
    pub type_filter: &'static str,
}

/// One row of the item listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub id: ItemId,
    pub title: String,
    pub content_type: ContentType,
    pub time_ago: String,
    pub is_selected: bool,
    pub is_stack: bool,
}

/// Preview pane content for the selected item.
///
/// `Loading` and `Unavailable` are first-class states, not errors: the
/// renderer shows a placeholder and the next pass retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// Resolved body text.
    Body(String),

    /// Fetch in flight.
    Loading,

    /// Last fetch failed; a retry has been issued.
    Unavailable,

    /// Nothing selected.
    Empty,
}

/// Footer: active mode name plus its key hints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub mode_name: String,
    pub key_hints: String,
}

/// Overlay drawn by the active non-main mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayView {
    pub title: String,

    /// Free-text input line (palette query, editor buffer, command line).
    pub input: Option<String>,

    pub options: Vec<OverlayOption>,

    /// Index of the selected option.
    pub selected: usize,

    /// Status line (pipe output tail, editor fetch state).
    pub status: Option<String>,
}

/// One selectable row inside an overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayOption {
    pub label: String,

    /// Right-aligned hint, typically a key combo.
    pub hint: Option<String>,

    /// Byte ranges of `label` matched by the query.
    pub highlights: Vec<(usize, usize)>,
}
