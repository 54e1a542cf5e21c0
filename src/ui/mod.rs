//! View model computation.
//!
//! Transforms application state into display-ready structures. This is the
//! whole UI layer of the crate; actual drawing belongs to the host surface.
//!
//! Computing the view model is also the lazy-load trigger for preview
//! content: the first render of a selected item issues its content fetch
//! through the cache, which is why [`compute`] takes the app mutably.

pub mod viewmodel;

pub use viewmodel::{
    FooterInfo, HeaderInfo, ListRow, OverlayOption, OverlayView, Preview, ViewModel,
};

use crate::app::App;
use crate::cache::ContentStatus;
use crate::domain::ContentType;

/// Computes the view model for one frame.
///
/// `max_rows` is the number of listing rows the surface can show; the
/// visible window is centered on the selection the way a scrolling list
/// keeps its cursor in view.
pub fn compute(app: &mut App, max_rows: usize) -> ViewModel {
    let header = compute_header(app);
    let rows = compute_rows(app, max_rows.max(1));
    let preview = compute_preview(app);
    let footer = compute_footer(app);
    let overlay = app.dispatcher.overlay(&app.state);

    ViewModel {
        header,
        rows,
        preview,
        footer,
        overlay,
    }
}

fn compute_header(app: &App) -> HeaderInfo {
    let title = app
        .state
        .parent_stack()
        .map_or_else(|| "Recent".to_string(), |stack| stack.terse.clone());

    let filter = app.state.nav.filter();
    HeaderInfo {
        title,
        filter_query: filter.query.clone(),
        type_filter: filter.kind.label(),
    }
}

fn compute_rows(app: &App, max_rows: usize) -> Vec<ListRow> {
    let frame = app.state.nav.current();
    let total = frame.visible.len();
    if total == 0 {
        return vec![];
    }

    // center the window on the selection, pinned at the edges
    let mut start = frame.selected.saturating_sub(max_rows / 2);
    let end = (start + max_rows).min(total);
    if end - start < max_rows && total >= max_rows {
        start = end.saturating_sub(max_rows);
    }

    frame.visible[start..end]
        .iter()
        .enumerate()
        .filter_map(|(offset, id)| {
            let absolute = start + offset;
            let item = app.state.arena.get(id)?;
            Some(ListRow {
                id: item.id.clone(),
                title: item.terse.clone(),
                content_type: item.content_type,
                time_ago: item.time_ago(),
                is_selected: absolute == frame.selected,
                is_stack: item.is_stack(),
            })
        })
        .collect()
}

fn compute_preview(app: &mut App) -> Preview {
    let Some(item) = app.state.selected_item() else {
        return Preview::Empty;
    };

    if item.is_stack() {
        // stacks preview as their member listing; no content fetch involved
        let children: Vec<String> = item
            .children
            .iter()
            .filter_map(|id| app.state.arena.get(id))
            .map(|child| child.terse.clone())
            .collect();
        return Preview::Body(children.join("\n"));
    }

    if item.content_type == ContentType::Image {
        // image bytes stay in the backend; the terse line describes them
        return Preview::Body(item.terse.clone());
    }

    let hash = item.hash.clone();
    match app.state.request_content(&hash) {
        ContentStatus::Loaded => {
            let body = app.state.cache.body(&hash).unwrap_or_default().to_string();
            Preview::Body(body)
        }
        ContentStatus::Loading => Preview::Loading,
        ContentStatus::Unavailable => Preview::Unavailable,
    }
}

fn compute_footer(app: &App) -> FooterInfo {
    let hints = app
        .dispatcher
        .key_hints(&app.state)
        .into_iter()
        .map(|hint| format!("{}: {}", hint.keys, hint.name))
        .collect::<Vec<_>>()
        .join("  ");

    FooterInfo {
        mode_name: app.dispatcher.mode_name(&app.state),
        key_hints: hints,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::handler::{handle_event, Event};
    use crate::bridge::testing::RecordingBridge;
    use crate::bridge::Bridge;
    use crate::domain::{ContentHash, ItemId, ItemSnapshot};
    use std::rc::Rc;

    fn item(id: &str) -> ItemSnapshot {
        ItemSnapshot {
            id: ItemId(id.to_string()),
            touched: vec![],
            hash: ContentHash(format!("sha256-{id}")),
            mime_type: "text/plain".to_string(),
            content_type: ContentType::Text,
            terse: format!("item {id}"),
            link: None,
            touched_at: 0,
            children: vec![],
        }
    }

    #[test]
    fn first_render_issues_preview_fetch_then_loads() {
        let bridge = Rc::new(RecordingBridge::default());
        let mut app = App::new(Rc::clone(&bridge) as Rc<dyn Bridge>, 16);
        handle_event(&mut app, &Event::RecentItems(vec![item("A")])).unwrap();

        let vm = compute(&mut app, 10);
        assert_eq!(vm.preview, Preview::Loading);
        assert_eq!(bridge.count_of("store_get_content"), 1);

        // a second render pass must not duplicate the fetch
        let vm = compute(&mut app, 10);
        assert_eq!(vm.preview, Preview::Loading);
        assert_eq!(bridge.count_of("store_get_content"), 1);

        handle_event(
            &mut app,
            &Event::ContentLoaded {
                hash: ContentHash("sha256-A".into()),
                body: "resolved".to_string(),
            },
        )
        .unwrap();

        let vm = compute(&mut app, 10);
        assert_eq!(vm.preview, Preview::Body("resolved".to_string()));
    }

    #[test]
    fn window_centers_on_selection() {
        let bridge = Rc::new(RecordingBridge::default());
        let mut app = App::new(bridge, 16);
        let items: Vec<ItemSnapshot> = (0..20).map(|i| item(&format!("i{i:02}"))).collect();
        handle_event(&mut app, &Event::RecentItems(items)).unwrap();

        for _ in 0..10 {
            app.state.nav.move_selection(1);
        }

        let vm = compute(&mut app, 5);
        assert_eq!(vm.rows.len(), 5);
        assert!(vm.rows.iter().any(|row| row.is_selected));
        // selection sits mid-window
        assert_eq!(vm.rows[2].id, ItemId("i10".into()));
        assert!(vm.rows[2].is_selected);
    }

    #[test]
    fn footer_reflects_active_mode() {
        let bridge = Rc::new(RecordingBridge::default());
        let mut app = App::new(bridge, 16);

        let vm = compute(&mut app, 5);
        assert_eq!(vm.footer.mode_name, "Recent");
        assert!(vm.overlay.is_none());

        app.dispatcher
            .toggle(&app.state, crate::app::ModeIntent::Palette);
        let vm = compute(&mut app, 5);
        assert_eq!(vm.footer.mode_name, "Actions");
        assert!(vm.overlay.is_some());
    }
}
