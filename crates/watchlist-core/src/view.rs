//! Read-only projection of the app for the render layer.
//!
//! The view is rebuilt from scratch after every event; nothing in it is
//! mutated in place. During a drag the dragged row stays at its index with
//! `hidden` set and a single placeholder item is inserted at the engine's slot.

use serde::Serialize;
use watchlist_models::{Candidate, MovieEntry};
use crate::app::App;
use crate::search::{SearchResults, NO_MATCH_MESSAGE};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ResultsView<'a> {
    Hidden,
    NoMatches { message: &'static str },
    Matches { candidates: &'a [Candidate] },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplayItem<'a> {
    Row {
        index: usize,
        entry: &'a MovieEntry,
        hidden: bool,
    },
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppView<'a> {
    pub query: &'a str,
    pub results: ResultsView<'a>,
    pub watchlist: Vec<DisplayItem<'a>>,
    /// Identifier being dragged, if a gesture is active
    pub dragging: Option<&'a str>,
}

impl AppView<'_> {
    pub fn placeholder_count(&self) -> usize {
        self.watchlist
            .iter()
            .filter(|item| matches!(item, DisplayItem::Placeholder))
            .count()
    }

    /// Visible entries in display order (hidden row skipped)
    pub fn visible_entries(&self) -> Vec<&MovieEntry> {
        self.watchlist
            .iter()
            .filter_map(|item| match item {
                DisplayItem::Row { entry, hidden: false, .. } => Some(*entry),
                _ => None,
            })
            .collect()
    }
}

pub fn project(app: &App) -> AppView<'_> {
    let search = app.search();
    let results = match search.results() {
        SearchResults::Hidden => ResultsView::Hidden,
        SearchResults::NoMatches => ResultsView::NoMatches { message: NO_MATCH_MESSAGE },
        SearchResults::Matches(candidates) => ResultsView::Matches { candidates },
    };

    let drag = app.drag();
    let hidden = drag.hidden_entry();
    let slot = drag.placeholder_slot();
    let entries = app.watchlist().entries();

    let mut watchlist = Vec::with_capacity(entries.len() + 1);
    for (index, entry) in entries.iter().enumerate() {
        if slot == Some(index) {
            watchlist.push(DisplayItem::Placeholder);
        }
        watchlist.push(DisplayItem::Row {
            index,
            entry,
            hidden: hidden == Some(entry.id.as_str()),
        });
    }
    if slot.is_some_and(|s| s >= entries.len()) {
        watchlist.push(DisplayItem::Placeholder);
    }

    AppView {
        query: search.query(),
        results,
        watchlist,
        dragging: drag.gesture().map(|g| g.dragged()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{Completion, Effect, UserEvent};
    use crate::drag::HoverTarget;
    use crate::watchlist::tests::movie;

    fn app_with(ids: &[&str]) -> App {
        let mut app = App::new();
        for id in ids {
            app.complete(Completion::Detail { id: id.to_string(), result: Ok(movie(id)) });
        }
        app
    }

    fn layout(view: &AppView) -> Vec<String> {
        view.watchlist
            .iter()
            .map(|item| match item {
                DisplayItem::Row { entry, hidden: true, .. } => format!("({})", entry.id),
                DisplayItem::Row { entry, .. } => entry.id.clone(),
                DisplayItem::Placeholder => "_".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_idle_projection() {
        let app = app_with(&["A", "B"]);
        let view = project(&app);
        assert_eq!(layout(&view), vec!["A", "B"]);
        assert_eq!(view.results, ResultsView::Hidden);
        assert_eq!(view.dragging, None);
        assert_eq!(view.placeholder_count(), 0);
    }

    #[test]
    fn test_placeholder_follows_gesture() {
        let mut app = app_with(&["A", "B", "C"]);
        app.handle(UserEvent::DragStarted { id: "A".to_string(), y: 0.0 });
        // Dragging without a target: nothing hidden, no placeholder yet
        assert_eq!(layout(&project(&app)), vec!["A", "B", "C"]);

        app.handle(UserEvent::DragOver { target: HoverTarget::Row("B".to_string()), y: 50.0 });
        let view = project(&app);
        assert_eq!(layout(&view), vec!["(A)", "B", "_", "C"]);
        assert_eq!(view.placeholder_count(), 1);
        assert_eq!(view.dragging, Some("A"));

        app.handle(UserEvent::DragOver { target: HoverTarget::Row("C".to_string()), y: 120.0 });
        assert_eq!(layout(&project(&app)), vec!["(A)", "B", "C", "_"]);

        app.handle(UserEvent::DragOver { target: HoverTarget::Row("C".to_string()), y: 110.0 });
        assert_eq!(layout(&project(&app)), vec!["(A)", "B", "_", "C"]);

        app.handle(UserEvent::Dropped(HoverTarget::Placeholder));
        let view = project(&app);
        assert_eq!(layout(&view), vec!["B", "A", "C"]);
        assert_eq!(view.placeholder_count(), 0);
    }

    #[test]
    fn test_drag_end_restores_rows() {
        let mut app = app_with(&["A", "B", "C"]);
        app.handle(UserEvent::DragStarted { id: "C".to_string(), y: 200.0 });
        app.handle(UserEvent::DragOver { target: HoverTarget::Row("A".to_string()), y: 10.0 });
        assert_eq!(layout(&project(&app)), vec!["_", "A", "B", "(C)"]);
        assert_eq!(project(&app).visible_entries().len(), 2);

        app.handle(UserEvent::DragEnded);
        assert_eq!(layout(&project(&app)), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_no_match_message() {
        let mut app = App::new();
        app.handle(UserEvent::QueryChanged("zzznomatch".to_string()));
        let Some(Effect::SearchByTitle(request)) = app.handle(UserEvent::SearchClicked).pop() else {
            panic!("expected a search effect");
        };
        app.complete(Completion::Search { generation: request.generation, result: Ok(Vec::new()) });

        let view = project(&app);
        assert_eq!(view.query, "zzznomatch");
        assert_eq!(view.results, ResultsView::NoMatches { message: NO_MATCH_MESSAGE });
    }

    #[test]
    fn test_view_serializes() {
        let app = app_with(&["A"]);
        let json = serde_json::to_value(project(&app)).unwrap();
        assert_eq!(json["results"]["state"], "hidden");
        assert_eq!(json["watchlist"][0]["kind"], "row");
        assert_eq!(json["watchlist"][0]["entry"]["id"], "A");
    }
}
