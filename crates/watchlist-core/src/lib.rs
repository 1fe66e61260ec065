pub mod app;
pub mod drag;
pub mod search;
pub mod session;
pub mod subscription;
pub mod view;
pub mod watchlist;

pub use app::{App, Completion, Effect, Key, Outcome, UserEvent};
pub use drag::{DragError, DragReorderEngine, DragState, DropOutcome, HoverTarget};
pub use search::{SearchResults, SearchState, NO_MATCH_MESSAGE};
pub use session::Session;
pub use subscription::{PressHub, PressTarget, Subscription};
pub use view::{project, AppView, DisplayItem, ResultsView};
pub use watchlist::{Watchlist, WatchlistError};
