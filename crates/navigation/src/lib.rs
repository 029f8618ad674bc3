//! Navigation orchestration for the roomkeep app.
//!
//! * [`NavigationService`] issues imperative navigation against a
//!   [`NavigatorHandle`] that may not be mounted yet, queueing requests until
//!   it is and keeping a bounded history of what was dispatched.
//! * [`RouteClassifier`] validates requests against the route table, picks a
//!   dispatch strategy from the route kind and gates protected routes behind
//!   authentication.
//! * [`RootStack`] resets the stack when the session changes.
//!
//! Failures never unwind into callers: public operations return `bool` and
//! log, while `try_*` variants return [`NavigationError`].

mod classifier;
pub mod config;
mod error;
mod handle;
mod root;
mod service;
pub mod testing;

pub use classifier::{DirectDispatch, KindHandler, NavigateOptions, RouteClassifier, RouteDispatch, kind_handler};
pub use config::NavigationConfig;
pub use error::{NavigationError, Result};
pub use handle::{DispatchError, NavAction, NavState, NavigatorHandle, RouteState};
pub use roomkeep_routes as routes;
pub use root::{RootStack, initial_route};
pub use service::{DEFAULT_HISTORY_CAPACITY, DebugInfo, HistoryAction, HistoryEntry, NavigationService};
