//! Imperative navigation against a navigator that may not exist yet.
//!
//! The root navigation container mounts some time after the app starts, but
//! screens, notification handlers and auth callbacks want to navigate as soon
//! as they run. [`NavigationService`] accepts requests at any time:
//!
//! * **NotReady**: no navigator attached. Requests are queued as pending
//!   operations and report `false`.
//! * **Ready**: requests are dispatched immediately and recorded in a bounded
//!   history.
//!
//! [`NavigationService::set_navigator`] drains the queue in FIFO order before
//! the service is flagged ready, so requests issued during the drain are
//! appended and drained in the same pass. [`NavigationService::detach_navigator`]
//! returns the service to NotReady.
//!
//! Readiness is published on a watch channel; [`NavigationService::wait_for_ready`]
//! resolves as soon as it flips instead of polling.

mod history;
mod pending;


use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use roomkeep_routes::{NavigationTarget, Params};
use serde::Serialize;
use tokio::sync::watch;

pub use self::history::{DEFAULT_HISTORY_CAPACITY, HistoryAction, HistoryEntry};
use self::history::History;
pub(crate) use self::pending::NavOp;
use self::pending::PendingQueue;
use crate::config::DEFAULT_READY_TIMEOUT;
use crate::handle::{dispatch_guarded, guarded};
use crate::{NavigationConfig, NavigationError, NavigatorHandle, Result, RouteState};

/// Diagnostic snapshot for developer tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DebugInfo {
	pub is_ready: bool,
	pub current_route: Option<String>,
	pub history_count: usize,
	pub pending_actions: usize,
	pub can_go_back: bool,
}

struct ServiceState {
	handle: Option<Arc<dyn NavigatorHandle>>,
	/// Set once the pending queue has been drained into the attached handle.
	ready: bool,
	pending: PendingQueue,
	history: History,
}

impl ServiceState {
	fn active_handle(&self) -> Option<Arc<dyn NavigatorHandle>> {
		if self.ready { self.handle.clone() } else { None }
	}
}

/// Single point of imperative navigation for one running app.
///
/// Construct one per root navigation container and share it behind an
/// [`Arc`]. Every operation reports success as a `bool` and logs failures;
/// `try_*` variants expose the underlying [`NavigationError`].
pub struct NavigationService {
	state: Mutex<ServiceState>,
	ready_tx: watch::Sender<bool>,
	ready_timeout: Duration,
}

impl std::fmt::Debug for NavigationService {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let state = self.state.lock();
		f.debug_struct("NavigationService")
			.field("attached", &state.handle.is_some())
			.field("ready", &state.ready)
			.field("pending", &state.pending.len())
			.field("history", &state.history.len())
			.finish()
	}
}

impl Default for NavigationService {
	fn default() -> Self {
		Self::new()
	}
}

impl NavigationService {
	/// Creates a NotReady service with the default history capacity.
	pub fn new() -> Self {
		Self::with_history_capacity(DEFAULT_HISTORY_CAPACITY)
	}

	/// Creates a NotReady service keeping at most `capacity` history entries.
	pub fn with_history_capacity(capacity: usize) -> Self {
		let (ready_tx, _) = watch::channel(false);
		Self {
			state: Mutex::new(ServiceState {
				handle: None,
				ready: false,
				pending: PendingQueue::default(),
				history: History::new(capacity),
			}),
			ready_tx,
			ready_timeout: DEFAULT_READY_TIMEOUT,
		}
	}

	pub fn from_config(config: &NavigationConfig) -> Self {
		Self {
			ready_timeout: config.ready_timeout(),
			..Self::with_history_capacity(config.history_capacity)
		}
	}

	/// Attaches the navigator and replays queued operations in order.
	///
	/// Each queued operation is removed from the queue before it runs and a
	/// failure is logged without stopping the rest. The service becomes ready
	/// once the queue is empty.
	pub fn set_navigator(&self, handle: Arc<dyn NavigatorHandle>) {
		{
			let mut state = self.state.lock();
			state.handle = Some(Arc::clone(&handle));
			state.ready = false;
		}

		let mut replayed = 0usize;
		loop {
			let op = {
				let mut state = self.state.lock();
				if !state.handle.as_ref().is_some_and(|h| Arc::ptr_eq(h, &handle)) {
					tracing::debug!(replayed, "navigator replaced during replay");
					return;
				}
				match state.pending.pop() {
					Some(op) => op,
					None => {
						state.ready = true;
						break;
					}
				}
			};
			replayed += 1;
			if let Err(error) = self.execute(handle.as_ref(), op) {
				tracing::warn!(%error, "queued navigation failed");
			}
		}

		self.ready_tx.send_replace(true);
		tracing::debug!(replayed, "navigator ready");
	}

	/// Detaches the navigator, returning to NotReady.
	///
	/// Later requests queue until the next [`Self::set_navigator`]. Returns
	/// whether a navigator was attached.
	pub fn detach_navigator(&self) -> bool {
		let attached = {
			let mut state = self.state.lock();
			state.ready = false;
			state.handle.take().is_some()
		};
		self.ready_tx.send_replace(false);
		if attached {
			tracing::debug!("navigator detached");
		}
		attached
	}

	/// Whether a navigator is attached and its queue has been replayed.
	pub fn is_ready(&self) -> bool {
		let state = self.state.lock();
		state.ready && state.handle.is_some()
	}

	pub fn navigate(&self, route: &str, params: Params) -> bool {
		report(self.try_navigate(route, params))
	}

	pub fn try_navigate(&self, route: &str, params: Params) -> Result<()> {
		self.submit(NavOp::Navigate {
			route: route.to_string(),
			params,
		})
	}

	/// Replaces the whole navigation stack with `route`.
	///
	/// Used on login, logout and onboarding completion so back navigation
	/// cannot return to a stale stack.
	pub fn reset_root(&self, route: &str, params: Params) -> bool {
		report(self.try_reset_root(route, params))
	}

	pub fn try_reset_root(&self, route: &str, params: Params) -> Result<()> {
		self.submit(NavOp::ResetRoot {
			route: route.to_string(),
			params,
		})
	}

	pub fn go_back(&self) -> bool {
		report(self.try_go_back())
	}

	pub fn try_go_back(&self) -> Result<()> {
		self.submit(NavOp::GoBack)
	}

	/// Pops `count` screens off the current stack.
	pub fn pop(&self, count: usize) -> bool {
		report(self.try_pop(count))
	}

	pub fn try_pop(&self, count: usize) -> Result<()> {
		self.submit(NavOp::Pop { count })
	}

	pub fn pop_to_top(&self) -> bool {
		report(self.try_pop_to_top())
	}

	pub fn try_pop_to_top(&self) -> Result<()> {
		self.submit(NavOp::PopToTop)
	}

	pub fn replace(&self, route: &str, params: Params) -> bool {
		report(self.try_replace(route, params))
	}

	pub fn try_replace(&self, route: &str, params: Params) -> Result<()> {
		self.submit(NavOp::Replace {
			route: route.to_string(),
			params,
		})
	}

	pub fn push(&self, route: &str, params: Params) -> bool {
		report(self.try_push(route, params))
	}

	pub fn try_push(&self, route: &str, params: Params) -> Result<()> {
		self.submit(NavOp::Push {
			route: route.to_string(),
			params,
		})
	}

	/// Navigates to `screen` inside the child navigator registered as
	/// `navigator`.
	pub fn navigate_nested(&self, navigator: &str, screen: &str, params: Params) -> bool {
		report(self.try_navigate_nested(navigator, screen, params))
	}

	pub fn try_navigate_nested(&self, navigator: &str, screen: &str, params: Params) -> Result<()> {
		self.submit(NavOp::NavigateNested {
			navigator: navigator.to_string(),
			screen: screen.to_string(),
			params,
		})
	}

	/// Navigates to a bottom-tab screen through its resolved container chain.
	pub fn navigate_to_tab(&self, target: NavigationTarget) -> bool {
		report(self.try_navigate_to_tab(target))
	}

	pub fn try_navigate_to_tab(&self, target: NavigationTarget) -> Result<()> {
		self.submit(NavOp::NavigateToTab(target))
	}

	/// Whether the attached navigator would handle a back action.
	pub fn can_go_back(&self) -> bool {
		self.active_handle().is_some_and(|handle| handle_can_go_back(handle.as_ref()))
	}

	/// Deepest focused route of the navigation tree.
	///
	/// `None` when not ready, when the navigator has no state yet, or when
	/// reading the state fails.
	pub fn current_route(&self) -> Option<RouteState> {
		focused_route(self.active_handle()?.as_ref())
	}

	/// Up to `limit` history entries, most recent first.
	pub fn history(&self, limit: usize) -> Vec<HistoryEntry> {
		self.state.lock().history.recent(limit)
	}

	pub fn clear_history(&self) {
		self.state.lock().history.clear();
	}

	/// Number of operations waiting for a navigator.
	pub fn pending_count(&self) -> usize {
		self.state.lock().pending.len()
	}

	/// Drops queued operations without running them. Returns how many were
	/// dropped.
	pub fn clear_pending(&self) -> usize {
		let dropped = self.state.lock().pending.clear();
		if dropped > 0 {
			tracing::debug!(dropped, "cleared pending navigation");
		}
		dropped
	}

	/// Snapshot of the service for tooling.
	///
	/// Readiness and counters come from one view of the state; the navigator
	/// is queried afterwards, outside the lock.
	pub fn debug_info(&self) -> DebugInfo {
		let (handle, history_count, pending_actions) = {
			let state = self.state.lock();
			(state.active_handle(), state.history.len(), state.pending.len())
		};
		let Some(handle) = handle else {
			return DebugInfo {
				is_ready: false,
				current_route: None,
				history_count,
				pending_actions,
				can_go_back: false,
			};
		};
		DebugInfo {
			is_ready: true,
			current_route: focused_route(handle.as_ref()).map(|r| r.name),
			history_count,
			pending_actions,
			can_go_back: handle_can_go_back(handle.as_ref()),
		}
	}

	/// Deadline used by [`Self::wait_until_ready`].
	pub fn ready_timeout(&self) -> Duration {
		self.ready_timeout
	}

	/// [`Self::wait_for_ready`] with the configured ready timeout.
	pub async fn wait_until_ready(&self) -> bool {
		self.wait_for_ready(self.ready_timeout).await
	}

	/// Resolves `true` once the service is ready, or `false` after `timeout`.
	pub async fn wait_for_ready(&self, timeout: Duration) -> bool {
		let mut ready_rx = self.ready_tx.subscribe();
		if self.is_ready() {
			return true;
		}
		match tokio::time::timeout(timeout, ready_rx.wait_for(|ready| *ready)).await {
			Ok(Ok(_)) => true,
			Ok(Err(_)) => false,
			Err(_) => {
				tracing::debug!(?timeout, "timed out waiting for navigator");
				false
			}
		}
	}

	/// Waits for readiness, then runs `action`.
	pub async fn execute_when_ready<F, E>(&self, action: F, timeout: Duration) -> bool
	where
		F: FnOnce(&NavigationService) -> std::result::Result<(), E>,
		E: std::fmt::Display,
	{
		report(self.try_execute_when_ready(action, timeout).await)
	}

	pub async fn try_execute_when_ready<F, E>(&self, action: F, timeout: Duration) -> Result<()>
	where
		F: FnOnce(&NavigationService) -> std::result::Result<(), E>,
		E: std::fmt::Display,
	{
		if !self.wait_for_ready(timeout).await {
			return Err(NavigationError::ReadinessTimeout(timeout));
		}
		match guarded(|| action(self)) {
			Ok(Ok(())) => Ok(()),
			Ok(Err(error)) => Err(NavigationError::Action(error.to_string())),
			Err(error) => Err(NavigationError::Action(error.to_string())),
		}
	}

	fn active_handle(&self) -> Option<Arc<dyn NavigatorHandle>> {
		self.state.lock().active_handle()
	}

	/// Dispatches `op` if a navigator is ready, without ever queueing it.
	pub(crate) fn dispatch_if_ready(&self, op: NavOp) -> Result<()> {
		let Some(handle) = self.active_handle() else {
			return Err(NavigationError::NotReady {
				action: op.history_action().into(),
			});
		};
		self.execute(handle.as_ref(), op)
	}

	/// Whether a root reset to `route` is waiting for the navigator.
	pub(crate) fn is_reset_pending(&self, route: &str) -> bool {
		self.state
			.lock()
			.pending
			.iter()
			.any(|op| matches!(op, NavOp::ResetRoot { route: r, .. } if r == route))
	}

	/// Route of the most recent root reset still in history.
	pub(crate) fn last_reset_route(&self) -> Option<String> {
		self.state.lock().history.last_of(HistoryAction::ResetRoot).and_then(|entry| entry.route.clone())
	}

	/// Dispatches `op` now, or queues it when not ready.
	fn submit(&self, op: NavOp) -> Result<()> {
		let handle = {
			let mut state = self.state.lock();
			match state.active_handle() {
				Some(handle) => handle,
				None => {
					let action: &'static str = op.history_action().into();
					tracing::debug!(action, route = op.route(), "navigator not ready, queueing");
					state.pending.push(op);
					return Err(NavigationError::Queued { action });
				}
			}
		};
		self.execute(handle.as_ref(), op)
	}

	fn execute(&self, handle: &dyn NavigatorHandle, op: NavOp) -> Result<()> {
		let action: &'static str = op.history_action().into();
		let route = op.route().map(str::to_string);
		let (nav, entry) = op.into_dispatch();
		tracing::trace!(action, route = route.as_deref(), kind = nav.kind(), "navigation.dispatch");

		dispatch_guarded(handle, nav).map_err(|source| NavigationError::Dispatch { action, route, source })?;
		self.state.lock().history.record(entry);
		Ok(())
	}
}

fn focused_route(handle: &dyn NavigatorHandle) -> Option<RouteState> {
	match guarded(|| handle.root_state()) {
		Ok(state) => state.and_then(|s| s.focused_route().cloned()),
		Err(error) => {
			tracing::warn!(%error, "reading navigation state failed");
			None
		}
	}
}

fn handle_can_go_back(handle: &dyn NavigatorHandle) -> bool {
	guarded(|| handle.can_go_back()).unwrap_or_else(|error| {
		tracing::warn!(%error, "can_go_back failed");
		false
	})
}

/// Collapses a result into the boolean the public operations return.
fn report(result: Result<()>) -> bool {
	match result {
		Ok(()) => true,
		Err(NavigationError::Queued { .. }) => false,
		Err(error) => {
			tracing::warn!(%error, "navigation failed");
			false
		}
	}
}
