//! In-memory navigator for tests and headless runs.

use parking_lot::Mutex;
use rustc_hash::FxHashSet;

use crate::{DispatchError, NavAction, NavState, NavigatorHandle, RouteState};

#[derive(Default)]
struct Recorded {
	actions: Vec<NavAction>,
	stack: Vec<RouteState>,
	state_override: Option<NavState>,
	rejected: FxHashSet<String>,
	panic_on: FxHashSet<String>,
}

/// [`NavigatorHandle`] that records every action and models a single flat
/// stack.
///
/// Routes can be marked as rejected (dispatch returns an error) or as
/// panicking, to exercise failure paths.
#[derive(Default)]
pub struct RecordingNavigator {
	inner: Mutex<Recorded>,
}

impl RecordingNavigator {
	pub fn new() -> Self {
		Self::default()
	}

	/// Starts with `routes` already on the stack, last one focused.
	pub fn with_stack<I, S>(routes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let navigator = Self::new();
		navigator.inner.lock().stack = routes.into_iter().map(|name| RouteState::new(name, Default::default())).collect();
		navigator
	}

	/// Makes dispatches targeting `route` fail.
	pub fn reject_route(self, route: impl Into<String>) -> Self {
		self.inner.lock().rejected.insert(route.into());
		self
	}

	/// Makes dispatches targeting `route` panic.
	pub fn panic_on_route(self, route: impl Into<String>) -> Self {
		self.inner.lock().panic_on.insert(route.into());
		self
	}

	/// Reports `state` from [`NavigatorHandle::root_state`] instead of the
	/// modelled stack.
	pub fn set_state(&self, state: NavState) {
		self.inner.lock().state_override = Some(state);
	}

	/// Every action that was accepted, in order.
	pub fn actions(&self) -> Vec<NavAction> {
		self.inner.lock().actions.clone()
	}

	/// Target routes of accepted actions, in order.
	pub fn dispatched_routes(&self) -> Vec<String> {
		self.inner.lock().actions.iter().filter_map(|a| a.route().map(str::to_string)).collect()
	}

	/// Route names on the modelled stack, bottom first.
	pub fn stack(&self) -> Vec<String> {
		self.inner.lock().stack.iter().map(|r| r.name.clone()).collect()
	}
}

impl NavigatorHandle for RecordingNavigator {
	fn dispatch(&self, action: NavAction) -> Result<(), DispatchError> {
		let mut inner = self.inner.lock();
		if let Some(route) = action.route() {
			if inner.panic_on.contains(route) {
				panic!("navigator blew up on {route}");
			}
			if inner.rejected.contains(route) {
				return Err(DispatchError::rejected(format!("{route} is unavailable")));
			}
		}

		match &action {
			NavAction::Navigate { name, params } => {
				match inner.stack.iter().position(|r| &r.name == name) {
					Some(pos) => {
						inner.stack.truncate(pos + 1);
						inner.stack[pos].params = params.clone();
					}
					None => inner.stack.push(RouteState::new(name.clone(), params.clone())),
				}
			}
			NavAction::Push { name, params } => inner.stack.push(RouteState::new(name.clone(), params.clone())),
			NavAction::Replace { name, params } => {
				inner.stack.pop();
				inner.stack.push(RouteState::new(name.clone(), params.clone()));
			}
			NavAction::Reset { routes, .. } => inner.stack = routes.clone(),
			NavAction::GoBack => {
				if inner.stack.len() < 2 {
					return Err(DispatchError::rejected("nothing to go back to"));
				}
				inner.stack.pop();
			}
			NavAction::Pop { count } => {
				let keep = inner.stack.len().saturating_sub(*count).max(1);
				inner.stack.truncate(keep);
			}
			NavAction::PopToTop => inner.stack.truncate(1),
		}
		inner.actions.push(action);
		Ok(())
	}

	fn root_state(&self) -> Option<NavState> {
		let inner = self.inner.lock();
		if let Some(state) = &inner.state_override {
			return Some(state.clone());
		}
		if inner.stack.is_empty() {
			return None;
		}
		Some(NavState {
			index: inner.stack.len() - 1,
			routes: inner.stack.clone(),
		})
	}

	fn can_go_back(&self) -> bool {
		self.inner.lock().stack.len() > 1
	}
}
