//! The navigator capability supplied by the UI framework.

use std::panic::AssertUnwindSafe;

use roomkeep_routes::Params;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Navigation-tree controller handed over when the root container mounts.
///
/// This is the whole surface the orchestration layer relies on. Action
/// construction is ours ([`NavAction`]); interpreting actions is the
/// framework's.
pub trait NavigatorHandle: Send + Sync {
	/// Submits an action to the navigation tree.
	fn dispatch(&self, action: NavAction) -> Result<(), DispatchError>;

	/// Current state of the root navigator, if it has rendered.
	fn root_state(&self) -> Option<NavState>;

	/// Whether a back action would be handled.
	fn can_go_back(&self) -> bool;
}

/// Action vocabulary understood by the navigation framework.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NavAction {
	Navigate { name: String, params: Params },
	Reset { index: usize, routes: Vec<RouteState> },
	GoBack,
	Pop { count: usize },
	PopToTop,
	Push { name: String, params: Params },
	Replace { name: String, params: Params },
}

impl NavAction {
	pub fn navigate(name: impl Into<String>, params: Params) -> Self {
		Self::Navigate { name: name.into(), params }
	}

	/// Reset to a stack holding only `name`.
	pub fn reset_to(name: impl Into<String>, params: Params) -> Self {
		Self::Reset {
			index: 0,
			routes: vec![RouteState::new(name, params)],
		}
	}

	pub fn push(name: impl Into<String>, params: Params) -> Self {
		Self::Push { name: name.into(), params }
	}

	pub fn replace(name: impl Into<String>, params: Params) -> Self {
		Self::Replace { name: name.into(), params }
	}

	/// Action type as the framework names it.
	pub const fn kind(&self) -> &'static str {
		match self {
			Self::Navigate { .. } => "NAVIGATE",
			Self::Reset { .. } => "RESET",
			Self::GoBack => "GO_BACK",
			Self::Pop { .. } => "POP",
			Self::PopToTop => "POP_TO_TOP",
			Self::Push { .. } => "PUSH",
			Self::Replace { .. } => "REPLACE",
		}
	}

	/// Route the action targets, if any.
	pub fn route(&self) -> Option<&str> {
		match self {
			Self::Navigate { name, .. } | Self::Push { name, .. } | Self::Replace { name, .. } => Some(name),
			Self::Reset { index, routes } => routes.get(*index).map(|r| r.name.as_str()),
			Self::GoBack | Self::Pop { .. } | Self::PopToTop => None,
		}
	}
}

/// State of one navigator: its routes and which one is focused.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavState {
	pub index: usize,
	pub routes: Vec<RouteState>,
}

impl NavState {
	/// Deepest focused route.
	///
	/// A route carrying nested state is a container, so the walk continues
	/// into it until a route without nested state is reached. Returns `None`
	/// when any focused index along the way is out of range.
	pub fn focused_route(&self) -> Option<&RouteState> {
		let route = self.routes.get(self.index)?;
		match route.state.as_deref() {
			Some(nested) => nested.focused_route(),
			None => Some(route),
		}
	}
}

/// One route entry in a navigator's state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteState {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub key: Option<String>,
	pub name: String,
	#[serde(default)]
	pub params: Params,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub state: Option<Box<NavState>>,
}

impl RouteState {
	pub fn new(name: impl Into<String>, params: Params) -> Self {
		Self {
			key: None,
			name: name.into(),
			params,
			state: None,
		}
	}

	/// Attaches a nested navigator state, making this route a container.
	pub fn with_state(mut self, state: NavState) -> Self {
		self.state = Some(Box::new(state));
		self
	}
}

/// Failure reported by, or raised inside, a [`NavigatorHandle`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
	/// The navigator refused the action.
	#[error("navigator rejected action: {0}")]
	Rejected(String),

	/// The navigator panicked while handling the action.
	#[error("navigator panicked: {0}")]
	Panicked(String),
}

impl DispatchError {
	pub fn rejected(reason: impl Into<String>) -> Self {
		Self::Rejected(reason.into())
	}
}

/// Runs a handle call, converting a panic into [`DispatchError::Panicked`].
pub(crate) fn guarded<T>(f: impl FnOnce() -> T) -> Result<T, DispatchError> {
	std::panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
		let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
			(*s).to_string()
		} else if let Some(s) = payload.downcast_ref::<String>() {
			s.clone()
		} else {
			"non-string panic payload".to_string()
		};
		DispatchError::Panicked(message)
	})
}

/// Dispatches `action` through `handle`, catching panics.
pub(crate) fn dispatch_guarded(handle: &dyn NavigatorHandle, action: NavAction) -> Result<(), DispatchError> {
	guarded(|| handle.dispatch(action))?
}
