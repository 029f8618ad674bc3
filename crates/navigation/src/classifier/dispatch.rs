//! Dispatch strategies per route kind.

use roomkeep_routes::{NavigationTarget, Params, RouteKind, RouteTable};

use crate::handle::dispatch_guarded;
use crate::service::NavOp;
use crate::{NavAction, NavigationError, NavigationService, NavigatorHandle, Result};

/// Navigation primitives a dispatch strategy can use.
///
/// Implemented by the shared [`NavigationService`] and by [`DirectDispatch`]
/// for callers holding a navigator handle of their own.
pub trait RouteDispatch {
	fn navigate(&self, route: &str, params: Params) -> Result<()>;
	fn navigate_to_tab(&self, target: NavigationTarget) -> Result<()>;
	fn push(&self, route: &str, params: Params) -> Result<()>;
	fn replace(&self, route: &str, params: Params) -> Result<()>;
	fn reset_root(&self, route: &str, params: Params) -> Result<()>;
}

/// Dispatches only while the service is ready.
///
/// Unlike the inherent operations these never queue: a service that is not
/// ready fails with [`NavigationError::NotReady`] so the caller can pick
/// another path.
impl RouteDispatch for NavigationService {
	fn navigate(&self, route: &str, params: Params) -> Result<()> {
		self.dispatch_if_ready(NavOp::Navigate {
			route: route.to_string(),
			params,
		})
	}

	fn navigate_to_tab(&self, target: NavigationTarget) -> Result<()> {
		self.dispatch_if_ready(NavOp::NavigateToTab(target))
	}

	fn push(&self, route: &str, params: Params) -> Result<()> {
		self.dispatch_if_ready(NavOp::Push {
			route: route.to_string(),
			params,
		})
	}

	fn replace(&self, route: &str, params: Params) -> Result<()> {
		self.dispatch_if_ready(NavOp::Replace {
			route: route.to_string(),
			params,
		})
	}

	fn reset_root(&self, route: &str, params: Params) -> Result<()> {
		self.dispatch_if_ready(NavOp::ResetRoot {
			route: route.to_string(),
			params,
		})
	}
}

/// Dispatches straight into a navigator handle, bypassing the service queue
/// and history.
pub struct DirectDispatch<'a> {
	handle: &'a dyn NavigatorHandle,
}

impl<'a> DirectDispatch<'a> {
	pub fn new(handle: &'a dyn NavigatorHandle) -> Self {
		Self { handle }
	}

	fn send(&self, op: &'static str, route: &str, action: NavAction) -> Result<()> {
		dispatch_guarded(self.handle, action).map_err(|source| NavigationError::Dispatch {
			action: op,
			route: Some(route.to_string()),
			source,
		})
	}
}

impl RouteDispatch for DirectDispatch<'_> {
	fn navigate(&self, route: &str, params: Params) -> Result<()> {
		self.send("navigate", route, NavAction::navigate(route, params))
	}

	fn navigate_to_tab(&self, target: NavigationTarget) -> Result<()> {
		self.send("navigate_to_tab", &target.screen, NavAction::navigate(target.route.clone(), target.params))
	}

	fn push(&self, route: &str, params: Params) -> Result<()> {
		self.send("push", route, NavAction::push(route, params))
	}

	fn replace(&self, route: &str, params: Params) -> Result<()> {
		self.send("replace", route, NavAction::replace(route, params))
	}

	fn reset_root(&self, route: &str, params: Params) -> Result<()> {
		self.send("reset_root", route, NavAction::reset_to(route, params))
	}
}

/// Strategy for dispatching a route of a given kind.
pub type KindHandler = fn(&dyn RouteDispatch, &RouteTable, &str, Params) -> Result<()>;

/// Dispatch strategy for `kind`.
pub fn kind_handler(kind: RouteKind) -> KindHandler {
	match kind {
		RouteKind::BottomTab => dispatch_tab,
		RouteKind::Modal => dispatch_modal,
		RouteKind::Stack | RouteKind::Drawer => dispatch_plain,
	}
}

fn dispatch_tab(dispatcher: &dyn RouteDispatch, table: &RouteTable, route: &str, params: Params) -> Result<()> {
	let target = table.navigation_target(route, params)?;
	dispatcher.navigate_to_tab(target)
}

fn dispatch_modal(dispatcher: &dyn RouteDispatch, _table: &RouteTable, route: &str, params: Params) -> Result<()> {
	dispatcher.push(route, params)
}

fn dispatch_plain(dispatcher: &dyn RouteDispatch, _table: &RouteTable, route: &str, params: Params) -> Result<()> {
	dispatcher.navigate(route, params)
}
