//! Route-aware entry point for navigation requests.
//!
//! [`RouteClassifier`] validates a request against the route table, picks a
//! dispatch path (the shared service when ready, otherwise a handle supplied
//! by the caller) and a strategy from the route's kind, and applies auth
//! gating for [`RouteClassifier::safe_navigate`].

mod dispatch;
mod options;


use std::sync::Arc;

use roomkeep_routes::{AuthState, Params, RouteDescriptor, RouteTable, ids};

pub use self::dispatch::{DirectDispatch, KindHandler, RouteDispatch, kind_handler};
pub use self::options::NavigateOptions;
use crate::{NavigationConfig, NavigationError, NavigationService, NavigatorHandle, Result};

/// Classifies routes and dispatches requests for them.
#[derive(Debug, Clone)]
pub struct RouteClassifier {
	service: Arc<NavigationService>,
	table: RouteTable,
	login_route: Option<String>,
}

impl RouteClassifier {
	/// Classifier over the builtin table redirecting to the login screen.
	pub fn new(service: Arc<NavigationService>) -> Self {
		Self {
			service,
			table: RouteTable::builtin().clone(),
			login_route: Some(ids::LOGIN.to_string()),
		}
	}

	pub fn from_config(service: Arc<NavigationService>, config: &NavigationConfig) -> Self {
		Self {
			service,
			table: config.route_table(),
			login_route: config.login_route.clone(),
		}
	}

	pub fn with_table(mut self, table: RouteTable) -> Self {
		self.table = table;
		self
	}

	pub fn with_login_route(mut self, route: Option<String>) -> Self {
		self.login_route = route;
		self
	}

	pub fn service(&self) -> &Arc<NavigationService> {
		&self.service
	}

	pub fn table(&self) -> &RouteTable {
		&self.table
	}

	pub fn route_config(&self, route: &str) -> Option<&RouteDescriptor> {
		self.table.get(route)
	}

	pub fn is_valid_route(&self, route: &str) -> bool {
		self.table.is_valid_route(route)
	}

	pub fn is_bottom_tab_route(&self, route: &str) -> bool {
		self.table.is_bottom_tab_route(route)
	}

	pub fn is_modal_route(&self, route: &str) -> bool {
		self.table.is_modal_route(route)
	}

	/// Unknown routes require auth.
	pub fn requires_auth(&self, route: &str) -> bool {
		self.table.requires_auth(route)
	}

	pub fn navigation_params(&self, route: &str, params: Params) -> Params {
		self.table.navigation_params(route, params)
	}

	pub fn breadcrumbs(&self, route: &str) -> roomkeep_routes::Result<Vec<String>> {
		self.table.breadcrumbs(route)
	}

	/// Navigates to `route`, reporting success.
	///
	/// See [`Self::try_navigate_to_route`].
	pub fn navigate_to_route(&self, handle: Option<&dyn NavigatorHandle>, route: &str, params: Params, options: &NavigateOptions) -> bool {
		match self.try_navigate_to_route(handle, route, params, options) {
			Ok(()) => true,
			Err(error) => {
				tracing::warn!(route, %error, "navigate_to_route failed");
				false
			}
		}
	}

	/// Navigates to `route`.
	///
	/// Unknown routes fail before anything is dispatched. Known routes go
	/// through the service when `options.use_navigation_service` is set and
	/// the service is ready, otherwise through `handle`. `reset` and
	/// `replace` take precedence over the kind's own strategy.
	///
	/// If dispatch fails and `options.fallback_route` names a different
	/// route, the request is retried once for the fallback with the same
	/// params and no further fallback.
	pub fn try_navigate_to_route(&self, handle: Option<&dyn NavigatorHandle>, route: &str, params: Params, options: &NavigateOptions) -> Result<()> {
		let Some(descriptor) = self.table.get(route) else {
			return Err(NavigationError::InvalidRoute(route.to_string()));
		};

		let retry_params = options.fallback_route.as_ref().map(|_| params.clone());
		let error = match self.dispatch(handle, route, descriptor, params, options) {
			Ok(()) => return Ok(()),
			Err(error) => error,
		};
		if !error.is_dispatch_failure() {
			return Err(error);
		}

		match (options.fallback_route.as_deref(), retry_params) {
			(Some(fallback), Some(params)) if fallback != route => {
				tracing::warn!(route, fallback, %error, "navigation failed, trying fallback");
				self.try_navigate_to_route(handle, fallback, params, &options.without_fallback())
			}
			_ => Err(error),
		}
	}

	/// Like [`Self::navigate_to_route`], but protected routes redirect to the
	/// login route for unauthenticated callers.
	pub fn safe_navigate(&self, handle: Option<&dyn NavigatorHandle>, route: &str, params: Params, auth: &AuthState, options: &NavigateOptions) -> bool {
		match self.try_safe_navigate(handle, route, params, auth, options) {
			Ok(()) => true,
			Err(error) => {
				tracing::warn!(route, %error, "safe_navigate failed");
				false
			}
		}
	}

	/// Auth-gated navigation.
	///
	/// The redirect resets the stack to the login route so the protected
	/// screen is not left underneath it. Without a configured login route the
	/// request fails with [`NavigationError::AuthRequired`].
	pub fn try_safe_navigate(&self, handle: Option<&dyn NavigatorHandle>, route: &str, params: Params, auth: &AuthState, options: &NavigateOptions) -> Result<()> {
		if !self.table.is_valid_route(route) {
			return Err(NavigationError::InvalidRoute(route.to_string()));
		}

		if self.table.requires_auth(route) && !auth.is_authenticated {
			let Some(login) = self.login_route.as_deref() else {
				return Err(NavigationError::AuthRequired { route: route.to_string() });
			};
			tracing::info!(route, redirect = login, "authentication required, redirecting");
			let redirect = NavigateOptions::default().reset(true).use_navigation_service(options.use_navigation_service);
			return self.try_navigate_to_route(handle, login, Params::new(), &redirect);
		}

		self.try_navigate_to_route(handle, route, params, options)
	}

	fn dispatch(&self, handle: Option<&dyn NavigatorHandle>, route: &str, descriptor: &RouteDescriptor, params: Params, options: &NavigateOptions) -> Result<()> {
		let params = if options.use_navigation_service {
			let direct_params = handle.map(|_| params.clone());
			match self.dispatch_with(self.service.as_ref(), route, descriptor, params, options) {
				Err(NavigationError::NotReady { .. }) => direct_params,
				result => return result,
			}
		} else {
			Some(params)
		};
		match (handle, params) {
			(Some(handle), Some(params)) => self.dispatch_with(&DirectDispatch::new(handle), route, descriptor, params, options),
			_ => Err(NavigationError::NoDispatchPath { route: route.to_string() }),
		}
	}

	fn dispatch_with(&self, dispatcher: &dyn RouteDispatch, route: &str, descriptor: &RouteDescriptor, params: Params, options: &NavigateOptions) -> Result<()> {
		if options.reset {
			return dispatcher.reset_root(route, params);
		}
		if options.replace {
			return dispatcher.replace(route, params);
		}
		kind_handler(descriptor.kind)(dispatcher, &self.table, route, params)
	}
}
