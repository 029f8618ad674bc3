//! Route lookup table.

use std::sync::LazyLock;

use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashSet};

use crate::ids::*;
use crate::{NavigationTarget, Params, Result, RouteDescriptor, RouteError, RouteKind, nest_params};


static BUILTIN: LazyLock<RouteTable> = LazyLock::new(builtin_table);

/// Immutable mapping from route identifier to [`RouteDescriptor`].
///
/// Iteration follows insertion order, so [`Self::route_names`] lists routes
/// the way they were declared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteTable {
	routes: IndexMap<String, RouteDescriptor, FxBuildHasher>,
}

impl RouteTable {
	/// The app's builtin route table.
	pub fn builtin() -> &'static RouteTable {
		&BUILTIN
	}

	/// Builds a table from `(route, descriptor)` pairs. Later entries replace
	/// earlier ones with the same name.
	pub fn from_entries<I, S>(entries: I) -> Self
	where
		I: IntoIterator<Item = (S, RouteDescriptor)>,
		S: Into<String>,
	{
		let mut routes = IndexMap::default();
		for (name, descriptor) in entries {
			routes.insert(name.into(), descriptor);
		}
		Self { routes }
	}

	/// Returns a copy of this table with `entries` added or replaced.
	pub fn with_overrides<I, S>(&self, entries: I) -> Self
	where
		I: IntoIterator<Item = (S, RouteDescriptor)>,
		S: Into<String>,
	{
		let mut table = self.clone();
		for (name, descriptor) in entries {
			table.routes.insert(name.into(), descriptor);
		}
		table
	}

	/// Descriptor for `route`, or `None` when the route is not recognized.
	pub fn get(&self, route: &str) -> Option<&RouteDescriptor> {
		self.routes.get(route)
	}

	pub fn kind(&self, route: &str) -> Option<RouteKind> {
		self.get(route).map(|d| d.kind)
	}

	/// Whether `route` is one of the known routes.
	pub fn is_valid_route(&self, route: &str) -> bool {
		self.routes.contains_key(route)
	}

	pub fn is_bottom_tab_route(&self, route: &str) -> bool {
		self.kind(route) == Some(RouteKind::BottomTab)
	}

	pub fn is_modal_route(&self, route: &str) -> bool {
		self.kind(route) == Some(RouteKind::Modal)
	}

	pub fn is_drawer_route(&self, route: &str) -> bool {
		self.kind(route) == Some(RouteKind::Drawer)
	}

	/// Whether `route` needs an authenticated session.
	///
	/// Unknown routes are treated as protected.
	pub fn requires_auth(&self, route: &str) -> bool {
		self.get(route).is_none_or(|d| d.requires_auth)
	}

	/// Display title, falling back to the route name.
	pub fn title<'a>(&'a self, route: &'a str) -> Option<&'a str> {
		let descriptor = self.get(route)?;
		Some(descriptor.title.as_deref().unwrap_or(route))
	}

	/// Known route names in declaration order.
	pub fn route_names(&self) -> impl Iterator<Item = &str> {
		self.routes.keys().map(String::as_str)
	}

	/// Routes of the given kind in declaration order.
	pub fn routes_of_kind(&self, kind: RouteKind) -> impl Iterator<Item = &str> {
		self.routes.iter().filter(move |(_, d)| d.kind == kind).map(|(name, _)| name.as_str())
	}

	pub fn len(&self) -> usize {
		self.routes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.routes.is_empty()
	}

	/// Ancestor chain of `route`, outermost first and `route` itself last.
	///
	/// A parent that is not in the table ends the chain at that name. A chain
	/// that revisits a route fails with [`RouteError::ParentCycle`].
	pub fn breadcrumbs(&self, route: &str) -> Result<Vec<String>> {
		let mut descriptor = self.get(route).ok_or_else(|| RouteError::UnknownRoute(route.to_string()))?;
		let mut chain = vec![route.to_string()];
		let mut seen: FxHashSet<&str> = FxHashSet::default();
		seen.insert(route);

		while let Some(parent) = descriptor.parent.as_deref() {
			if !seen.insert(parent) {
				return Err(RouteError::ParentCycle {
					route: route.to_string(),
					at: parent.to_string(),
				});
			}
			chain.push(parent.to_string());
			match self.get(parent) {
				Some(next) => descriptor = next,
				None => break,
			}
		}

		chain.reverse();
		Ok(chain)
	}

	/// Resolves where a request for `route` must be sent.
	///
	/// Bottom-tab screens cannot be addressed by name from the root stack, so
	/// their params are nested along the ancestor chain and the request is
	/// sent to the outermost ancestor. Other kinds are addressed directly.
	pub fn navigation_target(&self, route: &str, params: Params) -> Result<NavigationTarget> {
		let descriptor = self.get(route).ok_or_else(|| RouteError::UnknownRoute(route.to_string()))?;
		if descriptor.kind != RouteKind::BottomTab {
			return Ok(NavigationTarget::direct(route, params));
		}

		let chain = self.breadcrumbs(route)?;
		let Some((root, screens)) = chain.split_first() else {
			return Ok(NavigationTarget::direct(route, params));
		};
		Ok(NavigationTarget {
			route: root.clone(),
			params: nest_params(screens, params.clone()),
			screen: route.to_string(),
			screen_params: params,
		})
	}

	/// Params to send alongside a request for `route`.
	///
	/// Only bottom-tab routes are reshaped; see [`Self::navigation_target`].
	pub fn navigation_params(&self, route: &str, params: Params) -> Params {
		if !self.is_bottom_tab_route(route) {
			return params;
		}
		match self.breadcrumbs(route) {
			Ok(chain) => nest_params(&chain[1..], params),
			Err(error) => {
				tracing::warn!(route, %error, "cannot nest bottom tab params");
				params
			}
		}
	}
}

fn builtin_table() -> RouteTable {
	use RouteKind::*;

	RouteTable::from_entries([
		(ONBOARDING, RouteDescriptor::new(Stack).public().title("Welcome")),
		(LOGIN, RouteDescriptor::new(Stack).public().title("Sign In")),
		(REGISTER, RouteDescriptor::new(Stack).public().title("Create Account")),
		(FORGOT_PASSWORD, RouteDescriptor::new(Stack).public().title("Reset Password")),
		(DRAWER_STACK, RouteDescriptor::new(Stack)),
		(BOTTOM_NAVIGATION, RouteDescriptor::new(Drawer).parent(DRAWER_STACK).title("Home")),
		(DASHBOARD, RouteDescriptor::new(BottomTab).parent(BOTTOM_NAVIGATION)),
		(ROOMS, RouteDescriptor::new(BottomTab).parent(BOTTOM_NAVIGATION)),
		(TENANTS, RouteDescriptor::new(BottomTab).parent(BOTTOM_NAVIGATION)),
		(PAYMENTS, RouteDescriptor::new(BottomTab).parent(BOTTOM_NAVIGATION)),
		(PROFILE, RouteDescriptor::new(BottomTab).parent(BOTTOM_NAVIGATION)),
		(ROOM_DETAILS, RouteDescriptor::new(Stack).parent(ROOMS).title("Room Details")),
		(EDIT_ROOM, RouteDescriptor::new(Stack).parent(ROOM_DETAILS).title("Edit Room")),
		(TENANT_DETAILS, RouteDescriptor::new(Stack).parent(TENANTS).title("Tenant Details")),
		(EDIT_TENANT, RouteDescriptor::new(Stack).parent(TENANT_DETAILS).title("Edit Tenant")),
		(PAYMENT_DETAILS, RouteDescriptor::new(Stack).parent(PAYMENTS).title("Payment Details")),
		(PAYMENT_HISTORY, RouteDescriptor::new(Stack).parent(PAYMENTS).title("Payment History")),
		(ADD_ROOM, RouteDescriptor::new(Modal).parent(ROOMS).title("Add Room")),
		(ADD_TENANT, RouteDescriptor::new(Modal).parent(TENANTS).title("Add Tenant")),
		(ADD_PAYMENT, RouteDescriptor::new(Modal).parent(PAYMENTS).title("Add Payment")),
		(RECORD_PAYMENT, RouteDescriptor::new(Modal).parent(PAYMENT_DETAILS).title("Record Payment")),
		(SETTINGS, RouteDescriptor::new(Drawer).parent(DRAWER_STACK)),
		(NOTIFICATIONS, RouteDescriptor::new(Drawer).parent(DRAWER_STACK)),
		(REPORTS, RouteDescriptor::new(Drawer).parent(DRAWER_STACK)),
		(HELP, RouteDescriptor::new(Drawer).parent(DRAWER_STACK).public()),
	])
}
