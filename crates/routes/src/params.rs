use serde::Serialize;
use serde_json::{Map, Value};

/// Route parameters as the navigation framework passes them.
pub type Params = Map<String, Value>;

/// A resolved dispatch target: the route the root navigator must be asked
/// for, and the (possibly nested) params that address the final screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationTarget {
	/// Route handed to the root navigator.
	pub route: String,
	/// Params for `route`, nested when the screen lives in child navigators.
	pub params: Params,
	/// Screen the caller asked for.
	pub screen: String,
	/// Params the caller passed for `screen`, before any nesting.
	pub screen_params: Params,
}

impl NavigationTarget {
	/// Target addressing `route` directly.
	pub fn direct(route: impl Into<String>, params: Params) -> Self {
		let route = route.into();
		Self {
			screen: route.clone(),
			route,
			screen_params: params.clone(),
			params,
		}
	}

	/// Whether the target goes through one or more child navigators.
	pub fn is_nested(&self) -> bool {
		self.route != self.screen
	}
}

/// Wraps `params` in the `{ screen, params }` shape for each navigator in
/// `screens`, outermost first.
///
/// `nest_params(&["BottomNavigation", "Rooms"], p)` yields
/// `{ screen: "BottomNavigation", params: { screen: "Rooms", params: p } }`,
/// which addresses `Rooms` when sent to the navigator enclosing
/// `BottomNavigation`.
pub fn nest_params<S: AsRef<str>>(screens: &[S], params: Params) -> Params {
	screens.iter().rev().fold(params, |inner, screen| {
		let mut outer = Map::with_capacity(2);
		outer.insert("screen".to_string(), Value::String(screen.as_ref().to_string()));
		outer.insert("params".to_string(), Value::Object(inner));
		outer
	})
}
