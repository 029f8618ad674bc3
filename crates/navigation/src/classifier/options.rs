/// Per-request options for [`super::RouteClassifier::navigate_to_route`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigateOptions {
	/// Replace the whole stack with the route.
	pub reset: bool,
	/// Replace the focused screen with the route.
	pub replace: bool,
	/// Prefer the shared service over a directly supplied handle.
	pub use_navigation_service: bool,
	/// Route to try once if dispatching the requested route fails.
	pub fallback_route: Option<String>,
}

impl Default for NavigateOptions {
	fn default() -> Self {
		Self {
			reset: false,
			replace: false,
			use_navigation_service: true,
			fallback_route: None,
		}
	}
}

impl NavigateOptions {
	pub fn reset(mut self, reset: bool) -> Self {
		self.reset = reset;
		self
	}

	pub fn replace(mut self, replace: bool) -> Self {
		self.replace = replace;
		self
	}

	pub fn use_navigation_service(mut self, enabled: bool) -> Self {
		self.use_navigation_service = enabled;
		self
	}

	pub fn fallback_route(mut self, route: impl Into<String>) -> Self {
		self.fallback_route = Some(route.into());
		self
	}

	/// Same options with the fallback cleared, used for the retry itself.
	pub(crate) fn without_fallback(&self) -> Self {
		Self {
			fallback_route: None,
			..self.clone()
		}
	}
}
