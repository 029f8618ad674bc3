use serde::{Deserialize, Serialize};

use crate::RouteKind;

/// Static metadata for one route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDescriptor {
	/// Dispatch classification.
	pub kind: RouteKind,
	/// Whether the route is only reachable while authenticated.
	#[serde(default = "default_requires_auth")]
	pub requires_auth: bool,
	/// Enclosing navigator route, if the route is nested.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub parent: Option<String>,
	/// Human readable screen title.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
}

fn default_requires_auth() -> bool {
	true
}

impl RouteDescriptor {
	/// Creates a protected descriptor with no parent.
	pub fn new(kind: RouteKind) -> Self {
		Self {
			kind,
			requires_auth: true,
			parent: None,
			title: None,
		}
	}

	/// Marks the route as reachable without authentication.
	pub fn public(mut self) -> Self {
		self.requires_auth = false;
		self
	}

	pub fn parent(mut self, parent: impl Into<String>) -> Self {
		self.parent = Some(parent.into());
		self
	}

	pub fn title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}
}
