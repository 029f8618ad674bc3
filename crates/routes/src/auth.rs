use serde::{Deserialize, Serialize};

/// Snapshot of the session owned by the auth collaborator.
///
/// Navigation only reads this; it never mutates session state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthState {
	pub is_authenticated: bool,
	#[serde(default)]
	pub permissions: Vec<String>,
}

impl AuthState {
	/// Signed-out session.
	pub fn anonymous() -> Self {
		Self::default()
	}

	/// Signed-in session without extra permissions.
	pub fn authenticated() -> Self {
		Self {
			is_authenticated: true,
			permissions: Vec::new(),
		}
	}
}
