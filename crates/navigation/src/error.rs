use std::time::Duration;

use roomkeep_routes::RouteError;
use thiserror::Error;

use crate::DispatchError;

/// Why a navigation request did not complete.
///
/// None of these cross the boolean operations of [`crate::NavigationService`]
/// or [`crate::RouteClassifier`]; they surface only through the `try_*`
/// variants and in logs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NavigationError {
	/// No navigator is attached yet; the request was queued.
	#[error("navigator not ready, queued {action}")]
	Queued {
		/// Operation that was queued.
		action: &'static str,
	},

	/// No navigator is ready and the request was not queued.
	#[error("navigator not ready for {action}")]
	NotReady {
		/// Operation that was refused.
		action: &'static str,
	},

	/// The navigator failed the action.
	#[error("{action} to {} failed: {source}", .route.as_deref().unwrap_or("<current>"))]
	Dispatch {
		/// Operation being dispatched.
		action: &'static str,
		/// Target route, when the operation has one.
		route: Option<String>,
		#[source]
		source: DispatchError,
	},

	/// The route is not in the route table.
	#[error("invalid route: {0}")]
	InvalidRoute(String),

	/// The route needs a session and no login route is configured.
	#[error("route {route} requires authentication")]
	AuthRequired {
		/// Requested route.
		route: String,
	},

	/// Neither the service nor a direct handle could take the request.
	#[error("no navigator available for {route}")]
	NoDispatchPath {
		/// Requested route.
		route: String,
	},

	/// Readiness was not observed before the deadline.
	#[error("navigator not ready after {0:?}")]
	ReadinessTimeout(Duration),

	/// A deferred action failed after readiness.
	#[error("deferred action failed: {0}")]
	Action(String),

	#[error(transparent)]
	Route(#[from] RouteError),
}

impl NavigationError {
	/// Whether the error came out of the dispatch attempt itself, as opposed
	/// to validation or missing navigators.
	pub fn is_dispatch_failure(&self) -> bool {
		matches!(self, Self::Dispatch { .. } | Self::Route(_))
	}
}

/// Result type for navigation operations.
pub type Result<T> = std::result::Result<T, NavigationError>;
