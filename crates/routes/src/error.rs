use thiserror::Error;

/// Errors raised while resolving route metadata.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
	/// The route is not present in the table.
	#[error("unknown route: {0}")]
	UnknownRoute(String),

	/// Following `parent` links from `route` revisited `at`.
	#[error("parent cycle while resolving {route}: {at} reached twice")]
	ParentCycle {
		/// Route the walk started from.
		route: String,
		/// First route seen a second time.
		at: String,
	},
}

/// Result type for route table operations.
pub type Result<T> = std::result::Result<T, RouteError>;
