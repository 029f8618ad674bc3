//! Navigation configuration.
//!
//! Loaded from TOML; every field has a default so an empty document is a
//! valid configuration.
//!
//! ```toml
//! history_capacity = 50
//! ready_timeout_ms = 5000
//! login_route = "Login"
//!
//! [[routes]]
//! name = "Maintenance"
//! kind = "stack"
//! parent = "RoomDetails"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use roomkeep_routes::{RouteDescriptor, RouteError, RouteTable, ids};
use serde::Deserialize;
use thiserror::Error;

use crate::service::DEFAULT_HISTORY_CAPACITY;


/// Default deadline for [`crate::NavigationService::wait_for_ready`] callers.
pub const DEFAULT_READY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Errors that can occur when loading navigation configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or shape.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// History must keep at least one entry.
	#[error("history_capacity must be at least 1")]
	ZeroHistoryCapacity,

	/// The login route is not a known route.
	#[error("login route {0} is not a known route")]
	UnknownLoginRoute(String),

	/// The resulting route table is malformed.
	#[error("invalid route table: {0}")]
	Routes(#[from] RouteError),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Additional or replacement route declared in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RouteEntry {
	pub name: String,
	#[serde(flatten)]
	pub descriptor: RouteDescriptor,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigationConfig {
	/// Maximum number of history entries kept.
	pub history_capacity: usize,
	/// Deadline used by callers that wait for the navigator to mount.
	pub ready_timeout_ms: u64,
	/// Where unauthenticated requests for protected routes are sent. `None`
	/// disables the redirect and such requests fail.
	pub login_route: Option<String>,
	/// Routes layered over the builtin table.
	pub routes: Vec<RouteEntry>,
}

impl Default for NavigationConfig {
	fn default() -> Self {
		Self {
			history_capacity: DEFAULT_HISTORY_CAPACITY,
			ready_timeout_ms: DEFAULT_READY_TIMEOUT.as_millis() as u64,
			login_route: Some(ids::LOGIN.to_string()),
			routes: Vec::new(),
		}
	}
}

impl NavigationConfig {
	/// Parses and validates a TOML document.
	pub fn from_toml_str(input: &str) -> Result<Self> {
		let config: Self = toml::from_str(input)?;
		config.validate()?;
		Ok(config)
	}

	/// Reads, parses and validates a TOML file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let input = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		let config = Self::from_toml_str(&input)?;
		tracing::debug!(path = %path.display(), routes = config.routes.len(), "loaded navigation config");
		Ok(config)
	}

	/// Checks capacity, the login route and the route table's parent graph.
	pub fn validate(&self) -> Result<()> {
		if self.history_capacity == 0 {
			return Err(ConfigError::ZeroHistoryCapacity);
		}

		let table = self.route_table();
		if let Some(login) = self.login_route.as_deref()
			&& !table.is_valid_route(login)
		{
			return Err(ConfigError::UnknownLoginRoute(login.to_string()));
		}
		for route in table.route_names() {
			table.breadcrumbs(route)?;
		}
		Ok(())
	}

	pub fn ready_timeout(&self) -> Duration {
		Duration::from_millis(self.ready_timeout_ms)
	}

	/// Builtin routes with the configured entries layered on top.
	pub fn route_table(&self) -> RouteTable {
		if self.routes.is_empty() {
			return RouteTable::builtin().clone();
		}
		RouteTable::builtin().with_overrides(self.routes.iter().map(|entry| (entry.name.clone(), entry.descriptor.clone())))
	}
}
