//! Route metadata for the roomkeep navigation tree.
//!
//! Every screen the app can address has a [`RouteDescriptor`] in a
//! [`RouteTable`]. The descriptor decides how a navigation request is
//! dispatched (see [`RouteKind`]) and whether it is gated behind
//! authentication. The table is immutable once built; the builtin table is
//! shared process-wide through [`RouteTable::builtin`].

mod auth;
mod descriptor;
mod error;
pub mod ids;
mod kind;
mod params;
mod table;

pub use auth::AuthState;
pub use descriptor::RouteDescriptor;
pub use error::{Result, RouteError};
pub use kind::RouteKind;
pub use params::{NavigationTarget, Params, nest_params};
pub use table::RouteTable;
