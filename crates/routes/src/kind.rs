use serde::{Deserialize, Serialize};

/// Where a route lives in the navigation tree.
///
/// The kind selects the dispatch strategy: bottom-tab screens must be
/// addressed through their drawer and tab containers, modals are pushed on
/// top of the current stack, and everything else is a plain navigate.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString, strum::EnumIter, strum::IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RouteKind {
	/// Screen hosted by the bottom tab navigator.
	BottomTab,
	/// Screen on a stack navigator.
	Stack,
	/// Screen presented modally over the current stack.
	Modal,
	/// Screen hosted by the drawer navigator.
	Drawer,
}
