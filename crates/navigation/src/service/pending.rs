use std::collections::VecDeque;

use chrono::Utc;
use roomkeep_routes::{NavigationTarget, Params, nest_params};

use super::history::{HistoryAction, HistoryEntry};
use crate::NavAction;

/// A navigation operation, as requested by callers.
///
/// Operations are captured in this form while no navigator is attached and
/// replayed verbatim once one is.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum NavOp {
	Navigate { route: String, params: Params },
	ResetRoot { route: String, params: Params },
	GoBack,
	Pop { count: usize },
	PopToTop,
	Replace { route: String, params: Params },
	Push { route: String, params: Params },
	NavigateNested { navigator: String, screen: String, params: Params },
	NavigateToTab(NavigationTarget),
}

impl NavOp {
	pub fn history_action(&self) -> HistoryAction {
		match self {
			Self::Navigate { .. } => HistoryAction::Navigate,
			Self::ResetRoot { .. } => HistoryAction::ResetRoot,
			Self::GoBack => HistoryAction::GoBack,
			Self::Pop { .. } => HistoryAction::Pop,
			Self::PopToTop => HistoryAction::PopToTop,
			Self::Replace { .. } => HistoryAction::Replace,
			Self::Push { .. } => HistoryAction::Push,
			Self::NavigateNested { .. } => HistoryAction::NavigateNested,
			Self::NavigateToTab(_) => HistoryAction::NavigateToTab,
		}
	}

	/// Route the caller asked for, if any.
	pub fn route(&self) -> Option<&str> {
		match self {
			Self::Navigate { route, .. } | Self::ResetRoot { route, .. } | Self::Replace { route, .. } | Self::Push { route, .. } => Some(route),
			Self::NavigateNested { screen, .. } => Some(screen),
			Self::NavigateToTab(target) => Some(&target.screen),
			Self::GoBack | Self::Pop { .. } | Self::PopToTop => None,
		}
	}

	/// Splits the operation into the action to dispatch and the history entry
	/// to record once the dispatch succeeds.
	pub fn into_dispatch(self) -> (NavAction, HistoryEntry) {
		let action = self.history_action();
		let (nav, route, params) = match self {
			Self::Navigate { route, params } => (NavAction::navigate(route.clone(), params.clone()), Some(route), params),
			Self::ResetRoot { route, params } => (NavAction::reset_to(route.clone(), params.clone()), Some(route), params),
			Self::GoBack => (NavAction::GoBack, None, Params::new()),
			Self::Pop { count } => (NavAction::Pop { count }, None, count_params(count)),
			Self::PopToTop => (NavAction::PopToTop, None, Params::new()),
			Self::Replace { route, params } => (NavAction::replace(route.clone(), params.clone()), Some(route), params),
			Self::Push { route, params } => (NavAction::push(route.clone(), params.clone()), Some(route), params),
			Self::NavigateNested { navigator, screen, params } => {
				let nested = nest_params(&[screen.as_str()], params.clone());
				(NavAction::navigate(navigator, nested), Some(screen), params)
			}
			Self::NavigateToTab(target) => (NavAction::navigate(target.route, target.params), Some(target.screen), target.screen_params),
		};
		let entry = HistoryEntry {
			timestamp: Utc::now(),
			action,
			route,
			params,
		};
		(nav, entry)
	}
}

fn count_params(count: usize) -> Params {
	let mut params = Params::new();
	params.insert("count".to_string(), serde_json::Value::from(count));
	params
}

/// FIFO of operations issued before the navigator was ready.
#[derive(Debug, Default)]
pub(crate) struct PendingQueue {
	ops: VecDeque<NavOp>,
}

impl PendingQueue {
	pub fn push(&mut self, op: NavOp) {
		self.ops.push_back(op);
	}

	/// Removes and returns the oldest operation.
	pub fn pop(&mut self) -> Option<NavOp> {
		self.ops.pop_front()
	}

	/// Queued operations, oldest first.
	pub fn iter(&self) -> impl Iterator<Item = &NavOp> {
		self.ops.iter()
	}

	pub fn len(&self) -> usize {
		self.ops.len()
	}

	pub fn clear(&mut self) -> usize {
		let dropped = self.ops.len();
		self.ops.clear();
		dropped
	}
}
