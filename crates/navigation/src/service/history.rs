use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use roomkeep_routes::Params;
use serde::Serialize;

/// Number of history entries kept when no capacity is configured.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Operation recorded in navigation history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display, strum::IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum HistoryAction {
	Navigate,
	ResetRoot,
	GoBack,
	Pop,
	PopToTop,
	Replace,
	Push,
	NavigateNested,
	NavigateToTab,
}

/// One successfully dispatched navigation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
	pub timestamp: DateTime<Utc>,
	pub action: HistoryAction,
	/// Requested route, absent for back/pop operations.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub route: Option<String>,
	pub params: Params,
}

/// Bounded log of dispatched navigations, most recent first.
#[derive(Debug)]
pub(crate) struct History {
	entries: VecDeque<HistoryEntry>,
	capacity: usize,
}

impl History {
	pub fn new(capacity: usize) -> Self {
		let capacity = capacity.max(1);
		Self {
			entries: VecDeque::with_capacity(capacity),
			capacity,
		}
	}

	/// Records an entry at the front, dropping the oldest past capacity.
	pub fn record(&mut self, entry: HistoryEntry) {
		self.entries.push_front(entry);
		self.entries.truncate(self.capacity);
	}

	/// Up to `limit` entries, most recent first.
	pub fn recent(&self, limit: usize) -> Vec<HistoryEntry> {
		self.entries.iter().take(limit).cloned().collect()
	}

	/// Most recent entry recorded for `action`.
	pub fn last_of(&self, action: HistoryAction) -> Option<&HistoryEntry> {
		self.entries.iter().find(|entry| entry.action == action)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn clear(&mut self) {
		self.entries.clear();
	}
}
