//! Root stack selection driven by session state.

use std::sync::Arc;

use parking_lot::Mutex;
use roomkeep_routes::{AuthState, Params, ids};

use crate::{NavigationError, NavigationService};

/// Root route for a session.
///
/// Signed-in users land in the drawer; signed-out users see onboarding until
/// it has been completed once, then the login screen.
pub fn initial_route(auth: &AuthState, onboarding_complete: bool) -> &'static str {
	if auth.is_authenticated {
		ids::DRAWER_STACK
	} else if !onboarding_complete {
		ids::ONBOARDING
	} else {
		ids::LOGIN
	}
}

/// Keeps the root of the navigation stack in line with the session.
///
/// Each login, logout or onboarding completion resets the stack to the
/// matching root route; repeated notifications for an unchanged root are
/// ignored. A reset queued before the navigator mounts only counts as applied
/// once it has been dispatched; if it fails on replay or is dropped from the
/// queue, the next sync sends it again.
#[derive(Debug)]
pub struct RootStack {
	service: Arc<NavigationService>,
	root: Mutex<RootRecord>,
}

#[derive(Debug, Default, Clone, Copy)]
struct RootRecord {
	/// Root the navigator has accepted.
	applied: Option<&'static str>,
	/// Root reset waiting in the service queue.
	queued: Option<&'static str>,
}

impl RootStack {
	pub fn new(service: Arc<NavigationService>) -> Self {
		Self {
			service,
			root: Mutex::new(RootRecord::default()),
		}
	}

	/// Root route the navigator has accepted.
	pub fn current_root(&self) -> Option<&'static str> {
		self.settle().applied
	}

	/// Root route whose reset is still waiting for the navigator.
	pub fn pending_root(&self) -> Option<&'static str> {
		self.settle().queued
	}

	/// Resets the stack when the session calls for a different root.
	///
	/// Returns `true` when the root is already correct or the reset was
	/// dispatched or queued behind a navigator that has not mounted yet.
	pub fn sync_auth_state(&self, auth: &AuthState, onboarding_complete: bool) -> bool {
		let target = initial_route(auth, onboarding_complete);
		let record = self.settle();
		match record.queued {
			Some(queued) if queued == target => return true,
			None if record.applied == Some(target) => return true,
			_ => {}
		}

		let result = self.service.try_reset_root(target, Params::new());
		let mut root = self.root.lock();
		match result {
			Ok(()) => {
				tracing::debug!(from = ?root.applied, to = target, "root stack changed");
				root.applied = Some(target);
				root.queued = None;
				true
			}
			Err(NavigationError::Queued { .. }) => {
				tracing::debug!(from = ?root.applied, to = target, "root stack reset queued");
				root.queued = Some(target);
				true
			}
			Err(error) => {
				tracing::warn!(to = target, %error, "root stack reset failed");
				false
			}
		}
	}

	/// Resolves a queued reset against the service.
	///
	/// Still pending: kept. Replayed successfully: becomes the applied root.
	/// Failed on replay or dropped: forgotten, so the next sync resends it.
	fn settle(&self) -> RootRecord {
		let queued = self.root.lock().queued;
		let Some(queued) = queued else {
			return *self.root.lock();
		};
		let pending = self.service.is_reset_pending(queued);
		let replayed = !pending && self.service.last_reset_route().as_deref() == Some(queued);

		let mut root = self.root.lock();
		if root.queued == Some(queued) && !pending {
			root.queued = None;
			if replayed {
				root.applied = Some(queued);
			} else {
				tracing::debug!(root = queued, "queued root reset was not applied");
			}
		}
		*root
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;
	use crate::NavigatorHandle;
	use crate::testing::RecordingNavigator;

	#[rstest]
	#[case(true, false, ids::DRAWER_STACK)]
	#[case(true, true, ids::DRAWER_STACK)]
	#[case(false, false, ids::ONBOARDING)]
	#[case(false, true, ids::LOGIN)]
	fn initial_route_follows_session(#[case] signed_in: bool, #[case] onboarded: bool, #[case] expected: &str) {
		let auth = if signed_in { AuthState::authenticated() } else { AuthState::anonymous() };
		assert_eq!(initial_route(&auth, onboarded), expected);
	}

	#[test]
	fn unchanged_root_is_not_reset_twice() {
		let service = Arc::new(NavigationService::new());
		let navigator = Arc::new(RecordingNavigator::new());
		service.set_navigator(navigator.clone());
		let root = RootStack::new(Arc::clone(&service));

		assert!(root.sync_auth_state(&AuthState::anonymous(), true));
		assert!(root.sync_auth_state(&AuthState::anonymous(), true));
		assert!(root.sync_auth_state(&AuthState::authenticated(), true));
		assert_eq!(navigator.dispatched_routes(), vec![ids::LOGIN, ids::DRAWER_STACK]);
		assert_eq!(root.current_root(), Some(ids::DRAWER_STACK));
	}

	#[test]
	fn reset_before_mount_is_queued() {
		let service = Arc::new(NavigationService::new());
		let root = RootStack::new(Arc::clone(&service));

		assert!(root.sync_auth_state(&AuthState::anonymous(), false));
		assert!(root.sync_auth_state(&AuthState::anonymous(), false));
		assert_eq!(service.pending_count(), 1);
		assert_eq!(root.current_root(), None);
		assert_eq!(root.pending_root(), Some(ids::ONBOARDING));

		let navigator = Arc::new(RecordingNavigator::new());
		service.set_navigator(navigator.clone());
		assert_eq!(navigator.stack(), vec![ids::ONBOARDING]);
		assert_eq!(root.current_root(), Some(ids::ONBOARDING));
		assert_eq!(root.pending_root(), None);
	}

	#[test]
	fn queued_reset_failing_on_replay_is_resent() {
		let service = Arc::new(NavigationService::new());
		let root = RootStack::new(Arc::clone(&service));
		assert!(root.sync_auth_state(&AuthState::authenticated(), true));

		let flaky = Arc::new(RecordingNavigator::new().reject_route(ids::DRAWER_STACK));
		service.set_navigator(flaky.clone());
		assert!(flaky.stack().is_empty());
		assert_eq!(root.current_root(), None);

		let navigator = Arc::new(RecordingNavigator::new());
		service.set_navigator(navigator.clone());
		assert!(root.sync_auth_state(&AuthState::authenticated(), true));
		assert_eq!(navigator.actions(), vec![crate::NavAction::reset_to(ids::DRAWER_STACK, Params::new())]);
		assert_eq!(root.current_root(), Some(ids::DRAWER_STACK));
	}

	#[test]
	fn cleared_queued_reset_is_resent() {
		let service = Arc::new(NavigationService::new());
		let root = RootStack::new(Arc::clone(&service));
		assert!(root.sync_auth_state(&AuthState::anonymous(), true));
		assert_eq!(service.clear_pending(), 1);

		assert!(root.sync_auth_state(&AuthState::anonymous(), true));
		assert_eq!(service.pending_count(), 1);
		assert_eq!(root.pending_root(), Some(ids::LOGIN));
	}

	struct ResyncingNavigator {
		inner: RecordingNavigator,
		root: Mutex<Option<Arc<RootStack>>>,
		observed: Mutex<Vec<Option<&'static str>>>,
	}

	impl NavigatorHandle for ResyncingNavigator {
		fn dispatch(&self, action: crate::NavAction) -> Result<(), crate::DispatchError> {
			let root = self.root.lock().take();
			if let Some(root) = root {
				self.observed.lock().push(root.current_root());
				root.sync_auth_state(&AuthState::anonymous(), true);
			}
			self.inner.dispatch(action)
		}

		fn root_state(&self) -> Option<crate::NavState> {
			self.inner.root_state()
		}

		fn can_go_back(&self) -> bool {
			self.inner.can_go_back()
		}
	}

	#[test]
	fn navigator_may_call_back_into_root_stack() {
		let service = Arc::new(NavigationService::new());
		let navigator = Arc::new(ResyncingNavigator {
			inner: RecordingNavigator::new(),
			root: Mutex::new(None),
			observed: Mutex::new(Vec::new()),
		});
		service.set_navigator(navigator.clone());
		let root = Arc::new(RootStack::new(Arc::clone(&service)));
		*navigator.root.lock() = Some(Arc::clone(&root));

		assert!(root.sync_auth_state(&AuthState::anonymous(), true));
		assert_eq!(root.current_root(), Some(ids::LOGIN));
		assert_eq!(navigator.observed.lock().first().copied(), Some(None));
	}

	#[test]
	fn failed_reset_keeps_previous_root() {
		let service = Arc::new(NavigationService::new());
		service.set_navigator(Arc::new(RecordingNavigator::new().reject_route(ids::DRAWER_STACK)));
		let root = RootStack::new(Arc::clone(&service));

		assert!(root.sync_auth_state(&AuthState::anonymous(), true));
		assert!(!root.sync_auth_state(&AuthState::authenticated(), true));
		assert_eq!(root.current_root(), Some(ids::LOGIN));
	}
}
