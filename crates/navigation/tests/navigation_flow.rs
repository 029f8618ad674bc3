//! End-to-end flows across the service, classifier and root stack.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use roomkeep_navigation::routes::{AuthState, Params, ids};
use roomkeep_navigation::testing::RecordingNavigator;
use roomkeep_navigation::{HistoryAction, NavAction, NavigateOptions, NavigationConfig, NavigationService, RootStack, RouteClassifier};

fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn dashboard_request_before_mount_runs_on_attach() {
	init_tracing();
	let service = Arc::new(NavigationService::new());

	assert!(!service.navigate(ids::DASHBOARD, Params::new()));
	assert_eq!(service.debug_info().pending_actions, 1);

	service.set_navigator(Arc::new(RecordingNavigator::new()));
	let info = service.debug_info();
	assert_eq!(info.pending_actions, 0);
	assert_eq!(info.history_count, 1);
}

#[test]
fn cold_start_login_and_tab_switch() {
	init_tracing();
	let config = NavigationConfig::default();
	let service = Arc::new(NavigationService::from_config(&config));
	let classifier = RouteClassifier::from_config(Arc::clone(&service), &config);
	let root = RootStack::new(Arc::clone(&service));

	// Session restored before the container mounts.
	assert!(root.sync_auth_state(&AuthState::authenticated(), true));
	let navigator = Arc::new(RecordingNavigator::new());
	service.set_navigator(navigator.clone());

	let session = AuthState::authenticated();
	assert!(classifier.safe_navigate(None, ids::PAYMENTS, Params::new(), &session, &NavigateOptions::default()));
	assert!(classifier.safe_navigate(None, ids::ADD_PAYMENT, Params::new(), &session, &NavigateOptions::default()));
	assert!(service.go_back());

	let actions: Vec<_> = service.history(10).iter().map(|e| e.action).collect();
	assert_eq!(actions, vec![HistoryAction::GoBack, HistoryAction::Push, HistoryAction::NavigateToTab, HistoryAction::ResetRoot]);

	// Logout resets to the login screen.
	assert!(root.sync_auth_state(&AuthState::anonymous(), true));
	assert_eq!(navigator.stack(), vec![ids::LOGIN]);
	assert!(!service.can_go_back());
	assert_eq!(navigator.actions().last(), Some(&NavAction::reset_to(ids::LOGIN, Params::new())));
}

#[test]
fn anonymous_deep_link_is_redirected() {
	let service = Arc::new(NavigationService::new());
	let classifier = RouteClassifier::new(Arc::clone(&service));
	let navigator = Arc::new(RecordingNavigator::new());
	service.set_navigator(navigator.clone());

	assert!(classifier.safe_navigate(None, ids::ADD_ROOM, Params::new(), &AuthState::anonymous(), &NavigateOptions::default()));
	assert_eq!(navigator.dispatched_routes(), vec![ids::LOGIN]);
}

#[test]
fn unmount_and_remount_replays_queued_requests() {
	let service = Arc::new(NavigationService::new());
	service.set_navigator(Arc::new(RecordingNavigator::new()));
	service.detach_navigator();

	assert!(!service.push(ids::RECORD_PAYMENT, Params::new()));
	let remounted = Arc::new(RecordingNavigator::new());
	service.set_navigator(remounted.clone());
	assert_eq!(remounted.dispatched_routes(), vec![ids::RECORD_PAYMENT]);
}

#[tokio::test(start_paused = true)]
async fn notification_tap_waits_for_mount() {
	init_tracing();
	let service = Arc::new(NavigationService::new());
	let navigator = Arc::new(RecordingNavigator::new());

	let mount = {
		let service = Arc::clone(&service);
		let navigator = Arc::clone(&navigator);
		tokio::spawn(async move {
			tokio::time::sleep(Duration::from_millis(300)).await;
			service.set_navigator(navigator);
		})
	};

	let opened = service
		.execute_when_ready(|svc| svc.try_navigate(ids::NOTIFICATIONS, Params::new()), Duration::from_secs(2))
		.await;
	mount.await.unwrap();

	assert!(opened);
	assert_eq!(navigator.dispatched_routes(), vec![ids::NOTIFICATIONS]);
}

#[tokio::test(start_paused = true)]
async fn readiness_wait_gives_up_after_timeout() {
	let service = NavigationService::new();
	let started = tokio::time::Instant::now();
	assert!(!service.wait_for_ready(Duration::from_millis(500)).await);
	assert!(started.elapsed() >= Duration::from_millis(500));
	assert!(!service.is_ready());
}
