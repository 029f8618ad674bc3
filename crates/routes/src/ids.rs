//! Route identifiers shared between the route table and call sites.
//!
//! Identifiers are plain string constants: the navigation framework addresses
//! screens by name, and configuration may introduce routes these constants do
//! not cover.

// Root stack, unauthenticated.
pub const ONBOARDING: &str = "Onboarding";
pub const LOGIN: &str = "Login";
pub const REGISTER: &str = "Register";
pub const FORGOT_PASSWORD: &str = "ForgotPassword";

// Containers.
pub const DRAWER_STACK: &str = "DrawerStack";
pub const BOTTOM_NAVIGATION: &str = "BottomNavigation";

// Bottom tabs.
pub const DASHBOARD: &str = "Dashboard";
pub const ROOMS: &str = "Rooms";
pub const TENANTS: &str = "Tenants";
pub const PAYMENTS: &str = "Payments";
pub const PROFILE: &str = "Profile";

// Stack screens.
pub const ROOM_DETAILS: &str = "RoomDetails";
pub const EDIT_ROOM: &str = "EditRoom";
pub const TENANT_DETAILS: &str = "TenantDetails";
pub const EDIT_TENANT: &str = "EditTenant";
pub const PAYMENT_DETAILS: &str = "PaymentDetails";
pub const PAYMENT_HISTORY: &str = "PaymentHistory";

// Modals.
pub const ADD_ROOM: &str = "AddRoom";
pub const ADD_TENANT: &str = "AddTenant";
pub const ADD_PAYMENT: &str = "AddPayment";
pub const RECORD_PAYMENT: &str = "RecordPayment";

// Drawer screens.
pub const SETTINGS: &str = "Settings";
pub const NOTIFICATIONS: &str = "Notifications";
pub const REPORTS: &str = "Reports";
pub const HELP: &str = "Help";
