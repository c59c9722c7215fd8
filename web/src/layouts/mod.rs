mod admin;
pub use admin::AdminLayout;

mod auth;
pub use auth::AuthLayout;

mod shell;
pub use shell::DashboardShell;

mod user;
pub use user::UserLayout;
