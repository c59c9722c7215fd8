//! Components shared by every page of the dashboard.

mod feedback;
mod form;
mod modal;
mod nav;
mod table;
mod toast;

pub use feedback::{ErrorBanner, Loading};
pub use form::{FieldInput, FilterBar, FormDialog};
pub use modal::{ConfirmDialog, Modal};
pub use nav::NavContent;
pub use table::Pagination;
pub use toast::{ToastHost, Toasts, use_toast_provider, use_toasts};
