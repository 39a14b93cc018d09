//! Chat dashboard (MVVM)
//!
//! - view_model.rs: derived signals over the session store
//! - view.rs: ChatDashboard component

mod view;
mod view_model;

pub use view::ChatDashboard;
pub use view_model::ChatDashboardVm;
