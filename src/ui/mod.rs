pub mod dashboard;
pub mod dialogs;
pub mod edit_modal;
pub mod guard;
pub mod login;
pub mod session;
pub mod state;
