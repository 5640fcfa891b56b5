pub mod identity;
pub mod session_store;
pub mod sheet_client;
