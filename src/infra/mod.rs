pub mod export;
pub mod firebase;
pub mod session_store;
pub mod sheets;
