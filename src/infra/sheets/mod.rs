pub mod client;
pub mod service_account;
