pub mod edit;
pub mod sheet;
pub mod workspace;
