pub mod dates;
pub mod entities;
pub mod format;
pub mod roles;
pub mod status;
pub mod view;
