pub mod auth;
pub mod dashboard;
pub mod preview;
pub mod quiz;
pub mod upload;
