pub mod attendance;
pub mod auth;
pub mod classes;
pub mod dashboard;
pub mod members;
pub mod packages;
pub mod payments;
pub mod root;
pub mod trainers;
