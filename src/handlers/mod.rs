pub mod auth;
pub mod booking;
pub mod message;
pub mod ride;
