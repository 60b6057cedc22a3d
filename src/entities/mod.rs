pub mod booking;
pub mod message;
pub mod ride;
pub mod user;
