pub mod booking;
pub mod conflict;
pub mod message;
pub mod ride;
