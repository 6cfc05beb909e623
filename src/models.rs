pub mod booking;
pub mod dashboard;
