pub mod booking_repo;
pub use booking_repo::{AppointmentAction, BookingRepository, HttpBookingRepository};
