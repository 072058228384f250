//! Domain definitions.

pub mod booking;
pub mod slot;
pub mod user;
pub mod venue;

pub use self::{
    slot::{DailySlots, DateSelection, Selection, TimeSlot},
    user::Role,
    venue::Venue,
};
