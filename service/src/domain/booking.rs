//! Booking [`Request`] handed off to the payment stage.

use common::Money;
use derive_more::{Display, Error as StdError, From};
use serde::Serialize;

use crate::domain::{
    slot::{DateSelection, InvalidSelection, Selection, TimeSlot},
    venue, Venue,
};

/// Booking of one or more [`TimeSlot`]s of a [`Venue`], ready to be paid.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// ID of the booked [`Venue`].
    pub venue_id: venue::Id,

    /// Name of the booked [`Venue`].
    pub venue_name: venue::Name,

    /// Total price of the booked [`TimeSlot`]s.
    pub total_price: Money,

    /// Human-readable description of the booked dates.
    pub date_description: String,

    /// Labels of the booked [`TimeSlot`]s in chronological order.
    pub slot_time_labels: Vec<String>,
}

impl Request {
    /// Builds a new [`Request`] for the `selection` of `slots` at the `venue`.
    ///
    /// A range of `dates` is priced as a single day.
    ///
    /// # Errors
    ///
    /// - If nothing is selected.
    /// - If any of the selected slots can't be booked.
    pub fn new(
        venue: &Venue,
        dates: DateSelection,
        slots: &[TimeSlot],
        selection: &Selection,
    ) -> Result<Self, Error> {
        if selection.is_empty() {
            return Err(Error::EmptySelection);
        }
        selection.validate(slots)?;

        Ok(Self {
            venue_id: venue.id,
            venue_name: venue.name.clone(),
            total_price: selection.total(slots),
            date_description: dates.describe(),
            slot_time_labels: selection
                .slots(slots)
                .map(TimeSlot::label)
                .collect(),
        })
    }
}

/// Error of building a [`Request`].
#[derive(Clone, Copy, Debug, Display, From, PartialEq, StdError)]
pub enum Error {
    /// No [`TimeSlot`] is selected.
    #[display("No time slot is selected")]
    #[from(ignore)]
    EmptySelection,

    /// Selected [`TimeSlot`] can't be booked.
    #[display("Invalid selection: {_0}")]
    InvalidSelection(InvalidSelection),
}
