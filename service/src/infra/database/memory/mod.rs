//! In-memory [`Database`] implementation.

mod impls;

use std::{collections::HashMap, sync::Arc};

use derive_more::{Display, Error as StdError};
use time::Date;
use tokio::sync::RwLock;

use crate::domain::{
    slot::{BookedHours, Hour},
    venue, Venue,
};
#[cfg(doc)]
use crate::infra::Database;

/// In-memory [`Database`] client.
///
/// Clones share the same storage.
#[derive(Clone, Debug, Default)]
pub struct Memory {
    /// Stored [`Venue`]s in the order of insertion.
    venues: Arc<RwLock<Vec<Venue>>>,

    /// [`BookedHours`] of [`Venue`]s by dates.
    bookings: Arc<RwLock<HashMap<(venue::Id, Date), BookedHours>>>,
}

impl Memory {
    /// Creates a new empty [`Memory`] client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// In-memory database [`Error`].
#[derive(Clone, Copy, Debug, Display, StdError)]
pub enum Error {
    /// [`Venue`] with the same ID is stored already.
    #[display("`Venue(id: {_0})` already exists")]
    VenueExists(#[error(not(source))] venue::Id),

    /// [`Hour`] of a [`Venue`] is booked already.
    #[display("`{_0:02}:00` of `Venue(id: {_1})` on {_2} is booked already")]
    HourBooked(Hour, venue::Id, Date),
}
