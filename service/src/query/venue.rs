//! [`Query`] collection related to a single [`Venue`].

use common::{
    operations::{By, Select},
    Money,
};
use derive_more::{Display, Error, From};
use serde::Serialize;
use time::Date;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        slot::{self, BookedHours},
        venue, Venue,
    },
    infra::{database, Database},
    Query, Service,
};

use super::DatabaseQuery;

/// Queries a [`Venue`] by its [`venue::Id`].
pub type ById = DatabaseQuery<By<Option<Venue>, venue::Id>>;

/// [`Query`] of the hourly [`slot::DailySlots`] grid of a [`Venue`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DailySlots {
    /// ID of the [`Venue`] to build the grid for.
    pub venue_id: venue::Id,

    /// [`Date`] to build the grid for.
    pub date: Date,
}

/// Output of the [`DailySlots`] [`Query`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Output {
    /// [`Venue`] the grid is built for.
    pub venue: Venue,

    /// Hourly grid of the [`Venue`].
    #[serde(flatten)]
    pub slots: slot::DailySlots,
}

impl<Db> Query<DailySlots> for Service<Db>
where
    Db: Database<
            Select<By<Option<Venue>, venue::Id>>,
            Ok = Option<Venue>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<BookedHours, (venue::Id, Date)>>,
            Ok = BookedHours,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, query: DailySlots) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let DailySlots { venue_id, date } = query;

        let venue = self
            .database()
            .execute(Select(By::new(venue_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| tracerr::new!(E::VenueNotExists(venue_id)))?;

        let booked = self
            .database()
            .execute(Select(By::new((venue_id, date))))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let slots =
            slot::DailySlots::generate(date, base_price(&venue), &booked);

        Ok(Output { venue, slots })
    }
}

/// Returns the price every [`slot::TimeSlot`] of the [`Venue`] costs.
///
/// Unpriced [`Venue`]s are free to book.
pub(crate) fn base_price(venue: &Venue) -> Money {
    venue.hourly_price().unwrap_or_else(|| {
        log::warn!("`Venue(id: {})` has no price, slots are free", venue.id);
        Money::zero(venue.currency)
    })
}

/// Error of [`DailySlots`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Venue`] does not exist.
    #[display("`Venue(id: {_0})` does not exist")]
    #[from(ignore)]
    VenueNotExists(#[error(not(source))] venue::Id),
}
