//! [`Command`] for confirming a booking of [`Venue`] time slots.

use common::operations::{By, Insert, Select};
use derive_more::{Display, Error, From};
use time::Date;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        booking,
        slot::{self, BookedHours, DateSelection, Reservation, Selection},
        venue, Venue,
    },
    infra::{database, Database},
    query::venue::base_price,
    Service,
};

use super::Command;

/// [`Command`] for confirming a booking of [`Venue`] time slots.
///
/// The selected hours of the first selected day are reserved, and the
/// [`booking::Request`] to be paid is returned.
#[derive(Clone, Debug)]
pub struct ConfirmBooking {
    /// ID of the [`Venue`] to book.
    pub venue_id: venue::Id,

    /// [`DateSelection`] to book.
    pub dates: DateSelection,

    /// [`Selection`] of the daily slots to book.
    pub selection: Selection,
}

impl<Db> Command<ConfirmBooking> for Service<Db>
where
    Db: Database<
            Select<By<Option<Venue>, venue::Id>>,
            Ok = Option<Venue>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<BookedHours, (venue::Id, Date)>>,
            Ok = BookedHours,
            Err = Traced<database::Error>,
        > + Database<Insert<Vec<Reservation>>, Err = Traced<database::Error>>,
{
    type Ok = booking::Request;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: ConfirmBooking,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ConfirmBooking {
            venue_id,
            dates,
            selection,
        } = cmd;
        let date = dates.first_day();

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
        let day = slot::DailySlots::generate(date, base_price(&venue), &booked);

        let request = booking::Request::new(&venue, dates, &day.slots, &selection)
            .map_err(tracerr::from_and_wrap!(=> E))?;

        let reservations = selection
            .slots(&day.slots)
            .map(|s| {
                Reservation::new(venue_id, date, s.start)
                    .ok_or_else(|| tracerr::new!(E::HourOutOfDay(s.start)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.database()
            .execute(Insert(reservations))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::info!(
            "booked {} slot(s) of `Venue(id: {venue_id})` on {date} for {}",
            request.slot_time_labels.len(),
            request.total_price,
        );

        Ok(request)
    }
}

/// Error of [`ConfirmBooking`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`booking::Request`] can't be built.
    #[display("Cannot book: {_0}")]
    Booking(booking::Error),

    /// [`Venue`] does not exist.
    #[display("`Venue(id: {_0})` does not exist")]
    #[from(ignore)]
    VenueNotExists(#[error(not(source))] venue::Id),

    /// Selected slot doesn't start within a day.
    #[display("`{_0}` is not an hour of a day")]
    #[from(ignore)]
    HourOutOfDay(#[error(not(source))] slot::Hour),
}
