//! [`Reservation`]-related [`Database`] implementations.

use std::collections::HashSet;

use common::operations::{By, Insert, Select};
use time::Date;
use tracerr::Traced;

use crate::{
    domain::{
        slot::{BookedHours, Reservation},
        venue,
    },
    infra::{
        database::{self, memory, Memory},
        Database,
    },
};

impl Database<Select<By<BookedHours, (venue::Id, Date)>>> for Memory {
    type Ok = BookedHours;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<BookedHours, (venue::Id, Date)>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self
            .bookings
            .read()
            .await
            .get(by.as_inner())
            .cloned()
            .unwrap_or_default())
    }
}

impl Database<Insert<Reservation>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(reservation): Insert<Reservation>,
    ) -> Result<Self::Ok, Self::Err> {
        let Reservation { venue_id, date, .. } = reservation;
        let hour = reservation.hour();

        if !self
            .bookings
            .write()
            .await
            .entry((venue_id, date))
            .or_default()
            .insert(hour)
        {
            return Err(tracerr::new!(memory::Error::HourBooked(
                hour, venue_id, date,
            )))
            .map_err(tracerr::map_from);
        }
        Ok(())
    }
}

impl Database<Insert<Vec<Reservation>>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    /// Reserves all the provided [`Reservation`]s, or none of them.
    async fn execute(
        &self,
        Insert(reservations): Insert<Vec<Reservation>>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut bookings = self.bookings.write().await;

        let mut pending = HashSet::with_capacity(reservations.len());
        for r in &reservations {
            let (key, hour) = ((r.venue_id, r.date), r.hour());
            let is_booked = bookings.get(&key).is_some_and(|b| b.contains(hour));
            if is_booked || !pending.insert((key, hour)) {
                return Err(tracerr::new!(memory::Error::HourBooked(
                    hour, r.venue_id, r.date,
                )))
                .map_err(tracerr::map_from);
            }
        }

        for ((venue_id, date), hour) in pending {
            _ = bookings.entry((venue_id, date)).or_default().insert(hour);
        }
        Ok(())
    }
}

#[cfg(test)]
mod spec {
    use common::{
        operations::{By, Insert, Select},
        Handler as _,
    };
    use time::macros::date;

    use crate::{
        domain::{
            slot::{BookedHours, Reservation},
            venue,
        },
        infra::{database, memory, Memory},
    };

    fn reservation(id: venue::Id, hour: u8) -> Reservation {
        Reservation::new(id, date!(2026 - 10 - 20), hour).unwrap()
    }

    async fn booked(db: &Memory, id: venue::Id) -> BookedHours {
        db.execute(Select(By::<BookedHours, _>::new((
            id,
            date!(2026 - 10 - 20),
        ))))
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn reserves_all_hours_at_once() {
        let (db, id) = (Memory::new(), venue::Id::new());

        db.execute(Insert(vec![reservation(id, 6), reservation(id, 7)]))
            .await
            .unwrap();

        assert_eq!(booked(&db, id).await, [6, 7].into_iter().collect());
    }

    #[tokio::test]
    async fn reserves_nothing_if_any_hour_is_booked() {
        let (db, id) = (Memory::new(), venue::Id::new());
        db.execute(Insert(reservation(id, 7))).await.unwrap();

        let err = db
            .execute(Insert(vec![reservation(id, 6), reservation(id, 7)]))
            .await
            .unwrap_err();
        let err: &database::Error = err.as_ref();
        assert!(matches!(
            err,
            database::Error::Memory(memory::Error::HourBooked(7, ..)),
        ));

        assert_eq!(booked(&db, id).await, [7].into_iter().collect());
    }

    #[tokio::test]
    async fn refuses_hours_repeated_in_one_batch() {
        let (db, id) = (Memory::new(), venue::Id::new());

        let err = db
            .execute(Insert(vec![reservation(id, 9), reservation(id, 9)]))
            .await
            .unwrap_err();
        let err: &database::Error = err.as_ref();
        assert!(matches!(
            err,
            database::Error::Memory(memory::Error::HourBooked(9, ..)),
        ));

        assert_eq!(booked(&db, id).await, BookedHours::default());
    }
}
