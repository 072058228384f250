//! Venue [`Catalog`] loading.

use std::{fs, io, path::Path};

use common::operations::Insert;
use derive_more::{Display, Error, From};
use serde::Deserialize;
use service::{
    domain::{
        slot::{Hour, Reservation},
        venue, Venue,
    },
    infra::{database, Database as _, Memory},
};
use time::Date;
use tracerr::Traced;
use tracing as log;

/// Venues with their bookings, as stored in a JSON file.
///
/// A bare array of venues is accepted too.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(from = "Format")]
pub struct Catalog {
    /// Listed and unlisted [`Venue`]s.
    pub venues: Vec<Venue>,

    /// Already booked hours of [`Venue`]s.
    pub bookings: Vec<Booking>,
}

/// Booked hours of a [`Venue`] on a [`Date`].
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// ID of the booked [`Venue`].
    pub venue_id: venue::Id,

    /// Booked [`Date`].
    pub date: Date,

    /// Booked hours.
    pub hours: Vec<Hour>,
}

/// Supported layouts of a [`Catalog`] file.
///
/// [`Venue`]s are kept raw to be read one by one.
#[derive(Deserialize)]
#[serde(untagged)]
enum Format {
    Venues(Vec<serde_json::Value>),
    Full {
        venues: Vec<serde_json::Value>,
        #[serde(default)]
        bookings: Vec<Booking>,
    },
}

impl From<Format> for Catalog {
    fn from(f: Format) -> Self {
        let (venues, bookings) = match f {
            Format::Venues(venues) => (venues, vec![]),
            Format::Full { venues, bookings } => (venues, bookings),
        };
        Self {
            venues: venues
                .into_iter()
                .enumerate()
                .filter_map(|(i, json)| {
                    serde_json::from_value(json)
                        .map_err(|e| {
                            log::warn!("skipping malformed venue #{i}: {e}");
                        })
                        .ok()
                })
                .collect(),
            bookings,
        }
    }
}

impl Catalog {
    /// Reads a [`Catalog`] from the JSON file at the provided `path`.
    ///
    /// A missing file is an empty [`Catalog`].
    ///
    /// # Errors
    ///
    /// Errors if the file cannot be read or isn't a valid [`Catalog`].
    pub fn read(path: impl AsRef<Path>) -> Result<Self, Traced<LoadError>> {
        let path = path.as_ref();
        let json = match fs::read(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::warn!(
                    "`{}` doesn't exist, catalog is empty",
                    path.display(),
                );
                return Ok(Self::default());
            }
            Err(e) => return Err(tracerr::new!(LoadError::Io(e))),
        };
        serde_json::from_slice(&json)
            .map_err(tracerr::from_and_wrap!(=> LoadError))
    }

    /// Stores this [`Catalog`] into the provided [`Memory`] database.
    ///
    /// # Errors
    ///
    /// Errors if a [`Venue`] is duplicated, an hour is booked twice or isn't
    /// an hour of a day.
    pub async fn store(self, db: &Memory) -> Result<(), Traced<LoadError>> {
        let Self { venues, bookings } = self;
        let (venues_count, bookings_count) = (venues.len(), bookings.len());

        for v in venues {
            db.execute(Insert(v))
                .await
                .map_err(tracerr::map_from_and_wrap!())?;
        }
        for Booking {
            venue_id,
            date,
            hours,
        } in bookings
        {
            for hour in hours {
                let reservation = Reservation::new(venue_id, date, hour)
                    .ok_or_else(|| tracerr::new!(LoadError::NotAnHour(hour)))?;
                db.execute(Insert(reservation))
                    .await
                    .map_err(tracerr::map_from_and_wrap!())?;
            }
        }

        log::debug!(
            "loaded {venues_count} venue(s) and {bookings_count} booking(s)",
        );
        Ok(())
    }

    /// Loads a [`Catalog`] from the JSON file at the provided `path` into a
    /// new [`Memory`] database.
    ///
    /// # Errors
    ///
    /// See [`Catalog::read()`] and [`Catalog::store()`].
    pub async fn load(
        path: impl AsRef<Path>,
    ) -> Result<Memory, Traced<LoadError>> {
        let db = Memory::new();
        Self::read(path)
            .map_err(tracerr::wrap!())?
            .store(&db)
            .await
            .map_err(tracerr::wrap!())?;
        Ok(db)
    }
}

/// Error of loading a [`Catalog`].
#[derive(Debug, Display, Error, From)]
pub enum LoadError {
    /// Catalog file cannot be read.
    #[display("Cannot read catalog: {_0}")]
    Io(io::Error),

    /// Catalog file is not a valid JSON [`Catalog`].
    #[display("Malformed catalog: {_0}")]
    Json(serde_json::Error),

    /// [`Database`] error.
    ///
    /// [`Database`]: service::infra::Database
    #[display("Cannot store catalog: {_0}")]
    Db(database::Error),

    /// Booked hour is not an hour of a day.
    #[display("`{_0}` is not an hour of a day")]
    #[from(ignore)]
    NotAnHour(#[error(not(source))] Hour),
}

#[cfg(test)]
mod spec {
    use common::{
        operations::{By, Select},
        Handler as _,
    };
    use service::{
        domain::{slot::BookedHours, venue, Venue},
        infra::Memory,
    };
    use time::macros::date;

    use super::{Catalog, LoadError};

    const VENUE_ID: &str = "7b0e4c1e-4f61-4a43-9d3c-2f4f1a9f3b10";

    #[test]
    fn reads_bare_venue_arrays() {
        let catalog: Catalog = serde_json::from_str(&format!(
            r#"[{{"id": "{VENUE_ID}", "name": "Green Field Arena"}}]"#,
        ))
        .unwrap();

        assert_eq!(catalog.venues.len(), 1);
        assert!(catalog.bookings.is_empty());
    }

    #[test]
    fn skips_malformed_venues() {
        let catalog: Catalog = serde_json::from_str(&format!(
            r#"{{
                "venues": [
                    {{"id": "{VENUE_ID}", "name": "Green Field Arena", "rating": 5.2}},
                    {{"id": "not-an-id", "name": "Broken"}},
                    {{"name": "Nameless"}},
                    {{
                        "id": "00000000-0000-4000-8000-000000000002",
                        "name": "Mumbai Sports Hub",
                        "timeSlots": [{{"start": 6, "end": 7, "price": 500}}]
                    }}
                ]
            }}"#,
        ))
        .unwrap();

        let names = catalog
            .venues
            .iter()
            .map(|v| v.name.as_ref())
            .collect::<Vec<&str>>();
        assert_eq!(names, ["Green Field Arena", "Mumbai Sports Hub"]);
        assert_eq!(catalog.venues[0].rating, None);
    }

    #[tokio::test]
    async fn stores_venues_with_bookings() {
        let catalog: Catalog = serde_json::from_str(&format!(
            r#"{{
                "venues": [{{"id": "{VENUE_ID}", "name": "Green Field Arena"}}],
                "bookings": [
                    {{"venueId": "{VENUE_ID}", "date": "2026-10-20", "hours": [8, 9]}}
                ]
            }}"#,
        ))
        .unwrap();
        let db = Memory::new();
        catalog.store(&db).await.unwrap();

        let booked: BookedHours = db
            .execute(Select(By::<BookedHours, _>::new((
                VENUE_ID.parse::<venue::Id>().unwrap(),
                date!(2026 - 10 - 20),
            ))))
            .await
            .unwrap();
        assert_eq!(booked, [8, 9].into_iter().collect());
    }

    #[tokio::test]
    async fn refuses_hours_out_of_day() {
        let catalog: Catalog = serde_json::from_str(&format!(
            r#"{{
                "venues": [],
                "bookings": [
                    {{"venueId": "{VENUE_ID}", "date": "2026-10-20", "hours": [24]}}
                ]
            }}"#,
        ))
        .unwrap();

        let err = catalog.store(&Memory::new()).await.unwrap_err();
        let err: &LoadError = err.as_ref();
        assert!(matches!(err, LoadError::NotAnHour(24)));
    }

    #[tokio::test]
    async fn loads_missing_file_as_empty() {
        let db = Catalog::load("/nonexistent/catalog.json").await.unwrap();

        let venues = db
            .execute(Select(By::<Vec<Venue>, _>::new(())))
            .await
            .unwrap();
        assert!(venues.is_empty());
    }
}
