//! Execution of the command line [`Command`]s.

use common::Coordinates;
use serde::Serialize;
use serde_json::json;
use service::{
    command::{AuthorizeUserSession, ConfirmBooking},
    domain::{
        booking,
        slot::{DateSelection, Selection},
        user::{path, Access},
        Venue,
    },
    query,
    read::venue::list,
    Command as _, Query as _,
};

use crate::{args, args::Command, config, AsError, Error, Service};

/// Runs the provided [`Command`] against the [`Service`], returning its JSON
/// output.
///
/// # Errors
///
/// If the [`Command`] fails.
pub async fn run(
    service: &Service,
    defaults: &config::Search,
    cmd: Command,
) -> Result<serde_json::Value, Error> {
    match cmd {
        Command::Search(args) => {
            to_json(&search(service, defaults, args).await?)
        }
        Command::Slots(args) => to_json(&slots(service, args).await?),
        Command::Book(args) => to_json(&book(service, args).await?),
        Command::Authorize(args) => {
            to_json(&authorize(service, args).await?)
        }
        Command::Path(args) => Ok(resolve_path(&args)),
    }
}

/// Searches listed [`Venue`]s.
///
/// # Errors
///
/// If the [`Venue`]s cannot be read.
#[tracing::instrument(
    skip_all,
    fields(
        cmd = "search",
        query = ?args.query,
        sort_by = ?args.sort_by,
    ),
)]
pub async fn search(
    service: &Service,
    defaults: &config::Search,
    args: args::Search,
) -> Result<Vec<Venue>, Error> {
    let surface = args.surface();
    let args::Search {
        query,
        max_distance,
        min_price,
        max_price,
        min_rating,
        surface: _,
        amenities,
        availability,
        weather,
        sort_by,
        lat,
        lon,
    } = args;

    let origin = lat
        .zip(lon)
        .map(|(lat, lon)| Coordinates::new(lat, lon))
        .or(defaults.origin);

    service
        .execute(query::venues::Search {
            criteria: list::Criteria {
                query,
                max_distance,
                min_price,
                max_price,
                min_rating,
                surface,
                amenities,
                availability,
                weather_dependent: weather.into(),
                sort_by,
            },
            origin,
        })
        .await
        .map_err(AsError::into_error)
}

/// Builds the hourly slots grid of a [`Venue`].
///
/// # Errors
///
/// Possible error codes:
/// - `VENUE_NOT_EXISTS` - the [`Venue`] doesn't exist.
#[tracing::instrument(
    skip_all,
    fields(cmd = "slots", venue = %args.venue, date = %args.date),
)]
pub async fn slots(
    service: &Service,
    args: args::Slots,
) -> Result<query::venue::Output, Error> {
    let args::Slots { venue, date } = args;

    service
        .execute(query::venue::DailySlots {
            venue_id: venue,
            date,
        })
        .await
        .map_err(AsError::into_error)
}

/// Books hourly slots of a [`Venue`].
///
/// # Errors
///
/// Possible error codes:
/// - `VENUE_NOT_EXISTS` - the [`Venue`] doesn't exist;
/// - `EMPTY_SELECTION` - no slots are selected;
/// - `SLOT_NOT_EXISTS` - a selected slot is out of the day;
/// - `SLOT_UNAVAILABLE` - a selected slot is booked or unavailable;
/// - `HOUR_BOOKED` - a selected slot got booked meanwhile.
#[tracing::instrument(
    skip_all,
    fields(
        cmd = "book",
        venue = %args.venue,
        date = %args.date,
        until = ?args.until,
        slots = ?args.slots,
    ),
)]
pub async fn book(
    service: &Service,
    args: args::Book,
) -> Result<booking::Request, Error> {
    let args::Book {
        venue,
        date,
        until,
        slots: picked,
    } = args;
    let dates = until.map_or(DateSelection::single(date), |until| {
        DateSelection::range(date, until)
    });

    let day = slots(
        service,
        args::Slots {
            venue,
            date: dates.first_day(),
        },
    )
    .await?;
    let selection = picked
        .into_iter()
        .try_fold(Selection::new(), |s, i| s.select(i, &day.slots.slots))
        .map_err(AsError::into_error)?;

    service
        .execute(ConfirmBooking {
            venue_id: venue,
            dates,
            selection,
        })
        .await
        .map_err(AsError::into_error)
}

/// Authorizes a session token against the required roles.
///
/// # Errors
///
/// Possible error codes:
/// - `NO_TOKEN` - no token is provided;
/// - `INVALID_TOKEN` - the token cannot be decoded or carries no role;
/// - `TOKEN_ERROR` - the token fails the verification;
/// - `INSUFFICIENT_ROLE` - the token role doesn't grant the access.
#[tracing::instrument(
    skip_all,
    fields(cmd = "authorize", required = ?args.required),
)]
pub async fn authorize(
    service: &Service,
    args: args::Authorize,
) -> Result<Access, Error> {
    let args::Authorize { token, required } = args;

    service
        .execute(AuthorizeUserSession {
            token: token.map(Into::into),
            required,
        })
        .await
        .map_err(AsError::into_error)
}

/// Resolves the page a user is sent to.
///
/// With an `intended` path provided, it's remapped to the area of the role,
/// otherwise the default page of the role is returned.
#[must_use]
pub fn resolve_path(args: &args::Path) -> serde_json::Value {
    let role = args.role.as_deref();
    let path = args.intended.as_deref().map_or_else(
        || path::default_path(role).to_owned(),
        |intended| path::remap_path(intended, role),
    );
    json!({ "path": path })
}

/// Serializes the provided `value` as a JSON output.
fn to_json(value: &impl Serialize) -> Result<serde_json::Value, Error> {
    serde_json::to_value(value).map_err(|e| Error::internal(&e))
}
