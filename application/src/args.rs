//! [`Args`] definitions.

use clap::{Parser, Subcommand, ValueEnum};
use common::Rating;
use rust_decimal::Decimal;
use service::{
    domain::venue::{self, Amenity, Surface},
    read::venue::list::{Availability, SortBy},
};
use time::{macros::format_description, Date};

/// Turf booking system.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// [`Command`] to run.
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

/// Command to run.
#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Searches listed venues.
    Search(Search),

    /// Prints the hourly slots of a venue on a date.
    Slots(Slots),

    /// Books hourly slots of a venue.
    Book(Book),

    /// Authorizes a session token against the required roles.
    Authorize(Authorize),

    /// Resolves the page a user is sent to.
    Path(Path),
}

/// Arguments of the [`Command::Search`].
#[derive(Clone, Debug, clap::Args)]
pub struct Search {
    /// Text to look for in names, addresses, descriptions and amenities.
    #[arg(short, long)]
    pub query: Option<String>,

    /// Maximum distance in kilometers.
    #[arg(long, default_value_t = 50.0)]
    pub max_distance: f64,

    /// Minimum hourly price.
    #[arg(long, default_value_t = Decimal::ZERO)]
    pub min_price: Decimal,

    /// Maximum hourly price.
    #[arg(long, default_value_t = Decimal::from(5000))]
    pub max_price: Decimal,

    /// Minimum rating, from 0 to 5.
    #[arg(long, default_value = "0")]
    pub min_rating: Rating,

    /// Required surface, `all` for any.
    #[arg(long, default_value = "all")]
    pub surface: String,

    /// Amenity the venue must have, may be repeated.
    #[arg(short, long = "amenity")]
    pub amenities: Vec<Amenity>,

    /// Requirement on venue slots: `all` or `available`.
    #[arg(long, default_value = "all")]
    pub availability: Availability,

    /// Required weather dependence.
    #[arg(long, value_enum, default_value_t = Weather::All)]
    pub weather: Weather,

    /// Sort key: `distance`, `price`, `rating`, `popularity` or `newest`.
    #[arg(short, long)]
    pub sort_by: Option<SortBy>,

    /// Latitude of the point to measure distances from.
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude of the point to measure distances from.
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,
}

impl Search {
    /// Returns the required [`Surface`], if any.
    #[must_use]
    pub fn surface(&self) -> Option<Surface> {
        let s = self.surface.trim();
        (!s.is_empty() && !s.eq_ignore_ascii_case("all"))
            .then(|| Surface::from(s))
    }
}

/// Weather dependence filter of the [`Command::Search`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum Weather {
    /// Any venue.
    #[default]
    All,

    /// Weather dependent venues only.
    True,

    /// Weather independent venues only.
    False,
}

impl From<Weather> for Option<bool> {
    fn from(w: Weather) -> Self {
        match w {
            Weather::All => None,
            Weather::True => Some(true),
            Weather::False => Some(false),
        }
    }
}

/// Arguments of the [`Command::Slots`].
#[derive(Clone, Debug, clap::Args)]
pub struct Slots {
    /// ID of the venue.
    pub venue: venue::Id,

    /// Date in `YYYY-MM-DD` format.
    #[arg(value_parser = parse_date)]
    pub date: Date,
}

/// Arguments of the [`Command::Book`].
#[derive(Clone, Debug, clap::Args)]
pub struct Book {
    /// ID of the venue.
    pub venue: venue::Id,

    /// Date in `YYYY-MM-DD` format.
    #[arg(value_parser = parse_date)]
    pub date: Date,

    /// Last date of a range booking, in `YYYY-MM-DD` format.
    #[arg(long, value_parser = parse_date)]
    pub until: Option<Date>,

    /// Indices of the slots to book, in the order they are picked.
    #[arg(short, long = "slot", required = true, num_args = 1..)]
    pub slots: Vec<usize>,
}

/// Arguments of the [`Command::Authorize`].
#[derive(Clone, Debug, clap::Args)]
pub struct Authorize {
    /// Session token.
    #[arg(short, long)]
    pub token: Option<String>,

    /// Roles any of which grants the access.
    #[arg(short, long = "role", required = true)]
    pub required: Vec<String>,
}

/// Arguments of the [`Command::Path`].
#[derive(Clone, Debug, clap::Args)]
pub struct Path {
    /// Role of the user, if signed in.
    #[arg(short, long)]
    pub role: Option<String>,

    /// Path the user intended to visit.
    #[arg(short, long)]
    pub intended: Option<String>,
}

/// Parses a [`Date`] in `YYYY-MM-DD` format.
fn parse_date(s: &str) -> Result<Date, time::error::Parse> {
    Date::parse(s, format_description!("[year]-[month]-[day]"))
}
