//! [`Venue`] definitions.

use std::sync::LazyLock;

use common::{define_kind, money::Currency, Coordinates, Money, Rating};
use derive_more::{AsRef, Display, From, FromStr, Into};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::domain::slot::TimeSlot;

/// Bookable sports turf.
///
/// Every field except [`Venue::id`] and [`Venue::name`] may be missing in the
/// upstream data, so checks on them treat absence as "unknown".
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    /// ID of this [`Venue`].
    pub id: Id,

    /// [`Name`] of this [`Venue`].
    pub name: Name,

    /// [`Address`] of this [`Venue`].
    #[serde(default)]
    pub address: Option<Address>,

    /// Free-form description of this [`Venue`].
    #[serde(default)]
    pub description: Option<String>,

    /// [`Coordinates`] of this [`Venue`].
    #[serde(default, alias = "coordinates")]
    pub location: Option<Coordinates>,

    /// Hourly price of this [`Venue`], in its [`Currency`].
    #[serde(default)]
    pub price: Option<Decimal>,

    /// [`Currency`] of the [`Venue::price`].
    #[serde(default)]
    pub currency: Currency,

    /// Average [`Rating`] of this [`Venue`].
    ///
    /// Values out of the [`Rating`] bounds are read as unknown.
    #[serde(default, deserialize_with = "rating")]
    pub rating: Option<Rating>,

    /// Number of reviews this [`Venue`] has received.
    #[serde(default, alias = "reviews")]
    pub review_count: Option<u32>,

    /// [`Surface`] of this [`Venue`].
    #[serde(default)]
    pub surface: Option<Surface>,

    /// [`Amenity`] tags of this [`Venue`].
    #[serde(default)]
    pub amenities: Vec<Amenity>,

    /// Indicator whether playing on this [`Venue`] depends on the weather.
    #[serde(default)]
    pub weather_dependent: Option<bool>,

    /// [`TimeSlot`]s of this [`Venue`] known upstream.
    #[serde(default)]
    pub time_slots: Option<Vec<TimeSlot>>,

    /// Establishment year of this [`Venue`], as provided upstream.
    #[serde(default)]
    pub established: Option<String>,

    /// Distance to this [`Venue`] in kilometers, if known.
    #[serde(default)]
    pub distance: Option<f64>,

    /// [`Status`] of this [`Venue`].
    #[serde(default)]
    pub status: Status,
}

impl Venue {
    /// Year assumed for a [`Venue`] whose establishment year is unknown.
    pub const UNKNOWN_ESTABLISHMENT_YEAR: i32 = 1900;

    /// Returns the hourly price of this [`Venue`] as [`Money`].
    #[must_use]
    pub fn hourly_price(&self) -> Option<Money> {
        self.price.map(|amount| Money::new(amount, self.currency))
    }

    /// Returns the establishment year of this [`Venue`].
    ///
    /// Leading integer of [`Venue::established`] is used, falling back to
    /// [`Venue::UNKNOWN_ESTABLISHMENT_YEAR`].
    #[must_use]
    pub fn established_year(&self) -> i32 {
        /// Leading (optionally signed) integer of a string.
        static LEADING_INT: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^\s*([+-]?\d+)").expect("valid regex")
        });

        self.established
            .as_deref()
            .and_then(|s| LEADING_INT.captures(s))
            .and_then(|c| c[1].parse().ok())
            .unwrap_or(Self::UNKNOWN_ESTABLISHMENT_YEAR)
    }

    /// Annotates this [`Venue`] with its distance from the provided `origin`.
    ///
    /// The existing [`Venue::distance`] is kept if either location is unknown.
    #[must_use]
    pub fn with_distance_from(mut self, origin: Option<Coordinates>) -> Self {
        if let Some(distance) = origin
            .zip(self.location)
            .and_then(|(from, to)| from.distance_km(&to))
        {
            self.distance = Some(distance);
        }
        self
    }

    /// Indicates whether this [`Venue`] is listed for customers.
    #[must_use]
    pub fn is_listed(&self) -> bool {
        self.status == Status::Active
    }
}

/// ID of a [`Venue`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Name of a [`Venue`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq, Serialize)]
#[as_ref(str)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 256
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// Deserializes a [`Venue::rating`], dropping the ones out of bounds.
fn rating<'de, D>(deserializer: D) -> Result<Option<Rating>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Decimal>::deserialize(deserializer)?.and_then(Rating::new))
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Self::new(name.trim()).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid `Name`: `{name}`"))
        })
    }
}

/// Full address of a [`Venue`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, From, PartialEq, Serialize,
)]
#[as_ref(str)]
#[from(&str, String)]
pub struct Address(String);

/// Playing surface of a [`Venue`], like "Artificial Grass".
///
/// Surfaces are an open set, compared without regard to case.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, From, PartialEq, Serialize,
)]
#[as_ref(str)]
#[from(&str, String)]
pub struct Surface(String);

impl Surface {
    /// Indicates whether this [`Surface`] is the `other` one, ignoring case.
    #[must_use]
    pub fn is(&self, other: &Self) -> bool {
        self.0.to_lowercase() == other.0.to_lowercase()
    }
}

/// Amenity tag of a [`Venue`], like "Floodlights" or "Parking".
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, From, PartialEq, Serialize,
)]
#[as_ref(str)]
#[from(&str, String)]
pub struct Amenity(String);

define_kind! {
    #[doc = "Moderation status of a [`Venue`]."]
    #[case = "lowercase"]
    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "lowercase")]
    enum Status {
        #[doc = "Listed and bookable."]
        Active = 1,

        #[doc = "Awaiting approval by an administrator."]
        Pending = 2,

        #[doc = "Blocked by an administrator."]
        Blocked = 3,
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::Active
    }
}
