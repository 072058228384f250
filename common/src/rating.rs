//! [`Rating`]-related definitions.

use std::str::FromStr;

use derive_more::Display;
use rust_decimal::Decimal;

/// Star rating between `0` and `5` (inclusive).
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(try_from = "Decimal", into = "Decimal")
)]
pub struct Rating(Decimal);

impl Rating {
    /// The lowest possible [`Rating`].
    pub const MIN: Self = Self(Decimal::ZERO);

    /// The highest possible [`Rating`].
    pub const MAX: Self = Self(Decimal::from_parts(5, 0, 0, false, 0));

    /// Creates a new [`Rating`] by checking the provided value lies between
    /// [`Rating::MIN`] and [`Rating::MAX`].
    #[must_use]
    pub fn new(val: Decimal) -> Option<Self> {
        (Self::MIN.0..=Self::MAX.0)
            .contains(&val)
            .then_some(Self(val))
    }

    /// Returns the [`Decimal`] value of this [`Rating`].
    #[must_use]
    pub const fn get(self) -> Decimal {
        self.0
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self::MIN
    }
}

impl TryFrom<Decimal> for Rating {
    type Error = &'static str;

    fn try_from(val: Decimal) -> Result<Self, Self::Error> {
        Self::new(val).ok_or("rating must be between 0 and 5")
    }
}

impl From<Rating> for Decimal {
    fn from(r: Rating) -> Self {
        r.0
    }
}

impl FromStr for Rating {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s)
            .ok()
            .and_then(Self::new)
            .ok_or("invalid rating value")
    }
}
