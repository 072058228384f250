//! Date and time utilities.

use std::{cmp::Ordering, marker::PhantomData};

use derive_more::Debug;

/// Untyped date and time.
pub type DateTime = DateTimeOf;

/// UTC date and time with a second precision.
#[derive(Debug)]
pub struct DateTimeOf<Of: ?Sized = ()> {
    /// Inner representation of the date and time.
    inner: time::OffsetDateTime,

    /// Type parameter describing the kind of date and time.
    #[debug(skip)]
    _of: PhantomData<Of>,
}

impl<Of: ?Sized> DateTimeOf<Of> {
    /// Creates a new [`DateTime`] from the provided Unix timestamp.
    ///
    /// [`None`] is returned if the timestamp is out of range.
    #[must_use]
    pub fn from_unix_timestamp(timestamp: i64) -> Option<Self> {
        Some(Self {
            inner: time::OffsetDateTime::from_unix_timestamp(timestamp).ok()?,
            _of: PhantomData,
        })
    }

    /// Returns the Unix timestamp of this [`DateTime`].
    #[must_use]
    pub fn unix_timestamp(&self) -> i64 {
        self.inner.unix_timestamp()
    }
}

impl<Of: ?Sized> Copy for DateTimeOf<Of> {}
impl<Of: ?Sized> Clone for DateTimeOf<Of> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Of: ?Sized> Eq for DateTimeOf<Of> {}
impl<Of: ?Sized> PartialEq for DateTimeOf<Of> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<Of: ?Sized> Ord for DateTimeOf<Of> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<Of: ?Sized> PartialOrd for DateTimeOf<Of> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(feature = "serde")]
pub mod serde {
    //! Module providing integration with [`serde`] crate.

    use super::DateTimeOf;

    pub mod unix_timestamp {
        //! Module providing serialization and deserialization of [`DateTimeOf`]
        //! as a Unix timestamp.

        use super::DateTimeOf;

        pub mod option {
            //! Optional [`DateTimeOf`] as a Unix timestamp.
            //!
            //! Use together with `#[serde(default)]`, so a missing field
            //! becomes [`None`].

            use serde::{de::Error, Deserialize, Deserializer, Serializer};

            use super::DateTimeOf;

            /// Serializes the optional [`DateTimeOf`] as a Unix timestamp.
            ///
            /// # Errors
            ///
            /// Returns an error if the `serializer` fails.
            pub fn serialize<Of, S>(
                dt: &Option<DateTimeOf<Of>>,
                serializer: S,
            ) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
                Of: ?Sized,
            {
                match dt {
                    Some(dt) => serializer.serialize_some(&dt.unix_timestamp()),
                    None => serializer.serialize_none(),
                }
            }

            /// Deserializes an optional Unix timestamp into a [`DateTimeOf`].
            ///
            /// # Errors
            ///
            /// Returns an error if the timestamp is present, but invalid.
            pub fn deserialize<'de, D, Of>(
                deserializer: D,
            ) -> Result<Option<DateTimeOf<Of>>, D::Error>
            where
                D: Deserializer<'de>,
                Of: ?Sized,
            {
                Option::<i64>::deserialize(deserializer)?
                    .map(|ts| {
                        DateTimeOf::from_unix_timestamp(ts)
                            .ok_or_else(|| Error::custom("invalid timestamp"))
                    })
                    .transpose()
            }
        }
    }
}

#[cfg(test)]
mod spec {
    use super::DateTime;

    #[test]
    fn keeps_unix_timestamps() {
        let dt = DateTime::from_unix_timestamp(1_760_000_000).unwrap();
        assert_eq!(dt.unix_timestamp(), 1_760_000_000);
        assert!(dt < DateTime::from_unix_timestamp(1_760_000_001).unwrap());
    }

    #[test]
    fn rejects_out_of_range_timestamps() {
        assert!(DateTime::from_unix_timestamp(i64::MAX).is_none());
    }
}
