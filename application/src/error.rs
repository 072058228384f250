//! [`Error`]-related definitions.

use std::fmt;

use derive_more::Error as StdError;
use itertools::Itertools as _;
use serde::Serialize;
use service::{
    command::{authorize_user_session, confirm_booking},
    domain::{booking, slot::InvalidSelection, user::access},
    infra::{database, memory},
    query,
};
use tracerr::{Trace, Traced};

use crate::catalog;

/// Command line [`Error`].
#[derive(Clone, Debug, Serialize, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    #[serde(skip)]
    pub backtrace: Option<Trace>,

    /// [`Error`] message.
    pub message: String,
}

impl Error {
    /// Creates a new [`Error`] with the provided [`Code`] and message.
    #[must_use]
    pub fn new(code: Code, msg: &impl ToString) -> Self {
        Self {
            code,
            message: msg.to_string(),
            backtrace: None,
        }
    }

    /// Create a new [`Error`] representing an internal error.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self::new("INTERNAL_ERROR", msg)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            backtrace,
            message,
        } = self;

        write!(
            f,
            "[{code}]: {message}{}",
            backtrace
                .iter()
                .format_with("\n", |trace, f| f(&format_args!("\n{trace}"))),
        )
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }
}

impl AsError for database::Error {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Memory(e) => e.try_as_error(),
        }
    }
}

impl AsError for memory::Error {
    fn try_as_error(&self) -> Option<Error> {
        Some(match self {
            Self::VenueExists(_) => Error::new("VENUE_EXISTS", self),
            Self::HourBooked(..) => Error::new("HOUR_BOOKED", self),
        })
    }
}

impl AsError for InvalidSelection {
    fn try_as_error(&self) -> Option<Error> {
        Some(match self {
            Self::NotExists(_) => Error::new("SLOT_NOT_EXISTS", self),
            Self::Unavailable(_) => Error::new("SLOT_UNAVAILABLE", self),
        })
    }
}

impl AsError for booking::Error {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::EmptySelection => Some(Error::new("EMPTY_SELECTION", self)),
            Self::InvalidSelection(e) => e.try_as_error(),
        }
    }
}

impl AsError for query::venue::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::VenueNotExists(_) => {
                Some(Error::new("VENUE_NOT_EXISTS", self))
            }
        }
    }
}

impl AsError for confirm_booking::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::Booking(e) => e.try_as_error(),
            Self::VenueNotExists(_) => {
                Some(Error::new("VENUE_NOT_EXISTS", self))
            }
            Self::HourOutOfDay(_) => None,
        }
    }
}

impl AsError for authorize_user_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        let Self::Denied(denial) = self;
        let code = match denial.code {
            access::Code::NoToken => "NO_TOKEN",
            access::Code::InvalidToken => "INVALID_TOKEN",
            access::Code::InsufficientRole => "INSUFFICIENT_ROLE",
            access::Code::TokenError => "TOKEN_ERROR",
        };
        Some(Error::new(code, &denial.explanation))
    }
}

impl AsError for catalog::LoadError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Io(_) => Some(Error::new("CATALOG_UNREADABLE", self)),
            Self::Json(_) | Self::NotAnHour(_) => {
                Some(Error::new("MALFORMED_CATALOG", self))
            }
            Self::Db(e) => e.try_as_error(),
        }
    }
}
