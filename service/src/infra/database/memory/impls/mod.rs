//! [`Database`] implementations.
//!
//! [`Database`]: crate::infra::Database

mod reservation;
mod venue;
