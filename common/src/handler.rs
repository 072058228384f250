//! [`Handler`] abstractions.

use std::future::Future;

/// Asynchronous operation accepting `Args` and producing a [`Result`].
///
/// Queries, commands and database operations are all expressed as
/// [`Handler`]s, differing only in the `Args` type they accept.
pub trait Handler<Args = ()> {
    /// Type of a successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided `args`.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
