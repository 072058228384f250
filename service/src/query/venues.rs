//! [`Query`] collection related to the multiple [`Venue`]s.

use common::{
    operations::{By, Select},
    Coordinates,
};
use tracerr::Traced;

use crate::{
    domain::Venue,
    infra::{database, Database},
    read::venue::list,
    Query, Service,
};

use super::DatabaseQuery;

/// Queries all the stored [`Venue`]s.
pub type All = DatabaseQuery<By<Vec<Venue>, ()>>;

/// [`Query`] searching listed [`Venue`]s.
#[derive(Clone, Debug, Default)]
pub struct Search {
    /// [`list::Criteria`] to search by.
    pub criteria: list::Criteria,

    /// [`Coordinates`] to measure the distance to [`Venue`]s from.
    pub origin: Option<Coordinates>,
}

impl<Db> Query<Search> for Service<Db>
where
    Db: Database<
        Select<By<Vec<Venue>, ()>>,
        Ok = Vec<Venue>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Vec<Venue>;
    type Err = Traced<database::Error>;

    async fn execute(&self, query: Search) -> Result<Self::Ok, Self::Err> {
        let Search { criteria, origin } = query;

        let venues = self
            .database()
            .execute(Select(By::new(())))
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .filter(Venue::is_listed)
            .map(|v| v.with_distance_from(origin))
            .collect::<Vec<_>>();

        Ok(list::search(&venues, &criteria))
    }
}
