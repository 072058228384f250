//! [`Venue`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::{venue, Venue},
    infra::{
        database::{self, memory, Memory},
        Database,
    },
};

impl Database<Select<By<Option<Venue>, venue::Id>>> for Memory {
    type Ok = Option<Venue>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Venue>, venue::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.venues.read().await.iter().find(|v| v.id == id).cloned())
    }
}

impl Database<Select<By<Vec<Venue>, ()>>> for Memory {
    type Ok = Vec<Venue>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Venue>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self.venues.read().await.clone())
    }
}

impl Database<Insert<Venue>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(venue): Insert<Venue>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut venues = self.venues.write().await;
        if venues.iter().any(|v| v.id == venue.id) {
            return Err(tracerr::new!(memory::Error::VenueExists(venue.id)))
                .map_err(tracerr::map_from);
        }
        venues.push(venue);
        Ok(())
    }
}
