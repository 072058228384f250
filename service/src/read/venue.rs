//! [`Venue`]-related read definitions.

#[cfg(doc)]
use crate::domain::Venue;

pub mod list {
    //! [`Venue`] list definitions.

    use std::cmp::Ordering;

    use common::{define_kind, Rating};
    use itertools::Itertools as _;
    use rust_decimal::Decimal;
    use smart_default::SmartDefault;

    use crate::domain::{
        slot,
        venue::{Amenity, Surface},
        Venue,
    };

    /// Criteria to [`search`] [`Venue`]s by.
    #[derive(Clone, Debug, SmartDefault)]
    pub struct Criteria {
        /// Free-form text to look for in [`Venue`] descriptive fields.
        pub query: Option<String>,

        /// Maximum distance to a [`Venue`] in kilometers.
        #[default = 50.0]
        pub max_distance: f64,

        /// Minimum hourly price of a [`Venue`].
        #[default(Decimal::ZERO)]
        pub min_price: Decimal,

        /// Maximum hourly price of a [`Venue`].
        #[default(Decimal::from(5000))]
        pub max_price: Decimal,

        /// Minimum [`Rating`] of a [`Venue`].
        pub min_rating: Rating,

        /// [`Surface`] of a [`Venue`].
        ///
        /// [`None`] means any.
        pub surface: Option<Surface>,

        /// [`Amenity`] tags a [`Venue`] must all have.
        pub amenities: Vec<Amenity>,

        /// Requirement on [`Venue`] [`TimeSlot`]s.
        ///
        /// [`TimeSlot`]: slot::TimeSlot
        pub availability: Availability,

        /// Required weather dependence of a [`Venue`].
        ///
        /// [`None`] means any.
        pub weather_dependent: Option<bool>,

        /// Order of the found [`Venue`]s.
        ///
        /// [`None`] keeps the original order.
        pub sort_by: Option<SortBy>,
    }

    impl Criteria {
        /// Indicates whether the provided [`Venue`] meets these [`Criteria`].
        ///
        /// Checks on the data missing in the [`Venue`] pass, except the
        /// [`Availability::Available`] one.
        #[must_use]
        pub fn matches(&self, venue: &Venue) -> bool {
            self.matches_distance(venue)
                && self.matches_price(venue)
                && self.matches_rating(venue)
                && self.matches_surface(venue)
                && self.matches_weather(venue)
                && self.matches_amenities(venue)
                && self.matches_availability(venue)
                && self.matches_query(venue)
        }

        fn matches_distance(&self, venue: &Venue) -> bool {
            venue.distance.is_none_or(|d| d <= self.max_distance)
        }

        fn matches_price(&self, venue: &Venue) -> bool {
            venue
                .price
                .is_none_or(|p| (self.min_price..=self.max_price).contains(&p))
        }

        fn matches_rating(&self, venue: &Venue) -> bool {
            venue.rating.is_none_or(|r| r >= self.min_rating)
        }

        fn matches_surface(&self, venue: &Venue) -> bool {
            match (&self.surface, &venue.surface) {
                (Some(required), Some(surface)) => surface.is(required),
                (None, _) | (Some(_), None) => true,
            }
        }

        fn matches_weather(&self, venue: &Venue) -> bool {
            match (self.weather_dependent, venue.weather_dependent) {
                (Some(required), Some(dependent)) => required == dependent,
                (None, _) | (Some(_), None) => true,
            }
        }

        fn matches_amenities(&self, venue: &Venue) -> bool {
            let have = venue
                .amenities
                .iter()
                .map(|a| a.as_ref().to_lowercase())
                .collect::<Vec<_>>();
            self.amenities.iter().all(|wanted| {
                let wanted = wanted.as_ref().to_lowercase();
                have.iter().any(|a| a.contains(&wanted))
            })
        }

        fn matches_availability(&self, venue: &Venue) -> bool {
            match self.availability {
                Availability::All => true,
                Availability::Available => {
                    slot::has_available(venue.time_slots.as_deref())
                }
            }
        }

        fn matches_query(&self, venue: &Venue) -> bool {
            let Some(query) = self
                .query
                .as_deref()
                .map(str::trim)
                .filter(|q| !q.is_empty())
            else {
                return true;
            };
            let query = query.to_lowercase();

            let name: &str = venue.name.as_ref();
            let address = venue.address.as_ref().map(AsRef::<str>::as_ref);
            [Some(name), address, venue.description.as_deref()]
                .into_iter()
                .flatten()
                .chain(venue.amenities.iter().map(AsRef::<str>::as_ref))
                .any(|field| field.to_lowercase().contains(&query))
        }
    }

    define_kind! {
        #[doc = "Requirement on [`Venue`] time slots."]
        #[case = "lowercase"]
        enum Availability {
            #[doc = "Any [`Venue`] passes."]
            All = 1,

            #[doc = "[`Venue`] must have at least one bookable time slot."]
            Available = 2,
        }
    }

    impl Default for Availability {
        fn default() -> Self {
            Self::All
        }
    }

    define_kind! {
        #[doc = "Key to sort [`Venue`]s by."]
        #[case = "lowercase"]
        enum SortBy {
            #[doc = "Nearest first."]
            Distance = 1,

            #[doc = "Cheapest first."]
            Price = 2,

            #[doc = "Best rated first."]
            Rating = 3,

            #[doc = "Most reviewed first."]
            Popularity = 4,

            #[doc = "Most recently established first."]
            Newest = 5,
        }
    }

    impl SortBy {
        /// Compares the provided [`Venue`]s by this key.
        ///
        /// Missing values compare as zero.
        #[must_use]
        pub fn compare(self, a: &Venue, b: &Venue) -> Ordering {
            match self {
                Self::Distance => a
                    .distance
                    .unwrap_or_default()
                    .total_cmp(&b.distance.unwrap_or_default()),
                Self::Price => {
                    a.price.unwrap_or_default().cmp(&b.price.unwrap_or_default())
                }
                Self::Rating => b
                    .rating
                    .unwrap_or_default()
                    .cmp(&a.rating.unwrap_or_default()),
                Self::Popularity => b
                    .review_count
                    .unwrap_or_default()
                    .cmp(&a.review_count.unwrap_or_default()),
                Self::Newest => b.established_year().cmp(&a.established_year()),
            }
        }
    }

    /// Filters the [`Venue`]s meeting the provided [`Criteria`].
    #[must_use]
    pub fn filter<'v>(
        venues: impl IntoIterator<Item = &'v Venue>,
        criteria: &Criteria,
    ) -> Vec<Venue> {
        venues
            .into_iter()
            .filter(|v| criteria.matches(v))
            .cloned()
            .collect()
    }

    /// Sorts the [`Venue`]s by the provided key, keeping the relative order of
    /// equal ones.
    #[must_use]
    pub fn sort(venues: Vec<Venue>, by: Option<SortBy>) -> Vec<Venue> {
        match by {
            Some(by) => venues
                .into_iter()
                .sorted_by(|a, b| by.compare(a, b))
                .collect(),
            None => venues,
        }
    }

    /// Searches the [`Venue`]s meeting the provided [`Criteria`], ordered as
    /// they require.
    #[must_use]
    pub fn search<'v>(
        venues: impl IntoIterator<Item = &'v Venue>,
        criteria: &Criteria,
    ) -> Vec<Venue> {
        sort(filter(venues, criteria), criteria.sort_by)
    }

    #[cfg(test)]
    mod spec {
        use rust_decimal::Decimal;

        use crate::domain::Venue;

        use super::{filter, search, sort, Availability, Criteria, SortBy};

        fn venue(json: serde_json::Value) -> Venue {
            let mut json = json;
            json["id"] = uuid::Uuid::new_v4().to_string().into();
            if json.get("name").is_none() {
                json["name"] = "Turf".into();
            }
            serde_json::from_value(json).unwrap()
        }

        fn prices(venues: &[Venue]) -> Vec<Option<Decimal>> {
            venues.iter().map(|v| v.price).collect()
        }

        fn names(venues: &[Venue]) -> Vec<&str> {
            venues.iter().map(|v| v.name.as_ref()).collect()
        }

        #[test]
        fn filters_and_sorts_by_price() {
            let venues = [
                venue(serde_json::json!({"price": 500, "rating": 3})),
                venue(serde_json::json!({"price": 1500, "rating": 5})),
                venue(serde_json::json!({"price": 900, "rating": 4})),
            ];
            let criteria = Criteria {
                max_price: Decimal::from(1000),
                sort_by: Some(SortBy::Price),
                ..Criteria::default()
            };

            assert_eq!(
                prices(&search(&venues, &criteria)),
                [Some(Decimal::from(500)), Some(Decimal::from(900))],
            );
        }

        #[test]
        fn search_is_idempotent() {
            let venues = [
                venue(serde_json::json!({"name": "A", "rating": 4, "distance": 3.0})),
                venue(serde_json::json!({"name": "B", "rating": 5, "distance": 60.0})),
                venue(serde_json::json!({"name": "C", "rating": 4})),
                venue(serde_json::json!({"name": "D", "rating": 4.5, "distance": 1.0})),
            ];
            let criteria = Criteria {
                sort_by: Some(SortBy::Rating),
                ..Criteria::default()
            };

            let once = search(&venues, &criteria);
            let twice = search(&once, &criteria);
            assert_eq!(once, twice);
            assert_eq!(names(&once), ["D", "A", "C"]);
        }

        #[test]
        fn passes_missing_fields() {
            let venues = [venue(serde_json::json!({}))];
            let criteria = Criteria {
                query: Some("   ".into()),
                max_distance: 1.0,
                min_price: Decimal::from(100),
                min_rating: "4".parse().unwrap(),
                surface: Some("Clay".into()),
                weather_dependent: Some(true),
                ..Criteria::default()
            };
            assert_eq!(filter(&venues, &criteria).len(), 1);
        }

        #[test]
        fn requires_all_amenities() {
            let venues = [
                venue(serde_json::json!({
                    "name": "A",
                    "amenities": ["Floodlights", "Free Parking"],
                })),
                venue(serde_json::json!({
                    "name": "B",
                    "amenities": ["Parking"],
                })),
            ];
            let criteria = Criteria {
                amenities: vec!["parking".into(), "LIGHT".into()],
                ..Criteria::default()
            };
            assert_eq!(names(&filter(&venues, &criteria)), ["A"]);

            let criteria = Criteria {
                amenities: vec!["parking".into()],
                ..Criteria::default()
            };
            assert_eq!(names(&filter(&venues, &criteria)), ["A", "B"]);
        }

        #[test]
        fn matches_query_in_any_field() {
            let venues = [
                venue(serde_json::json!({"name": "Green Field Arena"})),
                venue(serde_json::json!({"name": "B", "address": "Koramangala"})),
                venue(serde_json::json!({"name": "C", "description": "Indoor FIELD"})),
                venue(serde_json::json!({"name": "D", "amenities": ["Fielding nets"]})),
                venue(serde_json::json!({"name": "E"})),
            ];
            let criteria = Criteria {
                query: Some(" field ".into()),
                ..Criteria::default()
            };
            assert_eq!(
                names(&filter(&venues, &criteria)),
                ["Green Field Arena", "C", "D"],
            );
        }

        #[test]
        fn compares_surfaces_case_insensitively() {
            let venues = [
                venue(serde_json::json!({"name": "A", "surface": "artificial grass"})),
                venue(serde_json::json!({"name": "B", "surface": "Clay"})),
            ];
            let criteria = Criteria {
                surface: Some("Artificial Grass".into()),
                ..Criteria::default()
            };
            assert_eq!(names(&filter(&venues, &criteria)), ["A"]);
        }

        #[test]
        fn filters_by_weather_dependence() {
            let venues = [
                venue(serde_json::json!({"name": "A", "weatherDependent": true})),
                venue(serde_json::json!({"name": "B", "weatherDependent": false})),
            ];
            let indoor = Criteria {
                weather_dependent: Some(false),
                ..Criteria::default()
            };
            assert_eq!(names(&filter(&venues, &indoor)), ["B"]);
            assert_eq!(names(&filter(&venues, &Criteria::default())), ["A", "B"]);
        }

        #[test]
        fn filters_by_availability() {
            let venues = [
                venue(serde_json::json!({
                    "name": "A",
                    "timeSlots": [{"start": 6, "end": 7, "booked": true}],
                })),
                venue(serde_json::json!({
                    "name": "B",
                    "timeSlots": [{"start": 6, "end": 7}],
                })),
                venue(serde_json::json!({"name": "C"})),
            ];
            let criteria = Criteria {
                availability: Availability::Available,
                ..Criteria::default()
            };
            assert_eq!(names(&filter(&venues, &criteria)), ["B"]);
            assert_eq!(filter(&venues, &Criteria::default()).len(), 3);
        }

        #[test]
        fn sorts_stably_with_missing_values_as_zero() {
            let venues = vec![
                venue(serde_json::json!({"name": "A", "reviews": 10})),
                venue(serde_json::json!({"name": "B"})),
                venue(serde_json::json!({"name": "C", "reviews": 10})),
                venue(serde_json::json!({"name": "D", "reviews": 50})),
            ];
            assert_eq!(
                names(&sort(venues.clone(), Some(SortBy::Popularity))),
                ["D", "A", "C", "B"],
            );
            assert_eq!(
                names(&sort(venues.clone(), Some(SortBy::Price))),
                ["A", "B", "C", "D"],
            );
            assert_eq!(names(&sort(venues, None)), ["A", "B", "C", "D"]);
        }

        #[test]
        fn sorts_by_distance_and_establishment() {
            let venues = vec![
                venue(serde_json::json!({"name": "A", "distance": 4.2, "established": "2015"})),
                venue(serde_json::json!({"name": "B", "distance": 0.8, "established": "unknown"})),
                venue(serde_json::json!({"name": "C", "established": "2021-03"})),
            ];
            assert_eq!(
                names(&sort(venues.clone(), Some(SortBy::Distance))),
                ["C", "B", "A"],
            );
            assert_eq!(
                names(&sort(venues, Some(SortBy::Newest))),
                ["C", "A", "B"],
            );
        }

        #[test]
        fn handles_empty_input() {
            let none: [Venue; 0] = [];
            assert!(search(&none, &Criteria::default()).is_empty());
        }

        #[test]
        fn parses_modes() {
            assert_eq!("available".parse(), Ok(Availability::Available));
            assert_eq!("ALL".parse(), Ok(Availability::All));
            assert_eq!("popularity".parse(), Ok(SortBy::Popularity));
            assert!("cheapest".parse::<SortBy>().is_err());
        }
    }
}
