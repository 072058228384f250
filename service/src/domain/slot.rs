//! [`TimeSlot`] definitions and the hourly availability grid.

use std::{collections::BTreeSet, fmt};

use common::{money::Currency, Money};
use derive_more::{Display, Error, From, Into};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use time::{macros::format_description, Date};

use crate::domain::venue;

/// Hour of a day, `0` being midnight.
pub type Hour = u8;

/// Number of [`TimeSlot`]s in a [`DailySlots`] grid.
pub const HOURS_PER_DAY: Hour = 24;

/// One-hour bookable window of a [`Venue`].
///
/// [`Venue`]: crate::domain::Venue
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    /// [`Hour`] this [`TimeSlot`] starts at.
    pub start: Hour,

    /// [`Hour`] this [`TimeSlot`] ends at.
    pub end: Hour,

    /// Indicator whether this [`TimeSlot`] is offered at all.
    #[serde(default = "offered")]
    pub available: bool,

    /// Indicator whether this [`TimeSlot`] is already booked.
    #[serde(default)]
    pub booked: bool,

    /// Price of this [`TimeSlot`].
    ///
    /// [`None`] means the price of the venue applies. A bare amount is read
    /// in the default [`Currency`].
    #[serde(default, deserialize_with = "price")]
    pub price: Option<Money>,
}

/// Deserializes a [`TimeSlot::price`] given either as [`Money`] or as a bare
/// amount.
fn price<'de, D>(deserializer: D) -> Result<Option<Money>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Price {
        Amount(Decimal),
        Money(Money),
    }

    Ok(Option::<Price>::deserialize(deserializer)?.map(|p| match p {
        Price::Amount(amount) => Money::new(amount, Currency::default()),
        Price::Money(money) => money,
    }))
}

/// Default of [`TimeSlot::available`].
const fn offered() -> bool {
    true
}

impl TimeSlot {
    /// Indicates whether this [`TimeSlot`] can be selected for booking.
    #[must_use]
    pub const fn is_selectable(&self) -> bool {
        self.available && !self.booked
    }

    /// Returns the `HH:00 - HH:00` label of this [`TimeSlot`].
    #[must_use]
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00 - {:02}:00", self.start, self.end)
    }
}

/// Counts selectable [`TimeSlot`]s.
///
/// Missing `slots` count as none.
#[must_use]
pub fn available_count(slots: Option<&[TimeSlot]>) -> usize {
    slots.map_or(0, |s| s.iter().filter(|s| s.is_selectable()).count())
}

/// Indicates whether any of the `slots` is selectable.
///
/// Missing `slots` have none.
#[must_use]
pub fn has_available(slots: Option<&[TimeSlot]>) -> bool {
    slots.is_some_and(|s| s.iter().any(TimeSlot::is_selectable))
}

/// Set of [`Hour`]s already booked at a venue on some date.
#[derive(Clone, Debug, Default, Eq, From, Into, PartialEq)]
pub struct BookedHours(BTreeSet<Hour>);

impl BookedHours {
    /// Marks the provided [`Hour`] as booked.
    ///
    /// Returns `false` if it has been booked already.
    pub fn insert(&mut self, hour: Hour) -> bool {
        self.0.insert(hour)
    }

    /// Indicates whether the provided [`Hour`] is booked.
    #[must_use]
    pub fn contains(&self, hour: Hour) -> bool {
        self.0.contains(&hour)
    }
}

impl FromIterator<Hour> for BookedHours {
    fn from_iter<I: IntoIterator<Item = Hour>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Booking of a single [`Hour`] at a venue on some date.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Reservation {
    /// ID of the reserved venue.
    pub venue_id: venue::Id,

    /// [`Date`] of this [`Reservation`].
    pub date: Date,

    /// Reserved [`Hour`].
    hour: Hour,
}

impl Reservation {
    /// Creates a new [`Reservation`] if the `hour` exists in a day.
    #[must_use]
    pub fn new(venue_id: venue::Id, date: Date, hour: Hour) -> Option<Self> {
        (hour < HOURS_PER_DAY).then_some(Self {
            venue_id,
            date,
            hour,
        })
    }

    /// Returns the reserved [`Hour`].
    #[must_use]
    pub const fn hour(&self) -> Hour {
        self.hour
    }
}

/// Hourly [`TimeSlot`] grid of a single day.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DailySlots {
    /// [`Date`] of this grid.
    pub date: Date,

    /// [`HOURS_PER_DAY`] contiguous [`TimeSlot`]s, midnight first.
    pub slots: Vec<TimeSlot>,
}

impl DailySlots {
    /// Generates the grid for the provided `date`.
    ///
    /// Every slot costs the `base_price`. Slots starting at any of the
    /// `booked` hours are unavailable.
    #[must_use]
    pub fn generate(date: Date, base_price: Money, booked: &BookedHours) -> Self {
        let slots = (0..HOURS_PER_DAY)
            .map(|hour| TimeSlot {
                start: hour,
                end: hour + 1,
                available: !booked.contains(hour),
                booked: false,
                price: Some(base_price),
            })
            .collect();
        Self { date, slots }
    }

    /// Counts selectable [`TimeSlot`]s of this grid.
    #[must_use]
    pub fn available_count(&self) -> usize {
        available_count(Some(&self.slots))
    }
}

/// Slots chosen to be booked together, in the order they were chosen.
///
/// Two [`Selection`]s are equal if they select the same slots, regardless of
/// the order.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Selection(Vec<usize>);

impl PartialEq for Selection {
    fn eq(&self, other: &Self) -> bool {
        self.chronological().eq(other.chronological())
    }
}

impl Eq for Selection {}

impl Selection {
    /// Creates an empty [`Selection`].
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns the selected slot indices in the order they were chosen.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Indicates whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Indicates whether the slot at `index` is selected.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }

    /// Adds the slot at `index` to this [`Selection`], if not selected yet.
    ///
    /// # Errors
    ///
    /// If the slot doesn't exist or isn't selectable.
    pub fn select(
        mut self,
        index: usize,
        slots: &[TimeSlot],
    ) -> Result<Self, InvalidSelection> {
        if !self.contains(index) {
            Self::check(index, slots)?;
            self.0.push(index);
        }
        Ok(self)
    }

    /// Deselects the slot at `index` if it's selected, or selects it
    /// otherwise.
    ///
    /// Deselecting always succeeds, even if the slot got booked meanwhile.
    ///
    /// # Errors
    ///
    /// If a slot to select doesn't exist or isn't selectable.
    pub fn toggle(
        mut self,
        index: usize,
        slots: &[TimeSlot],
    ) -> Result<Self, InvalidSelection> {
        if let Some(pos) = self.0.iter().position(|i| *i == index) {
            _ = self.0.remove(pos);
            return Ok(self);
        }
        self.select(index, slots)
    }

    /// Checks that every selected slot is still selectable.
    ///
    /// # Errors
    ///
    /// With the first (chronologically) slot violating it.
    pub fn validate(&self, slots: &[TimeSlot]) -> Result<(), InvalidSelection> {
        self.chronological()
            .try_for_each(|index| Self::check(index, slots))
    }

    /// Returns the selected [`TimeSlot`]s in chronological order.
    ///
    /// Indices not present in `slots` are skipped.
    pub fn slots<'s>(
        &self,
        slots: &'s [TimeSlot],
    ) -> impl Iterator<Item = &'s TimeSlot> + 's {
        self.chronological().filter_map(move |i| slots.get(i))
    }

    /// Sums up the prices of the selected [`TimeSlot`]s.
    ///
    /// Unpriced or missing slots add nothing, as well as slots priced in a
    /// currency other than the chronologically first priced one. An empty
    /// [`Selection`] costs zero in the default [`Currency`].
    #[must_use]
    pub fn total(&self, slots: &[TimeSlot]) -> Money {
        let mut prices = self.slots(slots).filter_map(|s| s.price);
        let Some(first) = prices.next() else {
            return Money::zero(Currency::default());
        };
        prices.fold(first, |total, price| {
            total.checked_add(price).unwrap_or(total)
        })
    }

    /// Returns the selected indices in chronological order.
    fn chronological(&self) -> impl Iterator<Item = usize> {
        self.0.iter().copied().collect::<BTreeSet<_>>().into_iter()
    }

    /// Checks whether the slot at `index` may be selected.
    fn check(index: usize, slots: &[TimeSlot]) -> Result<(), InvalidSelection> {
        match slots.get(index) {
            None => Err(InvalidSelection::NotExists(index)),
            Some(slot) if !slot.is_selectable() => {
                Err(InvalidSelection::Unavailable(index))
            }
            Some(_) => Ok(()),
        }
    }
}

/// Error of selecting a [`TimeSlot`] which can't be booked.
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum InvalidSelection {
    /// There is no slot with the provided index.
    #[display("Slot #{_0} does not exist")]
    NotExists(#[error(not(source))] usize),

    /// Slot with the provided index is booked or not offered.
    #[display("Slot #{_0} is not available")]
    Unavailable(#[error(not(source))] usize),
}

/// Dates a booking is made for.
///
/// A single date and a range exclude each other: choosing one replaces the
/// other.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum DateSelection {
    /// A single day.
    Single {
        /// The day.
        date: Date,
    },

    /// Consecutive days, both ends included.
    Range {
        /// First day of the range.
        start: Date,

        /// Last day of the range.
        end: Date,
    },
}

impl DateSelection {
    /// Selects a single `date`.
    #[must_use]
    pub const fn single(date: Date) -> Self {
        Self::Single { date }
    }

    /// Selects a range between the provided dates, in whichever order they
    /// are given.
    #[must_use]
    pub fn range(from: Date, to: Date) -> Self {
        Self::Range {
            start: from.min(to),
            end: from.max(to),
        }
    }

    /// Returns the first selected day.
    #[must_use]
    pub const fn first_day(&self) -> Date {
        match *self {
            Self::Single { date } => date,
            Self::Range { start, .. } => start,
        }
    }

    /// Returns the human-readable description of this [`DateSelection`],
    /// like `Mon Oct 20 2026` or `Mon Oct 20 2026 - Wed Oct 22 2026`.
    #[must_use]
    pub fn describe(&self) -> String {
        match *self {
            Self::Single { date } => describe_day(date),
            Self::Range { start, end } => {
                format!("{} - {}", describe_day(start), describe_day(end))
            }
        }
    }
}

/// Formats the provided `date` as `Mon Oct 20 2026`.
fn describe_day(date: Date) -> String {
    date.format(format_description!(
        "[weekday repr:short] [month repr:short] [day] [year]"
    ))
    .unwrap_or_else(|_| date.to_string())
}

#[cfg(test)]
mod spec {
    use common::{money::Currency, Money};
    use rust_decimal::Decimal;
    use time::macros::date;

    use super::{
        available_count, has_available, BookedHours, DailySlots,
        DateSelection, InvalidSelection, Selection, TimeSlot,
    };

    fn rupees(amount: i64) -> Money {
        Money::new(Decimal::from(amount), Currency::Inr)
    }

    /// Grid with the evening and late morning hours booked.
    fn busy_day() -> DailySlots {
        DailySlots::generate(
            date!(2026 - 10 - 20),
            rupees(500),
            &[8, 9, 10, 11, 12, 18, 19, 20].into_iter().collect(),
        )
    }

    #[test]
    fn reads_bare_and_money_prices() {
        let slots: Vec<TimeSlot> = serde_json::from_str(
            r#"[
                {"start": 6, "end": 7, "price": 500},
                {"start": 7, "end": 8, "price": {"amount": 9.5, "currency": "USD"}},
                {"start": 8, "end": 9, "price": null},
                {"start": 9, "end": 10}
            ]"#,
        )
        .unwrap();

        assert_eq!(slots[0].price, Some(rupees(500)));
        assert_eq!(
            slots[1].price,
            Some(Money::new(Decimal::new(95, 1), Currency::Usd)),
        );
        assert_eq!(slots[2].price, None);
        assert_eq!(slots[3].price, None);
        assert!(slots[3].is_selectable());
    }

    #[test]
    fn generates_full_day() {
        let booked: BookedHours = [0, 7, 23].into_iter().collect();
        let day = DailySlots::generate(date!(2026 - 10 - 20), rupees(800), &booked);

        assert_eq!(day.slots.len(), 24);
        for (hour, slot) in (0..24).zip(&day.slots) {
            assert_eq!(slot.start, hour);
            assert_eq!(slot.end, hour + 1);
            assert_eq!(slot.available, !booked.contains(hour));
            assert_eq!(slot.price, Some(rupees(800)));
        }
        assert_eq!(day.slots[0].label(), "00:00 - 01:00");
        assert_eq!(day.slots[9].label(), "09:00 - 10:00");
        assert_eq!(day.slots[23].label(), "23:00 - 24:00");
    }

    #[test]
    fn generates_fully_available_day() {
        let day = DailySlots::generate(
            date!(2026 - 10 - 20),
            rupees(500),
            &BookedHours::default(),
        );
        assert_eq!(day.available_count(), 24);
    }

    #[test]
    fn counts_available_slots() {
        let day = busy_day();
        assert_eq!(day.available_count(), 16);
        assert_eq!(available_count(Some(&day.slots)), 16);
        assert!(has_available(Some(&day.slots)));
    }

    #[test]
    fn treats_missing_slots_as_unavailable() {
        assert_eq!(available_count(None), 0);
        assert!(!has_available(None));
        assert_eq!(available_count(Some(&[])), 0);
        assert!(!has_available(Some(&[])));
    }

    #[test]
    fn treats_booked_slots_as_unavailable() {
        let slots = [
            TimeSlot {
                start: 6,
                end: 7,
                available: true,
                booked: true,
                price: None,
            },
            TimeSlot {
                start: 7,
                end: 8,
                available: false,
                booked: false,
                price: None,
            },
        ];
        assert_eq!(available_count(Some(&slots)), 0);
        assert!(!has_available(Some(&slots)));
    }

    #[test]
    fn totals_selected_slots() {
        let day = busy_day();
        let selection = Selection::new()
            .toggle(6, &day.slots)
            .and_then(|s| s.toggle(7, &day.slots))
            .unwrap();

        assert_eq!(selection.indices(), &[6, 7]);
        assert_eq!(selection.total(&day.slots), rupees(1000));
    }

    #[test]
    fn totals_regardless_of_order() {
        let day = busy_day();
        let forward = [2, 6, 21]
            .into_iter()
            .try_fold(Selection::new(), |s, i| s.toggle(i, &day.slots))
            .unwrap();
        let backward = [21, 6, 2]
            .into_iter()
            .try_fold(Selection::new(), |s, i| s.toggle(i, &day.slots))
            .unwrap();

        assert_ne!(forward.indices(), backward.indices());
        assert_eq!(forward, backward);
        assert_eq!(forward.total(&day.slots), backward.total(&day.slots));
        assert_eq!(forward.total(&day.slots), rupees(1500));
    }

    #[test]
    fn totals_empty_selection_as_zero() {
        let day = busy_day();
        assert_eq!(
            Selection::new().total(&day.slots),
            Money::zero(Currency::Inr),
        );
    }

    #[test]
    fn rejects_unavailable_slots() {
        let day = busy_day();
        let selection = Selection::new().toggle(6, &day.slots).unwrap();

        assert_eq!(
            selection.clone().toggle(8, &day.slots),
            Err(InvalidSelection::Unavailable(8)),
        );
        assert_eq!(
            selection.toggle(24, &day.slots),
            Err(InvalidSelection::NotExists(24)),
        );
    }

    #[test]
    fn toggle_is_its_own_inverse() {
        let day = busy_day();
        let original = [3, 14, 1]
            .into_iter()
            .try_fold(Selection::new(), |s, i| s.toggle(i, &day.slots))
            .unwrap();

        for index in [0, 1, 3, 14, 22] {
            let twice = original
                .clone()
                .toggle(index, &day.slots)
                .and_then(|s| s.toggle(index, &day.slots))
                .unwrap();
            assert_eq!(twice, original, "toggling #{index} twice");
            assert_eq!(twice.total(&day.slots), original.total(&day.slots));
        }
    }

    #[test]
    fn deselects_slots_booked_meanwhile() {
        let mut day = busy_day();
        let selection = Selection::new().toggle(6, &day.slots).unwrap();
        day.slots[6].booked = true;

        assert_eq!(
            selection.validate(&day.slots),
            Err(InvalidSelection::Unavailable(6)),
        );
        assert!(selection.toggle(6, &day.slots).unwrap().is_empty());
    }

    #[test]
    fn selects_idempotently() {
        let day = busy_day();
        let selection = Selection::new()
            .select(6, &day.slots)
            .and_then(|s| s.select(6, &day.slots))
            .unwrap();
        assert_eq!(selection.indices(), &[6]);
    }

    #[test]
    fn lists_selected_slots_chronologically() {
        let day = busy_day();
        let selection = [21, 6, 7]
            .into_iter()
            .try_fold(Selection::new(), |s, i| s.toggle(i, &day.slots))
            .unwrap();

        let labels = selection
            .slots(&day.slots)
            .map(TimeSlot::label)
            .collect::<Vec<_>>();
        assert_eq!(
            labels,
            ["06:00 - 07:00", "07:00 - 08:00", "21:00 - 22:00"],
        );

        let morning = {
            let selection = selection.clone();
            selection.slots(&day.slots[..8])
        };
        assert_eq!(
            morning.map(|s| s.start).collect::<Vec<_>>(),
            [6, 7],
        );
    }

    #[test]
    fn date_selection_is_exclusive() {
        let range = DateSelection::range(date!(2026 - 10 - 22), date!(2026 - 10 - 20));
        assert_eq!(
            range,
            DateSelection::Range {
                start: date!(2026 - 10 - 20),
                end: date!(2026 - 10 - 22),
            },
        );
        assert_eq!(range.first_day(), date!(2026 - 10 - 20));

        let single = DateSelection::single(date!(2026 - 10 - 21));
        assert!(matches!(single, DateSelection::Single { .. }));
    }

    #[test]
    fn describes_dates() {
        assert_eq!(
            DateSelection::single(date!(2026 - 10 - 20)).describe(),
            "Tue Oct 20 2026",
        );
        assert_eq!(
            DateSelection::range(date!(2026 - 10 - 20), date!(2026 - 10 - 22))
                .describe(),
            "Tue Oct 20 2026 - Thu Oct 22 2026",
        );
    }
}
