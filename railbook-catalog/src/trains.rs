use chrono::{NaiveDate, Utc};
use rand::Rng;
use railbook_shared::{Coach, LiveStatus, Seat, SeatStatus, SeatType, Train, TravelClass};
use serde::Deserialize;

/// Route search criteria from the booking form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainSearchQuery {
    pub origin: String,
    pub destination: String,
    /// Accepted for the booking flow but not used to filter; there is no
    /// per-date seat state.
    pub journey_date: Option<NaiveDate>,
    pub travel_class: Option<TravelClass>,
}

const STATUSES: [&str; 5] = [
    "On Time",
    "Delayed by 15 min",
    "Delayed by 30 min",
    "Delayed by 1 hr",
    "Cancelled",
];

const BERTH_CYCLE: [SeatType; 5] = [
    SeatType::Lower,
    SeatType::Middle,
    SeatType::Upper,
    SeatType::SideLower,
    SeatType::SideUpper,
];

/// Flat lookup over the train reference list, plus the synthetic seat-layout
/// and live-status generators. All randomness comes in through `rng` so tests
/// can seed it.
pub struct TrainCatalog {
    trains: Vec<Train>,
}

impl TrainCatalog {
    pub fn new(trains: Vec<Train>) -> Self {
        Self { trains }
    }

    /// Catalog over the built-in reference data.
    pub fn seeded() -> Self {
        Self::new(crate::seed::trains())
    }

    /// Trains whose origin and destination exactly match the query, narrowed
    /// by travel class when one is given. Each result's seat counts are
    /// independently reduced by a random 0..20 (floor 0) to simulate demand;
    /// repeated identical searches therefore report different availability.
    pub fn search(&self, query: &TrainSearchQuery, rng: &mut impl Rng) -> Vec<Train> {
        if query.origin.is_empty() || query.destination.is_empty() {
            return Vec::new();
        }
        self.trains
            .iter()
            .filter(|t| t.origin == query.origin && t.destination == query.destination)
            .filter(|t| query.travel_class.map_or(true, |c| t.offers_class(c)))
            .map(|t| {
                let mut found = t.clone();
                for count in found.available_seats.values_mut() {
                    *count = (*count - rng.gen_range(0..20)).max(0);
                }
                found
            })
            .collect()
    }

    pub fn get_by_id(&self, id: i64) -> Option<&Train> {
        self.trains.iter().find(|t| t.id == id)
    }

    pub fn get_by_train_number(&self, train_number: &str) -> Option<&Train> {
        self.trains.iter().find(|t| t.train_number == train_number)
    }

    /// Coach/seat grid for one class of a train. `None` when the train is
    /// unknown or does not offer the class. Occupancy is rolled fresh on
    /// every call; roughly 70% of seats come back available.
    pub fn seat_layout(
        &self,
        train_id: i64,
        class: TravelClass,
        rng: &mut impl Rng,
    ) -> Option<Vec<Coach>> {
        let train = self.get_by_id(train_id)?;
        if !train.offers_class(class) {
            return None;
        }
        let (coach_count, seats_per_coach) = class_topology(class);
        let coaches = (1..=coach_count)
            .map(|i| {
                let coach_name = format!("{}{}", class.coach_prefix(), i);
                let seats = (1..=seats_per_coach)
                    .map(|j| Seat {
                        seat_number: format!("{}-{}", coach_name, j),
                        status: if rng.gen_bool(0.7) {
                            SeatStatus::Available
                        } else {
                            SeatStatus::Occupied
                        },
                        seat_type: seat_type_for(class, j),
                    })
                    .collect();
                Coach { coach_name, seats }
            })
            .collect();
        Some(coaches)
    }

    /// Simulated running status: a uniform pick from the fixed status set, a
    /// platform between 1 and 10, and a placeholder next station. Always
    /// produces a value for a known train number.
    pub fn live_status(&self, train_number: &str, rng: &mut impl Rng) -> Option<LiveStatus> {
        let train = self.get_by_train_number(train_number)?;
        Some(LiveStatus {
            train: train.clone(),
            current_status: STATUSES[rng.gen_range(0..STATUSES.len())].to_string(),
            platform: rng.gen_range(1..=10),
            next_station: "Intermediate Station".to_string(),
            last_updated: Utc::now(),
        })
    }
}

/// (coach count, seats per coach) for each class.
pub fn class_topology(class: TravelClass) -> (usize, usize) {
    match class {
        TravelClass::FirstAc => (4, 6),
        TravelClass::SecondAc => (6, 8),
        TravelClass::ThirdAc => (8, 9),
        TravelClass::Sleeper => (12, 8),
        TravelClass::ChairCar => (4, 12),
        TravelClass::ExecutiveChair => (2, 12),
    }
}

/// Berth assignment cycles through the berth list keyed on the 1-based seat
/// number, so seat 1 is Middle and seat 5 wraps back to Lower.
fn seat_type_for(class: TravelClass, seat_number: usize) -> SeatType {
    if class.is_chair_class() {
        SeatType::Chair
    } else {
        BERTH_CYCLE[seat_number % BERTH_CYCLE.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn catalog() -> TrainCatalog {
        TrainCatalog::seeded()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn query(origin: &str, destination: &str, class: Option<TravelClass>) -> TrainSearchQuery {
        TrainSearchQuery {
            origin: origin.to_string(),
            destination: destination.to_string(),
            journey_date: None,
            travel_class: class,
        }
    }

    #[test]
    fn search_matches_route_exactly() {
        let results = catalog().search(&query("NDLS", "HWH", None), &mut rng());
        assert_eq!(results.len(), 2);
        for t in &results {
            assert_eq!(t.origin, "NDLS");
            assert_eq!(t.destination, "HWH");
        }
    }

    #[test]
    fn search_applies_class_filter() {
        let results = catalog().search(&query("NDLS", "HWH", Some(TravelClass::FirstAc)), &mut rng());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].train_number, "12301");
    }

    #[test]
    fn search_rejects_blank_endpoints() {
        assert!(catalog().search(&query("", "HWH", None), &mut rng()).is_empty());
        assert!(catalog().search(&query("NDLS", "", None), &mut rng()).is_empty());
    }

    #[test]
    fn search_never_reports_negative_seats() {
        let catalog = catalog();
        let mut rng = rng();
        for _ in 0..50 {
            for t in catalog.search(&query("NDLS", "HWH", None), &mut rng) {
                let reference = catalog.get_by_id(t.id).unwrap();
                for (class, count) in &t.available_seats {
                    assert!(*count >= 0);
                    assert!(count <= &reference.available_seats[class]);
                }
            }
        }
    }

    #[test]
    fn seat_layout_matches_class_topology() {
        let catalog = catalog();
        let mut rng = rng();
        let cases = [
            (1, TravelClass::FirstAc, 4, 6),
            (1, TravelClass::SecondAc, 6, 8),
            (1, TravelClass::ThirdAc, 8, 9),
            (2, TravelClass::Sleeper, 12, 8),
            (4, TravelClass::ChairCar, 4, 12),
            (4, TravelClass::ExecutiveChair, 2, 12),
        ];
        for (train_id, class, coaches, per_coach) in cases {
            let layout = catalog.seat_layout(train_id, class, &mut rng).unwrap();
            assert_eq!(layout.len(), coaches, "{class}");
            for coach in &layout {
                assert_eq!(coach.seats.len(), per_coach, "{class}");
            }
        }
    }

    #[test]
    fn seat_numbers_are_unique_within_a_layout() {
        let layout = catalog()
            .seat_layout(2, TravelClass::Sleeper, &mut rng())
            .unwrap();
        let mut seen = HashSet::new();
        for seat in layout.iter().flat_map(|c| &c.seats) {
            assert!(seen.insert(seat.seat_number.clone()), "{}", seat.seat_number);
        }
        assert_eq!(seen.len(), 12 * 8);
    }

    #[test]
    fn seat_layout_missing_class_returns_none() {
        // Train 1 is a Rajdhani; no chair car.
        assert!(catalog()
            .seat_layout(1, TravelClass::ChairCar, &mut rng())
            .is_none());
        assert!(catalog()
            .seat_layout(999, TravelClass::Sleeper, &mut rng())
            .is_none());
    }

    #[test]
    fn berth_cycle_keys_on_seat_number() {
        let layout = catalog()
            .seat_layout(1, TravelClass::FirstAc, &mut rng())
            .unwrap();
        let seats = &layout[0].seats;
        assert_eq!(seats[0].seat_type, SeatType::Middle); // seat 1
        assert_eq!(seats[4].seat_type, SeatType::Lower); // seat 5 wraps
        assert_eq!(seats[5].seat_type, SeatType::Middle); // seat 6
    }

    #[test]
    fn chair_classes_only_have_chairs() {
        let layout = catalog()
            .seat_layout(4, TravelClass::ChairCar, &mut rng())
            .unwrap();
        assert!(layout
            .iter()
            .flat_map(|c| &c.seats)
            .all(|s| s.seat_type == SeatType::Chair));
    }

    #[test]
    fn layout_emits_only_available_or_occupied() {
        let layout = catalog()
            .seat_layout(2, TravelClass::Sleeper, &mut rng())
            .unwrap();
        assert!(layout
            .iter()
            .flat_map(|c| &c.seats)
            .all(|s| matches!(s.status, SeatStatus::Available | SeatStatus::Occupied)));
    }

    #[test]
    fn live_status_always_produces_a_value_for_known_trains() {
        let catalog = catalog();
        let mut rng = rng();
        for _ in 0..20 {
            let status = catalog.live_status("12301", &mut rng).unwrap();
            assert!(STATUSES.contains(&status.current_status.as_str()));
            assert!((1..=10).contains(&status.platform));
            assert_eq!(status.next_station, "Intermediate Station");
        }
        assert!(catalog.live_status("00000", &mut rng).is_none());
    }
}
