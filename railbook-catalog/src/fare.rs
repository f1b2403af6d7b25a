use railbook_shared::{FareBreakdown, Train, TravelClass};

pub const DEFAULT_TAX_RATE: f64 = 0.05;

/// Pure fare arithmetic: per-class fare times head count plus a fixed
/// percentage tax, floored to whole rupees.
#[derive(Debug, Clone)]
pub struct FareCalculator {
    tax_rate: f64,
}

impl FareCalculator {
    pub fn new(tax_rate: f64) -> Self {
        Self { tax_rate }
    }

    /// All-zero breakdown when the train is unknown or carries no fare for
    /// the class; the caller decides whether that is an error.
    pub fn calculate(
        &self,
        train: Option<&Train>,
        class: TravelClass,
        passenger_count: u32,
    ) -> FareBreakdown {
        let per_seat = match train.and_then(|t| t.fare.get(&class)) {
            Some(f) => *f,
            None => return FareBreakdown::ZERO,
        };
        let base_fare = per_seat * passenger_count as i64;
        let taxes = (base_fare as f64 * self.tax_rate).floor() as i64;
        FareBreakdown {
            base_fare,
            taxes,
            total: base_fare + taxes,
        }
    }
}

impl Default for FareCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_TAX_RATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TrainCatalog;

    #[test]
    fn tax_is_floored_five_percent() {
        let catalog = TrainCatalog::seeded();
        let calc = FareCalculator::default();
        // 12303 sleeper is 560/seat; 2 passengers -> base 1120, tax 56.
        let train = catalog.get_by_train_number("12303");
        let fare = calc.calculate(train, TravelClass::Sleeper, 2);
        assert_eq!(fare.base_fare, 1120);
        assert_eq!(fare.taxes, 56);
        assert_eq!(fare.total, 1176);
    }

    #[test]
    fn thousand_rupee_base_yields_fifty_tax() {
        let mut train = TrainCatalog::seeded().get_by_id(1).unwrap().clone();
        train.fare.insert(TravelClass::FirstAc, 1000);
        let fare = FareCalculator::default().calculate(Some(&train), TravelClass::FirstAc, 1);
        assert_eq!(fare.taxes, 50);
        assert_eq!(fare.total, 1050);
    }

    #[test]
    fn monotonic_in_passenger_count() {
        let catalog = TrainCatalog::seeded();
        let calc = FareCalculator::default();
        let train = catalog.get_by_id(1);
        let mut previous = 0;
        for n in 0..8 {
            let total = calc.calculate(train, TravelClass::ThirdAc, n).total;
            assert!(total >= previous);
            previous = total;
        }
    }

    #[test]
    fn unknown_train_or_class_is_zeroed() {
        let catalog = TrainCatalog::seeded();
        let calc = FareCalculator::default();
        assert_eq!(calc.calculate(None, TravelClass::Sleeper, 3), FareBreakdown::ZERO);
        // Train 1 has no chair car fare.
        let train = catalog.get_by_id(1);
        assert_eq!(
            calc.calculate(train, TravelClass::ChairCar, 3),
            FareBreakdown::ZERO
        );
    }
}
