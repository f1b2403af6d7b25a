//! Built-in reference data for the station directory and train catalog.
//! Stand-in for a real timetable feed; ids are stable so bookings created
//! against this data stay resolvable.

use railbook_shared::{Station, Train, TravelClass};
use std::collections::HashMap;

pub fn stations() -> Vec<Station> {
    let rows: [(i64, &str, &str, &str); 10] = [
        (1, "NDLS", "New Delhi", "New Delhi"),
        (2, "CSMT", "Chhatrapati Shivaji Maharaj Terminus", "Mumbai"),
        (3, "BCT", "Mumbai Central", "Mumbai"),
        (4, "HWH", "Howrah Junction", "Kolkata"),
        (5, "MAS", "MGR Chennai Central", "Chennai"),
        (6, "SBC", "KSR Bengaluru City Junction", "Bengaluru"),
        (7, "PUNE", "Pune Junction", "Pune"),
        (8, "JP", "Jaipur Junction", "Jaipur"),
        (9, "ADI", "Ahmedabad Junction", "Ahmedabad"),
        (10, "LKO", "Lucknow Charbagh", "Lucknow"),
    ];
    rows.into_iter()
        .map(|(id, code, name, city)| Station {
            id,
            code: code.to_string(),
            name: name.to_string(),
            city: city.to_string(),
        })
        .collect()
}

type ClassRow = (TravelClass, i64, i64); // class, seats, fare

#[allow(clippy::too_many_arguments)]
fn train(
    id: i64,
    train_number: &str,
    train_name: &str,
    origin: &str,
    destination: &str,
    departure_time: &str,
    arrival_time: &str,
    duration: &str,
    classes: &[ClassRow],
) -> Train {
    let mut available_seats = HashMap::new();
    let mut fare = HashMap::new();
    for &(class, seats, price) in classes {
        available_seats.insert(class, seats);
        fare.insert(class, price);
    }
    Train {
        id,
        train_number: train_number.to_string(),
        train_name: train_name.to_string(),
        origin: origin.to_string(),
        destination: destination.to_string(),
        departure_time: departure_time.to_string(),
        arrival_time: arrival_time.to_string(),
        duration: duration.to_string(),
        classes: classes.iter().map(|&(c, _, _)| c).collect(),
        available_seats,
        fare,
    }
}

pub fn trains() -> Vec<Train> {
    use TravelClass::*;
    vec![
        train(
            1, "12301", "Howrah Rajdhani Express", "NDLS", "HWH",
            "16:55", "09:55", "17h0m",
            &[(FirstAc, 18, 4565), (SecondAc, 52, 2820), (ThirdAc, 124, 1950)],
        ),
        train(
            2, "12303", "Poorva Express", "NDLS", "HWH",
            "17:35", "16:40", "23h5m",
            &[(SecondAc, 46, 2190), (ThirdAc, 110, 1480), (Sleeper, 340, 560)],
        ),
        train(
            3, "12951", "Mumbai Rajdhani Express", "BCT", "NDLS",
            "17:00", "08:32", "15h32m",
            &[(FirstAc, 22, 4910), (SecondAc, 58, 2950), (ThirdAc, 130, 2080)],
        ),
        train(
            4, "12004", "Lucknow Shatabdi Express", "NDLS", "LKO",
            "06:10", "12:40", "6h30m",
            &[(ChairCar, 220, 880), (ExecutiveChair, 48, 1760)],
        ),
        train(
            5, "12015", "Ajmer Shatabdi Express", "NDLS", "JP",
            "06:05", "10:30", "4h25m",
            &[(ChairCar, 190, 745), (ExecutiveChair, 40, 1475)],
        ),
        train(
            6, "12627", "Karnataka Express", "NDLS", "SBC",
            "21:15", "13:00", "39h45m",
            &[(SecondAc, 48, 3120), (ThirdAc, 118, 2210), (Sleeper, 360, 845)],
        ),
        train(
            7, "11301", "Udyan Express", "CSMT", "SBC",
            "08:10", "07:50", "23h40m",
            &[(SecondAc, 44, 2480), (ThirdAc, 102, 1745), (Sleeper, 310, 650)],
        ),
        train(
            8, "12957", "Swarna Jayanti Rajdhani", "ADI", "NDLS",
            "17:40", "07:30", "13h50m",
            &[(FirstAc, 16, 4280), (SecondAc, 50, 2640), (ThirdAc, 120, 1830)],
        ),
        train(
            9, "12839", "Howrah Mail", "HWH", "MAS",
            "23:45", "03:50", "28h5m",
            &[(SecondAc, 42, 2710), (ThirdAc, 108, 1905), (Sleeper, 330, 720)],
        ),
    ]
}
