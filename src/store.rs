use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use crate::bookings::Booking;
use crate::classes::Class;
use crate::table::Table;

/// All records served by the API, owned by Rocket managed state.
#[derive(Debug, Clone, Default)]
pub struct Store {
    pub classes: Table<Class>,
    pub bookings: Table<Booking>,
}
impl Store {
    pub fn with_sample_data() -> Self {
        let classes = vec![
            Class { id: 1, name: "Yoga".to_string(), start_date: utc(2023, 10, 6, 16), end_date: utc(2023, 10, 16, 17), capacity: 10 },
            Class { id: 2, name: "Pilates".to_string(), start_date: utc(2023, 10, 7, 20), end_date: utc(2023, 10, 10, 21), capacity: 8 },
            Class { id: 3, name: "Boxing".to_string(), start_date: utc(2023, 10, 11, 11), end_date: utc(2023, 10, 12, 12), capacity: 12 },
        ];
        let bookings = vec![
            Booking { id: 1, name: "Diego".to_string(), class_id: 1, date: utc(2023, 10, 6, 16) },
            Booking { id: 2, name: "Martin".to_string(), class_id: 2, date: utc(2023, 10, 7, 20) },
            Booking { id: 3, name: "Joaquin".to_string(), class_id: 3, date: utc(2023, 10, 11, 11) },
        ];
        Self {
            classes: Table::from_records(classes),
            bookings: Table::from_records(bookings),
        }
    }
}

fn utc(year: i32, month: u32, day: u32, hour: u32) -> DateTime<FixedOffset> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .map(|dt| dt.fixed_offset())
        .unwrap_or_default()
}

/// Confirmation returned by delete endpoints.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DeletedBody {
    pub message: String,
}
impl DeletedBody {
    pub fn new(message: &str) -> Self {
        Self { message: message.to_string() }
    }
}
