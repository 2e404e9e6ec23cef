use chrono::{NaiveDate, NaiveDateTime};
use std::cmp::Ordering;

/// A single temperature reading from one station
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub station: String,
    pub timestamp: NaiveDateTime,
    pub temperature: f32,
}

impl Record {
    pub fn new(station: impl Into<String>, timestamp: NaiveDateTime, temperature: f32) -> Self {
        Self {
            station: station.into(),
            timestamp,
            temperature,
        }
    }

    /// Calendar day the reading falls on
    pub fn day(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub fn day_key(&self) -> DayKey {
        DayKey::new(self.station.clone(), self.day())
    }
}

/// Aggregation key: one station on one calendar day.
///
/// Keys order by station name (byte order, case-sensitive) and then by day,
/// which is also the order output rows are emitted in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DayKey {
    pub station: String,
    pub day: NaiveDate,
}

impl DayKey {
    pub fn new(station: impl Into<String>, day: NaiveDate) -> Self {
        Self {
            station: station.into(),
            day,
        }
    }
}

impl Ord for DayKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.station
            .as_bytes()
            .cmp(other.station.as_bytes())
            .then_with(|| self.day.cmp(&other.day))
    }
}

impl PartialOrd for DayKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_record_day_floors_timestamp() {
        let record = Record::new("Oak Street Weather Station", ts(2016, 5, 22, 23), 14.5);
        assert_eq!(record.day(), NaiveDate::from_ymd_opt(2016, 5, 22).unwrap());

        let key = record.day_key();
        assert_eq!(key.station, "Oak Street Weather Station");
        assert_eq!(key.day, record.day());
    }

    #[test]
    fn test_day_key_orders_by_station_then_day() {
        let jan1 = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let jan2 = NaiveDate::from_ymd_opt(2000, 1, 2).unwrap();

        let mut keys = vec![
            DayKey::new("foster", jan1),
            DayKey::new("Foster", jan2),
            DayKey::new("Foster", jan1),
            DayKey::new("63rd Street", jan2),
        ];
        keys.sort();

        // Digits sort before upper case, upper case before lower case
        assert_eq!(
            keys,
            vec![
                DayKey::new("63rd Street", jan2),
                DayKey::new("Foster", jan1),
                DayKey::new("Foster", jan2),
                DayKey::new("foster", jan1),
            ]
        );
    }
}
