use crate::models::{AggregateTable, Record};

/// Reduce one chunk to a table of per-station, per-day partial aggregates.
///
/// Records are folded in chunk order, so within a key the earliest record
/// supplies `first` and the latest supplies `last`.
pub fn aggregate_chunk(chunk: &[Record]) -> AggregateTable {
    let mut table = AggregateTable::new();

    for record in chunk {
        table.record_reading(record.day_key(), record.temperature, record.timestamp);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DayKey;
    use chrono::{NaiveDate, NaiveDateTime};

    fn ts(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2000, 1, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_empty_chunk_gives_empty_table() {
        assert!(aggregate_chunk(&[]).is_empty());
    }

    #[test]
    fn test_groups_by_station_and_day() {
        let chunk = vec![
            Record::new("Foster", ts(1, 22), 5.0),
            Record::new("Oak", ts(1, 22), 8.0),
            Record::new("Foster", ts(1, 23), 3.0),
            Record::new("Foster", ts(2, 0), 1.0),
            Record::new("Oak", ts(1, 23), 9.5),
        ];

        let table = aggregate_chunk(&chunk);
        assert_eq!(table.len(), 3);

        let foster_day1 = table.get(&DayKey::new("Foster", ts(1, 0).date())).unwrap();
        assert_eq!(foster_day1.min_temp, 3.0);
        assert_eq!(foster_day1.max_temp, 5.0);
        assert_eq!(foster_day1.first_temp, 5.0);
        assert_eq!(foster_day1.last_temp, 3.0);
        assert_eq!(foster_day1.first_ts, ts(1, 22));
        assert_eq!(foster_day1.last_ts, ts(1, 23));

        let foster_day2 = table.get(&DayKey::new("Foster", ts(2, 0).date())).unwrap();
        assert_eq!(foster_day2.first_temp, 1.0);
        assert_eq!(foster_day2.last_temp, 1.0);

        let oak = table.get(&DayKey::new("Oak", ts(1, 0).date())).unwrap();
        assert_eq!((oak.min_temp, oak.max_temp), (8.0, 9.5));
        assert_eq!((oak.first_temp, oak.last_temp), (8.0, 9.5));
    }

    #[test]
    fn test_specific_day_values() {
        let temps = [12.0, 4.0, 7.0, 8.0, 2.0, 13.0, 7.0, 5.0, 3.0, 10.0, 9.0, 8.0, 4.0];
        let chunk: Vec<Record> = temps
            .iter()
            .enumerate()
            .map(|(hour, &t)| Record::new("Foster Weather Station", ts(1, hour as u32), t))
            .collect();

        let table = aggregate_chunk(&chunk);
        let agg = table
            .get(&DayKey::new("Foster Weather Station", ts(1, 0).date()))
            .unwrap();

        assert_eq!(agg.min_temp, 2.0);
        assert_eq!(agg.max_temp, 13.0);
        assert_eq!(agg.first_temp, 12.0);
        assert_eq!(agg.last_temp, 4.0);
    }
}
