use crate::models::{AggregateTable, OutputRow};

/// Turn the merged table into output rows ordered by station, then day
pub fn finalize(global: AggregateTable) -> Vec<OutputRow> {
    global
        .into_sorted()
        .into_iter()
        .map(|(key, aggregate)| OutputRow {
            station: key.station,
            date: key.day,
            min_temp: aggregate.min_temp,
            max_temp: aggregate.max_temp,
            first_temp: aggregate.first_temp,
            last_temp: aggregate.last_temp,
        })
        .collect()
}
