use crate::utils::constants::{
    OUTPUT_DATE_COLUMN, OUTPUT_DATE_FORMAT, OUTPUT_FIRST_COLUMN, OUTPUT_LAST_COLUMN,
    OUTPUT_MAX_COLUMN, OUTPUT_MIN_COLUMN, OUTPUT_STATION_COLUMN,
};
use chrono::NaiveDate;
use serde::{Serialize, Serializer};

/// One aggregated station-day, ready for serialization
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputRow {
    #[serde(rename = "Station Name")]
    pub station: String,

    #[serde(rename = "Date", serialize_with = "serialize_output_date")]
    pub date: NaiveDate,

    #[serde(rename = "Min Temp")]
    pub min_temp: f32,

    #[serde(rename = "Max Temp")]
    pub max_temp: f32,

    #[serde(rename = "First Temp")]
    pub first_temp: f32,

    #[serde(rename = "Last Temp")]
    pub last_temp: f32,
}

impl OutputRow {
    pub const HEADER: [&'static str; 6] = [
        OUTPUT_STATION_COLUMN,
        OUTPUT_DATE_COLUMN,
        OUTPUT_MIN_COLUMN,
        OUTPUT_MAX_COLUMN,
        OUTPUT_FIRST_COLUMN,
        OUTPUT_LAST_COLUMN,
    ];

    /// Day rendered as `MM/DD/YYYY`
    pub fn date_string(&self) -> String {
        self.date.format(OUTPUT_DATE_FORMAT).to_string()
    }
}

fn serialize_output_date<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&date.format(OUTPUT_DATE_FORMAT))
}
