//! Rail API DTOs.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Deserialize;

/// Parameters for a trains-between-stations search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainSearchRequest {
    pub from_station: String,
    pub to_station: String,
    pub date: NaiveDate,
}

/// Parameters for a seat-availability lookup on one train.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatAvailabilityRequest {
    pub train_number: String,
    pub class_code: String,
    pub date: NaiveDate,
    pub from_station: String,
    pub to_station: String,
    pub quota: String,
}

/// A train row from the search API.
///
/// The API uses snake_case names; times are local "HH:MM" strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTrain {
    pub train_number: String,

    #[serde(default)]
    pub train_name: Option<String>,

    /// Scheduled departure from the origin station.
    #[serde(default)]
    pub from_std: Option<String>,

    /// Scheduled arrival at the destination station.
    #[serde(default)]
    pub to_sta: Option<String>,

    /// Travel time, "HH:MM".
    #[serde(default)]
    pub duration: Option<String>,

    /// Class codes the train carries ("SL", "3A", ...). Empty when the API
    /// leaves them out.
    #[serde(default)]
    pub class_type: Vec<String>,

    /// Fare by class code, when the API includes it.
    #[serde(default)]
    pub fares: Option<HashMap<String, f64>>,
}

impl RawTrain {
    /// Whether the train may carry `class_code`. A row without class data
    /// is given the benefit of the doubt.
    pub fn may_carry(&self, class_code: &str) -> bool {
        self.class_type.is_empty()
            || self
                .class_type
                .iter()
                .any(|c| c.trim().eq_ignore_ascii_case(class_code))
    }
}

/// One date's availability for a train and class.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvailabilityRow {
    /// Raw status text, e.g. "AVAILABLE-0042" or "GNWL 12/WL 8".
    #[serde(default)]
    pub current_status: Option<String>,

    #[serde(default)]
    pub total_fare: Option<f64>,
}
