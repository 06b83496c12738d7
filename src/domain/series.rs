// Scalar time series - per-category values without the share invariant
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesRow {
    pub time: NaiveDate,
    pub category: String,
    pub value: f64,
}

impl SeriesRow {
    pub fn new(time: NaiveDate, category: String, value: f64) -> Self {
        Self {
            time,
            category,
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesTable {
    pub dimension: String,
    pub categories: Vec<String>,
    pub rows: Vec<SeriesRow>,
}

impl SeriesTable {
    pub fn new(dimension: String, categories: Vec<String>, rows: Vec<SeriesRow>) -> Self {
        Self {
            dimension,
            categories,
            rows,
        }
    }
}
