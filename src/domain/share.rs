// Share tables - proportions that sum to one per time bucket
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareRow {
    pub time: NaiveDate,
    pub category: String,
    pub proportion: f64,
}

impl ShareRow {
    pub fn new(time: NaiveDate, category: String, proportion: f64) -> Self {
        Self {
            time,
            category,
            proportion,
        }
    }
}

/// Rows for one (time buckets x categories) pair, bucket-major, category order
/// preserved inside each bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareTable {
    pub dimension: String,
    pub categories: Vec<String>,
    pub rows: Vec<ShareRow>,
}

impl ShareTable {
    pub fn new(dimension: String, categories: Vec<String>, rows: Vec<ShareRow>) -> Self {
        Self {
            dimension,
            categories,
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// One slice of rows per time bucket.
    pub fn buckets(&self) -> impl Iterator<Item = &[ShareRow]> {
        self.rows.chunks(self.categories.len().max(1))
    }

    /// Sum of proportions per time bucket.
    pub fn bucket_totals(&self) -> Vec<(NaiveDate, f64)> {
        self.buckets()
            .map(|group| (group[0].time, group.iter().map(|r| r.proportion).sum()))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SharePoint {
    pub category: String,
    pub proportion: f64,
}

/// A simplex point without a time axis (e.g. spend brackets).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareBreakdown {
    pub dimension: String,
    pub shares: Vec<SharePoint>,
}

impl ShareBreakdown {
    pub fn new(dimension: String, shares: Vec<SharePoint>) -> Self {
        Self { dimension, shares }
    }

    pub fn total(&self) -> f64 {
        self.shares.iter().map(|s| s.proportion).sum()
    }
}
