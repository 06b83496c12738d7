// Calendar buckets used as the x-axis of every time-series view
use super::error::GenerationError;
use chrono::{Datelike, Months, NaiveDate};
use serde::Deserialize;

/// Which day of the month a monthly bucket is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthAnchor {
    MonthStart,
    #[default]
    MonthEnd,
}

/// Build `periods` consecutive monthly buckets, starting at the month of `start`.
///
/// Stops with `InvalidInput` at the first month outside chrono's date range.
pub fn monthly_buckets(
    start: NaiveDate,
    periods: usize,
    anchor: MonthAnchor,
) -> Result<Vec<NaiveDate>, GenerationError> {
    let first = start
        .with_day(1)
        .ok_or_else(|| out_of_range(start, periods))?;

    let mut buckets = Vec::new();
    for offset in 0..periods {
        let offset = u32::try_from(offset).map_err(|_| out_of_range(start, periods))?;
        let bucket = match anchor {
            MonthAnchor::MonthStart => first.checked_add_months(Months::new(offset)),
            MonthAnchor::MonthEnd => offset
                .checked_add(1)
                .and_then(|next| first.checked_add_months(Months::new(next)))
                .and_then(|next_first| next_first.pred_opt()),
        };
        buckets.push(bucket.ok_or_else(|| out_of_range(start, periods))?);
    }

    Ok(buckets)
}

/// Parse a `YYYY-MM` (or full `YYYY-MM-DD`) calendar start.
pub fn parse_start(raw: &str) -> Result<NaiveDate, GenerationError> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d"))
        .map_err(|_| GenerationError::invalid(format!("unparseable calendar start '{}'", raw)))
}

fn out_of_range(start: NaiveDate, periods: usize) -> GenerationError {
    GenerationError::invalid(format!(
        "{} monthly buckets from {} run past the supported date range",
        periods, start
    ))
}
