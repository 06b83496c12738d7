// Jittered-series generator - random base per bucket plus bounded per-category jitter
use crate::application::random_source::UniformSource;
use crate::domain::error::GenerationError;
use crate::domain::series::{SeriesRow, SeriesTable};
use chrono::NaiveDate;

/// Integer ranges are half-open: `(low, high)` draws from `[low, high)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JitterSpec {
    pub base: (i64, i64),
    pub jitter: (i64, i64),
    pub floor: Option<i64>,
    pub ceiling: Option<i64>,
    pub scale: f64,
}

impl JitterSpec {
    pub fn validate(&self, dimension: &str) -> Result<(), GenerationError> {
        for (name, (low, high)) in [("base", self.base), ("jitter", self.jitter)] {
            if low >= high {
                return Err(GenerationError::invalid(format!(
                    "'{}' {} range [{}, {}) is empty",
                    dimension, name, low, high
                )));
            }
        }

        // Extreme draws are base.0 + jitter.0 and (base.1 - 1) + (jitter.1 - 1)
        let lowest = self.base.0.checked_add(self.jitter.0);
        let highest = (self.base.1 - 1).checked_add(self.jitter.1 - 1);
        if lowest.is_none() || highest.is_none() {
            return Err(GenerationError::invalid(format!(
                "'{}' base {:?} plus jitter {:?} overflows",
                dimension, self.base, self.jitter
            )));
        }

        if let (Some(floor), Some(ceiling)) = (self.floor, self.ceiling) {
            if floor > ceiling {
                return Err(GenerationError::invalid(format!(
                    "'{}' floor {} is above ceiling {}",
                    dimension, floor, ceiling
                )));
            }
        }

        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(GenerationError::invalid(format!(
                "'{}' scale must be positive, got {}",
                dimension, self.scale
            )));
        }

        Ok(())
    }

    fn clip(&self, raw: i64) -> i64 {
        let raw = self.floor.map_or(raw, |floor| raw.max(floor));
        self.ceiling.map_or(raw, |ceiling| raw.min(ceiling))
    }
}

pub fn generate_jittered_series<R: UniformSource + ?Sized>(
    dimension: &str,
    buckets: &[NaiveDate],
    categories: &[String],
    spec: &JitterSpec,
    rng: &mut R,
) -> Result<SeriesTable, GenerationError> {
    if categories.is_empty() {
        return Err(GenerationError::invalid(format!(
            "series table '{}' has no categories",
            dimension
        )));
    }
    spec.validate(dimension)?;

    let capacity = buckets.len().checked_mul(categories.len()).ok_or_else(|| {
        GenerationError::invalid(format!("series table '{}' is too large to allocate", dimension))
    })?;
    let mut rows = Vec::with_capacity(capacity);
    for &time in buckets {
        let base = rng.next_int(spec.base.0, spec.base.1);
        for category in categories {
            let jitter = rng.next_int(spec.jitter.0, spec.jitter.1);
            let value = spec.clip(base + jitter) as f64 / spec.scale;
            rows.push(SeriesRow::new(time, category.clone(), value));
        }
    }

    tracing::debug!(
        "Generated series table '{}': {} rows",
        dimension,
        rows.len()
    );

    Ok(SeriesTable::new(dimension.to_string(), categories.to_vec(), rows))
}
