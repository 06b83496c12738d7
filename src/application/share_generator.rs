// Share-series generator - random simplex points per time bucket
use crate::application::random_source::UniformSource;
use crate::domain::error::GenerationError;
use crate::domain::share::{ShareBreakdown, SharePoint, ShareRow, ShareTable};
use chrono::NaiveDate;

/// Draw `k` independent uniform values and normalize them to sum to one.
///
/// An all-zero draw falls back to the uniform point `1/k`.
pub fn draw_simplex<R: UniformSource + ?Sized>(
    k: usize,
    rng: &mut R,
) -> Result<Vec<f64>, GenerationError> {
    if k == 0 {
        return Err(GenerationError::invalid(
            "cannot normalize shares over an empty category set",
        ));
    }

    let draws: Vec<f64> = (0..k).map(|_| rng.next_unit()).collect();
    let total: f64 = draws.iter().sum();

    if total <= 0.0 {
        return Ok(vec![1.0 / k as f64; k]);
    }

    Ok(draws.into_iter().map(|v| v / total).collect())
}

/// Generate one share row per (bucket, category), bucket-major.
pub fn generate_share_table<R: UniformSource + ?Sized>(
    dimension: &str,
    buckets: &[NaiveDate],
    categories: &[String],
    rng: &mut R,
) -> Result<ShareTable, GenerationError> {
    if categories.is_empty() {
        return Err(GenerationError::invalid(format!(
            "share table '{}' has no categories",
            dimension
        )));
    }

    let capacity = buckets.len().checked_mul(categories.len()).ok_or_else(|| {
        GenerationError::invalid(format!("share table '{}' is too large to allocate", dimension))
    })?;
    let mut rows = Vec::with_capacity(capacity);
    for &time in buckets {
        let shares = draw_simplex(categories.len(), rng)?;
        for (category, proportion) in categories.iter().zip(shares) {
            rows.push(ShareRow::new(time, category.clone(), proportion));
        }
    }

    let table = ShareTable::new(dimension.to_string(), categories.to_vec(), rows);
    debug_assert!(table.bucket_totals().iter().all(|(_, total)| (total - 1.0).abs() < 1e-9));

    tracing::debug!(
        "Generated share table '{}': {} rows over {} categories",
        dimension,
        table.len(),
        categories.len()
    );

    Ok(table)
}

/// A single simplex draw labelled by category, with no time axis.
pub fn generate_share_breakdown<R: UniformSource + ?Sized>(
    dimension: &str,
    categories: &[String],
    rng: &mut R,
) -> Result<ShareBreakdown, GenerationError> {
    if categories.is_empty() {
        return Err(GenerationError::invalid(format!(
            "share breakdown '{}' has no categories",
            dimension
        )));
    }

    let shares = draw_simplex(categories.len(), rng)?
        .into_iter()
        .zip(categories)
        .map(|(proportion, category)| SharePoint {
            category: category.clone(),
            proportion,
        })
        .collect();

    Ok(ShareBreakdown::new(dimension.to_string(), shares))
}
