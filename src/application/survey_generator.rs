// Survey snapshot builder - runs every generator against one random source
use crate::application::random_source::UniformSource;
use crate::application::series_generator::generate_jittered_series;
use crate::application::share_generator::{generate_share_breakdown, generate_share_table};
use crate::domain::calendar::{monthly_buckets, parse_start};
use crate::domain::error::GenerationError;
use crate::domain::occasion::{OccasionProfile, Score};
use crate::domain::share::{ShareBreakdown, SharePoint};
use crate::domain::snapshot::SurveySnapshot;
use crate::infrastructure::config::{OccasionConfig, StaticSharesConfig, SurveyConfig};
use std::collections::HashSet;

const SHARE_TOLERANCE: f64 = 1e-9;

/// Build the full snapshot. The order of draws is fixed, so a given seed always
/// yields the same snapshot.
pub fn build_snapshot<R: UniformSource + ?Sized>(
    config: &SurveyConfig,
    rng: &mut R,
) -> Result<SurveySnapshot, GenerationError> {
    let start = parse_start(&config.calendar.start)?;
    let buckets = monthly_buckets(start, config.calendar.periods, config.calendar.anchor)?;

    // Static tables first: a bad lookup should fail before any draw happens
    let non_essential_share = static_breakdown(&config.non_essential_share)?;
    let occasions = occasion_profiles(&config.occasions)?;

    let shares = &config.shares;
    let channels = generate_share_table(&shares.channels.label, &buckets, &shares.channels.categories, rng)?;
    let motivators = generate_share_table(&shares.motivators.label, &buckets, &shares.motivators.categories, rng)?;
    let media_habits =
        generate_share_table(&shares.media_habits.label, &buckets, &shares.media_habits.categories, rng)?;
    let purpose = generate_share_table(&shares.purpose.label, &buckets, &shares.purpose.categories, rng)?;

    let ticket = &config.regional_ticket;
    let regional_ticket = generate_jittered_series(&ticket.label, &buckets, &ticket.categories, &ticket.spec(), rng)?;

    let spend_intent =
        generate_share_breakdown(&config.spend_intent.label, &config.spend_intent.categories, rng)?;

    let brands = &config.brand_consideration;
    let brand_consideration =
        generate_jittered_series(&brands.label, &buckets, &brands.categories, &brands.spec(), rng)?;

    tracing::info!(
        "Generated survey snapshot: {} buckets from {}, {} occasions",
        buckets.len(),
        start,
        occasions.len()
    );

    Ok(SurveySnapshot {
        buckets,
        channels,
        motivators,
        media_habits,
        purpose,
        regional_ticket,
        spend_intent,
        brand_consideration,
        non_essential_share,
        occasions,
    })
}

fn static_breakdown(config: &StaticSharesConfig) -> Result<ShareBreakdown, GenerationError> {
    if config.shares.is_empty() {
        return Err(GenerationError::invalid(format!(
            "share breakdown '{}' has no categories",
            config.label
        )));
    }

    for share in &config.shares {
        if !(0.0..=1.0).contains(&share.share) {
            return Err(GenerationError::invalid(format!(
                "share of '{}' in '{}' is outside [0, 1]: {}",
                share.category, config.label, share.share
            )));
        }
    }

    let breakdown = ShareBreakdown::new(
        config.label.clone(),
        config
            .shares
            .iter()
            .map(|s| SharePoint {
                category: s.category.clone(),
                proportion: s.share,
            })
            .collect(),
    );

    if (breakdown.total() - 1.0).abs() > SHARE_TOLERANCE {
        return Err(GenerationError::invalid(format!(
            "shares in '{}' sum to {}, expected 1",
            config.label,
            breakdown.total()
        )));
    }

    Ok(breakdown)
}

fn occasion_profiles(configs: &[OccasionConfig]) -> Result<Vec<OccasionProfile>, GenerationError> {
    if configs.is_empty() {
        return Err(GenerationError::invalid("no commemorative dates configured"));
    }

    let mut seen = HashSet::new();
    let mut profiles = Vec::with_capacity(configs.len());

    for occasion in configs {
        let name = occasion.name.trim();
        if name.is_empty() {
            return Err(GenerationError::invalid("commemorative date with an empty name"));
        }
        if !seen.insert(name.to_string()) {
            return Err(GenerationError::invalid(format!(
                "commemorative date '{}' is configured twice",
                name
            )));
        }

        check_scores(name, &occasion.territories)?;
        check_scores(name, &occasion.drivers)?;

        profiles.push(OccasionProfile::new(
            name.to_string(),
            occasion.territories.clone(),
            occasion.drivers.clone(),
        ));
    }

    Ok(profiles)
}

fn check_scores(occasion: &str, scores: &[Score]) -> Result<(), GenerationError> {
    match scores.iter().find(|s| !(0.0..=1.0).contains(&s.score)) {
        Some(bad) => Err(GenerationError::invalid(format!(
            "score of '{}' for '{}' is outside [0, 1]: {}",
            bad.label, occasion, bad.score
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::tests::bundled_survey_config;
    use crate::infrastructure::config::StaticShare;
    use crate::infrastructure::seeded_rng::SeededRng;
    use chrono::NaiveDate;

    #[test]
    fn test_bundled_config_builds_snapshot() {
        let config = bundled_survey_config();
        let snapshot = build_snapshot(&config, &mut SeededRng::new(config.dashboard.seed)).unwrap();

        assert_eq!(snapshot.buckets.len(), 12);
        assert_eq!(snapshot.buckets[0], NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
        assert_eq!(snapshot.channels.len(), 36);
        assert_eq!(snapshot.motivators.len(), 48);
        assert_eq!(snapshot.media_habits.len(), 48);
        assert_eq!(snapshot.purpose.len(), 24);
        assert_eq!(snapshot.regional_ticket.rows.len(), 60);
        assert_eq!(snapshot.brand_consideration.rows.len(), 48);
        assert_eq!(snapshot.spend_intent.shares.len(), 4);
        assert!((snapshot.spend_intent.total() - 1.0).abs() < 1e-9);
        assert_eq!(snapshot.occasion_names(), vec!["Dia das Mães", "Natal", "Black Friday"]);

        for table in [&snapshot.channels, &snapshot.motivators, &snapshot.media_habits, &snapshot.purpose] {
            assert!(table.bucket_totals().iter().all(|(_, t)| (t - 1.0).abs() < 1e-9));
        }
        assert!(snapshot.regional_ticket.rows.iter().all(|r| r.value >= 60.0));
        assert!(snapshot.brand_consideration.rows.iter().all(|r| (0.1..=0.9).contains(&r.value)));
    }

    #[test]
    fn test_snapshot_is_reproducible() {
        let config = bundled_survey_config();
        let a = build_snapshot(&config, &mut SeededRng::new(42)).unwrap();
        let b = build_snapshot(&config, &mut SeededRng::new(42)).unwrap();

        assert_eq!(a.channels, b.channels);
        assert_eq!(a.regional_ticket, b.regional_ticket);
        assert_eq!(a.spend_intent, b.spend_intent);
        assert_eq!(a.brand_consideration, b.brand_consideration);
    }

    #[test]
    fn test_empty_share_dimension_fails() {
        let mut config = bundled_survey_config();
        config.shares.motivators.categories.clear();

        let err = build_snapshot(&config, &mut SeededRng::new(42)).unwrap_err();
        assert!(matches!(err, GenerationError::InvalidInput(msg) if msg.contains("Motivador")));
    }

    #[test]
    fn test_static_shares_must_sum_to_one() {
        let mut config = bundled_survey_config();
        config.non_essential_share.shares.push(StaticShare {
            category: "Viagens".to_string(),
            share: 0.1,
        });

        assert!(build_snapshot(&config, &mut SeededRng::new(42)).is_err());
    }

    #[test]
    fn test_occasions_are_validated() {
        let mut config = bundled_survey_config();
        config.occasions[1].name = "Dia das Mães".to_string();
        assert!(build_snapshot(&config, &mut SeededRng::new(42)).is_err());

        let mut config = bundled_survey_config();
        config.occasions[0].drivers[0].score = 1.5;
        assert!(build_snapshot(&config, &mut SeededRng::new(42)).is_err());

        let mut config = bundled_survey_config();
        config.occasions.clear();
        assert!(build_snapshot(&config, &mut SeededRng::new(42)).is_err());
    }

    #[test]
    fn test_bad_calendar_start_fails() {
        let mut config = bundled_survey_config();
        config.calendar.start = "sometime".to_string();
        assert!(build_snapshot(&config, &mut SeededRng::new(42)).is_err());
    }
}
