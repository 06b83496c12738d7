// Survey snapshot - every generated table, held read-only for the process lifetime
use super::occasion::OccasionProfile;
use super::series::SeriesTable;
use super::share::{ShareBreakdown, ShareTable};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetId {
    Channels,
    Motivators,
    MediaHabits,
    Purpose,
    RegionalTicket,
    SpendIntent,
    BrandConsideration,
    NonEssentialShare,
}

impl DatasetId {
    pub const ALL: [DatasetId; 8] = [
        DatasetId::Channels,
        DatasetId::Motivators,
        DatasetId::MediaHabits,
        DatasetId::Purpose,
        DatasetId::RegionalTicket,
        DatasetId::SpendIntent,
        DatasetId::BrandConsideration,
        DatasetId::NonEssentialShare,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            DatasetId::Channels => "channels",
            DatasetId::Motivators => "motivators",
            DatasetId::MediaHabits => "media_habits",
            DatasetId::Purpose => "purpose",
            DatasetId::RegionalTicket => "regional_ticket",
            DatasetId::SpendIntent => "spend_intent",
            DatasetId::BrandConsideration => "brand_consideration",
            DatasetId::NonEssentialShare => "non_essential_share",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.slug() == slug)
    }
}

/// A table as handed to the renderer, tagged with its shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Dataset {
    Shares(ShareTable),
    Series(SeriesTable),
    Breakdown(ShareBreakdown),
}

#[derive(Debug, Clone)]
pub struct SurveySnapshot {
    pub buckets: Vec<NaiveDate>,
    pub channels: ShareTable,
    pub motivators: ShareTable,
    pub media_habits: ShareTable,
    pub purpose: ShareTable,
    pub regional_ticket: SeriesTable,
    pub spend_intent: ShareBreakdown,
    pub brand_consideration: SeriesTable,
    pub non_essential_share: ShareBreakdown,
    pub occasions: Vec<OccasionProfile>,
}

impl SurveySnapshot {
    pub fn dataset(&self, id: DatasetId) -> Dataset {
        match id {
            DatasetId::Channels => Dataset::Shares(self.channels.clone()),
            DatasetId::Motivators => Dataset::Shares(self.motivators.clone()),
            DatasetId::MediaHabits => Dataset::Shares(self.media_habits.clone()),
            DatasetId::Purpose => Dataset::Shares(self.purpose.clone()),
            DatasetId::RegionalTicket => Dataset::Series(self.regional_ticket.clone()),
            DatasetId::SpendIntent => Dataset::Breakdown(self.spend_intent.clone()),
            DatasetId::BrandConsideration => Dataset::Series(self.brand_consideration.clone()),
            DatasetId::NonEssentialShare => Dataset::Breakdown(self.non_essential_share.clone()),
        }
    }

    pub fn occasion(&self, name: &str) -> Option<&OccasionProfile> {
        self.occasions.iter().find(|o| o.name == name)
    }

    pub fn occasion_names(&self) -> Vec<String> {
        self.occasions.iter().map(|o| o.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_slugs_round_trip() {
        for id in DatasetId::ALL {
            assert_eq!(DatasetId::from_slug(id.slug()), Some(id));
        }
        assert_eq!(DatasetId::from_slug("weather"), None);
    }

    #[test]
    fn test_slug_matches_serialized_name() {
        for id in DatasetId::ALL {
            assert_eq!(serde_json::to_value(id).unwrap(), id.slug());
        }
    }
}
