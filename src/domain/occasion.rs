// Commemorative dates - brand territories and consumption drivers
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub label: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OccasionProfile {
    pub name: String,
    pub territories: Vec<Score>,
    pub drivers: Vec<Score>,
}

impl OccasionProfile {
    pub fn new(name: String, territories: Vec<Score>, drivers: Vec<Score>) -> Self {
        Self {
            name,
            territories,
            drivers,
        }
    }

    /// Drivers ordered strongest first; ties keep their configured order.
    pub fn ranked_drivers(&self) -> Vec<Score> {
        let mut drivers = self.drivers.clone();
        drivers.sort_by(|a, b| b.score.total_cmp(&a.score));
        drivers
    }
}
