//! Transport mode classification

use std::fmt;

use serde::{Deserialize, Serialize};

/// HaFAS leg type for a footpath
const LEG_TYPE_WALK: &str = "WALK";

/// HaFAS leg type for a scheduled vehicle journey
const LEG_TYPE_JOURNEY: &str = "JNY";

/// Journey categories shown as trains; all other journeys count as buses
pub const TRAIN_CATEGORIES: [&str; 3] = ["DRE", "NRE", "ICE"];

/// How a leg is travelled, as shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    /// Footpath between stops
    Walking,
    /// Regional or long-distance train
    Train,
    /// Everything else
    Bus,
}

impl TransportMode {
    /// Classify a leg from its HaFAS `type` and optional `category`
    #[must_use]
    pub fn classify(leg_type: &str, category: Option<&str>) -> Self {
        match leg_type {
            LEG_TYPE_WALK => Self::Walking,
            LEG_TYPE_JOURNEY
                if category.is_some_and(|c| TRAIN_CATEGORIES.contains(&c)) =>
            {
                Self::Train
            },
            _ => Self::Bus,
        }
    }

    /// Lowercase name used in sensor attributes
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Walking => "walking",
            Self::Train => "train",
            Self::Bus => "bus",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_is_walking() {
        assert_eq!(TransportMode::classify("WALK", None), TransportMode::Walking);
        assert_eq!(TransportMode::classify("WALK", Some("ICE")), TransportMode::Walking);
    }

    #[test]
    fn train_categories() {
        for cat in TRAIN_CATEGORIES {
            assert_eq!(TransportMode::classify("JNY", Some(cat)), TransportMode::Train);
        }
    }

    #[test]
    fn other_journeys_are_buses() {
        assert_eq!(TransportMode::classify("JNY", Some("BUS")), TransportMode::Bus);
        assert_eq!(TransportMode::classify("JNY", Some("ice")), TransportMode::Bus);
        assert_eq!(TransportMode::classify("JNY", None), TransportMode::Bus);
    }

    #[test]
    fn train_category_needs_journey_type() {
        assert_eq!(TransportMode::classify("TRSF", Some("ICE")), TransportMode::Bus);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TransportMode::Train).unwrap(), r#""train""#);
        assert_eq!(TransportMode::Walking.to_string(), "walking");
    }
}
