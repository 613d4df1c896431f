#![allow(dead_code)]

use serde::{Deserialize, Serialize};

use crate::models::opportunity::SaudiCity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Student,
    Junior,
    Mid,
    Senior,
    Founder,
}

/// Personalization input. Email is the lookup key but is not unique in the
/// store; lookups take the first match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub location: Option<SaudiCity>,
    #[serde(default)]
    pub experience_level: Option<ExperienceLevel>,
    /// Interest keywords; treated as a set by the recommendation engine.
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub goals: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_profile_deserializes() {
        let profile: UserProfile =
            serde_json::from_value(json!({"name": "Sara", "email": "sara@example.com"})).unwrap();
        assert!(profile.location.is_none());
        assert!(profile.interests.is_empty());
        assert!(profile.experience_level.is_none());
    }

    #[test]
    fn test_full_profile_deserializes() {
        let profile: UserProfile = serde_json::from_value(json!({
            "name": "Omar",
            "email": "omar@example.com",
            "location": "Riyadh",
            "experience_level": "founder",
            "interests": ["AI", "fintech"],
            "goals": "Launch a startup"
        }))
        .unwrap();
        assert_eq!(profile.location, Some(SaudiCity::Riyadh));
        assert_eq!(profile.experience_level, Some(ExperienceLevel::Founder));
        assert_eq!(profile.interests.len(), 2);
    }
}
