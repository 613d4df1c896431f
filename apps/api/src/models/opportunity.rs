#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::AppError;

/// Supported Saudi cities; `Other` is the catch-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaudiCity {
    Riyadh,
    Jeddah,
    Dammam,
    Khobar,
    Dhahran,
    Madinah,
    Makkah,
    Tabuk,
    Abha,
    Taif,
    Qassim,
    Hail,
    Jazan,
    Najran,
    #[serde(rename = "Al Baha")]
    AlBaha,
    #[serde(rename = "Al Jouf")]
    AlJouf,
    #[serde(rename = "Al Ahsa")]
    AlAhsa,
    Other,
}

impl SaudiCity {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaudiCity::Riyadh => "Riyadh",
            SaudiCity::Jeddah => "Jeddah",
            SaudiCity::Dammam => "Dammam",
            SaudiCity::Khobar => "Khobar",
            SaudiCity::Dhahran => "Dhahran",
            SaudiCity::Madinah => "Madinah",
            SaudiCity::Makkah => "Makkah",
            SaudiCity::Tabuk => "Tabuk",
            SaudiCity::Abha => "Abha",
            SaudiCity::Taif => "Taif",
            SaudiCity::Qassim => "Qassim",
            SaudiCity::Hail => "Hail",
            SaudiCity::Jazan => "Jazan",
            SaudiCity::Najran => "Najran",
            SaudiCity::AlBaha => "Al Baha",
            SaudiCity::AlJouf => "Al Jouf",
            SaudiCity::AlAhsa => "Al Ahsa",
            SaudiCity::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Hackathon,
    Event,
    Course,
    Accelerator,
    Incubator,
    Program,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Hackathon => "hackathon",
            Category::Event => "event",
            Category::Course => "course",
            Category::Accelerator => "accelerator",
            Category::Incubator => "incubator",
            Category::Program => "program",
        }
    }
}

/// Delivery mode. Online and hybrid listings stay reachable regardless of
/// the user's city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Online,
    Offline,
    Hybrid,
}

/// Moderation status gating public visibility: only `published` records
/// appear in public listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationStatus {
    Draft,
    #[default]
    PendingReview,
    Published,
}

impl ModerationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationStatus::Draft => "draft",
            ModerationStatus::PendingReview => "pending_review",
            ModerationStatus::Published => "published",
        }
    }
}

/// A curated opportunity listing. The store-generated identifier is not a
/// field here: it is never accepted as input, and handlers expose it only
/// as the external `"id"` string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opportunity {
    pub title: String,
    pub description: String,
    pub category: Category,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default)]
    pub city: Option<SaudiCity>,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub price: Option<f64>,
    /// Parsing into `Url` rejects relative or malformed URLs at the boundary.
    pub url: Url,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub application_deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub eligibility: Option<String>,
    /// Free-form keywords; order preserved, duplicates permitted.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub status: ModerationStatus,
}

fn default_country() -> String {
    "Saudi Arabia".to_string()
}

impl Opportunity {
    /// Constraints serde cannot express. Checked once at the boundary.
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(price) = self.price {
            if !(price >= 0.0) || !price.is_finite() {
                return Err(AppError::Validation(
                    "price must be a non-negative number".to_string(),
                ));
            }
        }
        Ok(())
    }
}
