//! Contact (prospect / lead) records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::error::{ModelError, ParseEnumError};
use crate::label::parse_label;
use crate::status::Status;

// ──────────────────────────────────────────────
// Source / Relationship
// ──────────────────────────────────────────────

/// Channel the contact was found through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Source {
    #[serde(rename = "LinkedIn")]
    LinkedIn,
    #[serde(rename = "Email List")]
    EmailList,
    #[serde(rename = "YouTube")]
    YouTube,
    #[serde(rename = "Referral")]
    Referral,
}

impl Source {
    pub const ALL: [Source; 4] = [
        Source::LinkedIn,
        Source::EmailList,
        Source::YouTube,
        Source::Referral,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Source::LinkedIn => "LinkedIn",
            Source::EmailList => "Email List",
            Source::YouTube => "YouTube",
            Source::Referral => "Referral",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Source {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label("source", s, &Source::ALL, Source::as_str)
    }
}

/// How the consultant relates to the contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Relationship {
    #[serde(rename = "Prospect")]
    Prospect,
    #[serde(rename = "Client")]
    Client,
    #[serde(rename = "Vendor")]
    Vendor,
    #[serde(rename = "Promotional Partner")]
    PromotionalPartner,
}

impl Relationship {
    pub const ALL: [Relationship; 4] = [
        Relationship::Prospect,
        Relationship::Client,
        Relationship::Vendor,
        Relationship::PromotionalPartner,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Relationship::Prospect => "Prospect",
            Relationship::Client => "Client",
            Relationship::Vendor => "Vendor",
            Relationship::PromotionalPartner => "Promotional Partner",
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Relationship {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label("relationship", s, &Relationship::ALL, Relationship::as_str)
    }
}

// ──────────────────────────────────────────────
// Conversion probability
// ──────────────────────────────────────────────

/// Estimated chance (percent) that the contact converts. Always 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct ConversionProbability(u8);

impl ConversionProbability {
    pub fn percent(self) -> u8 {
        self.0
    }
}

impl TryFrom<u16> for ConversionProbability {
    type Error = ModelError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        if value <= 100 {
            Ok(ConversionProbability(value as u8))
        } else {
            Err(ModelError::ProbabilityOutOfRange(value))
        }
    }
}

impl From<ConversionProbability> for u16 {
    fn from(p: ConversionProbability) -> u16 {
        u16::from(p.0)
    }
}

// ──────────────────────────────────────────────
// Contact
// ──────────────────────────────────────────────

/// A prospect, client, vendor or partner tracked in the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub company: String,
    #[serde(default)]
    pub title: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub source: Source,
    pub relationship: Relationship,
    #[serde(default)]
    pub latest_decision: Status,
    #[serde(default)]
    pub is_dream_100: bool,
    #[serde(default)]
    pub interaction_count: u32,
    #[serde(default, with = "crate::dates::option")]
    pub last_interaction: Option<Date>,
    #[serde(default, with = "crate::dates::option")]
    pub next_contact_date: Option<Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion_probability: Option<ConversionProbability>,
    #[serde(default)]
    pub preferred_communication: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_profile: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Contact {
    /// A fresh contact at `Research` with no interaction history.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        company: impl Into<String>,
        email: impl Into<String>,
        source: Source,
        relationship: Relationship,
        now: OffsetDateTime,
    ) -> Self {
        Contact {
            id: id.into(),
            name: name.into(),
            company: company.into(),
            title: String::new(),
            email: email.into(),
            phone: None,
            source,
            relationship,
            latest_decision: Status::Research,
            is_dream_100: false,
            interaction_count: 0,
            last_interaction: None,
            next_contact_date: None,
            conversion_probability: None,
            preferred_communication: String::new(),
            notes: None,
            linkedin_profile: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check the record-level invariants that serde cannot express.
    pub fn validate(&self) -> Result<(), ModelError> {
        for (field, value) in [
            ("id", &self.id),
            ("name", &self.name),
            ("company", &self.company),
            ("email", &self.email),
        ] {
            if value.trim().is_empty() {
                return Err(ModelError::MissingField {
                    id: self.id.clone(),
                    field,
                });
            }
        }
        if self.updated_at < self.created_at {
            return Err(ModelError::TimestampOrder {
                id: self.id.clone(),
            });
        }
        Ok(())
    }

    /// Case-insensitive substring match over name, company and email.
    ///
    /// `needle` must already be lowercased; an empty needle matches.
    pub fn matches_search(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.company.to_lowercase().contains(needle)
            || self.email.to_lowercase().contains(needle)
    }

    /// Initials shown in avatar bubbles ("Sarah Johnson" -> "SJ").
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect()
    }
}
