//! Pipeline status (`latest_decision`) of a contact.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseEnumError;
use crate::label::parse_label;

/// The decision a prospect is currently at.
///
/// The graph between settable statuses is complete: any status may follow
/// any other. `NoDecision` is the fallback shown for contacts that have not
/// been assigned a decision yet and is never a valid transition target.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Status {
    #[serde(rename = "Research")]
    Research,
    #[serde(rename = "Reached Out")]
    ReachedOut,
    #[serde(rename = "In Conversation")]
    InConversation,
    #[serde(rename = "2nd Meeting")]
    SecondMeeting,
    #[serde(rename = "Buy")]
    Buy,
    #[serde(rename = "Don't Buy")]
    DontBuy,
    #[serde(rename = "Postpone")]
    Postpone,
    #[serde(rename = "Referral")]
    Referral,
    #[serde(rename = "No Decision")]
    #[default]
    NoDecision,
}

impl Status {
    /// Every variant, in pipeline display order.
    pub const ALL: [Status; 9] = [
        Status::Research,
        Status::ReachedOut,
        Status::InConversation,
        Status::SecondMeeting,
        Status::Buy,
        Status::DontBuy,
        Status::Postpone,
        Status::Referral,
        Status::NoDecision,
    ];

    /// Statuses a contact may be moved into.
    pub const SETTABLE: [Status; 8] = [
        Status::Research,
        Status::ReachedOut,
        Status::InConversation,
        Status::SecondMeeting,
        Status::Buy,
        Status::DontBuy,
        Status::Postpone,
        Status::Referral,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Research => "Research",
            Status::ReachedOut => "Reached Out",
            Status::InConversation => "In Conversation",
            Status::SecondMeeting => "2nd Meeting",
            Status::Buy => "Buy",
            Status::DontBuy => "Don't Buy",
            Status::Postpone => "Postpone",
            Status::Referral => "Referral",
            Status::NoDecision => "No Decision",
        }
    }

    pub fn is_settable(self) -> bool {
        self != Status::NoDecision
    }

    /// Closed decisions no longer need a next contact date.
    pub fn is_closed(self) -> bool {
        matches!(self, Status::Buy | Status::DontBuy)
    }

    /// Badge icon used by list views.
    pub fn icon(self) -> &'static str {
        match self {
            Status::Research => "🔍",
            Status::ReachedOut => "📧",
            Status::InConversation => "💬",
            Status::SecondMeeting => "🤝",
            Status::Buy => "✅",
            Status::DontBuy => "❌",
            Status::Postpone => "⏸️",
            Status::Referral => "🔄",
            Status::NoDecision => "❓",
        }
    }

    /// Parse a status that may be used as a transition target.
    ///
    /// Same as [`FromStr`] but also rejects `No Decision`.
    pub fn parse_settable(input: &str) -> Result<Status, ParseEnumError> {
        let status: Status = input.parse()?;
        if status.is_settable() {
            Ok(status)
        } else {
            Err(ParseEnumError::new("status", input))
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label("status", s, &Status::ALL, Status::as_str)
    }
}
