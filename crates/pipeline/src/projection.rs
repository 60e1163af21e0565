//! Filter/search projection over the contact list.

use std::str::FromStr;

use prospector_core::{Contact, ParseEnumError, Relationship, Source, Status};
use serde::Serialize;

/// Active search and filter inputs.
///
/// `None` means the filter is off. Parsing treats an empty string and
/// `"all"` as off, matching the select boxes the values come from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactFilter {
    pub search: String,
    pub status: Option<Status>,
    pub source: Option<Source>,
    pub relationship: Option<Relationship>,
}

fn parse_optional<T>(raw: &str) -> Result<Option<T>, ParseEnumError>
where
    T: FromStr<Err = ParseEnumError>,
{
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
        Ok(None)
    } else {
        trimmed.parse().map(Some)
    }
}

impl ContactFilter {
    /// Build a filter from raw select-box values.
    pub fn parse(
        search: &str,
        status: &str,
        source: &str,
        relationship: &str,
    ) -> Result<Self, ParseEnumError> {
        Ok(ContactFilter {
            search: search.to_string(),
            status: parse_optional(status)?,
            source: parse_optional(source)?,
            relationship: parse_optional(relationship)?,
        })
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_source(mut self, source: Source) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_relationship(mut self, relationship: Relationship) -> Self {
        self.relationship = Some(relationship);
        self
    }

    /// Whether any predicate would exclude something.
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty()
            || self.status.is_some()
            || self.source.is_some()
            || self.relationship.is_some()
    }

    fn matches(&self, needle: &str, contact: &Contact) -> bool {
        contact.matches_search(needle)
            && self.status.is_none_or(|s| contact.latest_decision == s)
            && self.source.is_none_or(|s| contact.source == s)
            && self.relationship.is_none_or(|r| contact.relationship == r)
    }
}

/// Contacts that satisfy every active predicate, in input order.
///
/// Pure: the same input and filter always give the same output, and the
/// output only ever holds references into the input.
pub fn project<'a, I>(contacts: I, filter: &ContactFilter) -> Vec<&'a Contact>
where
    I: IntoIterator<Item = &'a Contact>,
{
    let needle = filter.search.trim().to_lowercase();
    contacts
        .into_iter()
        .filter(|c| filter.matches(&needle, c))
        .collect()
}
