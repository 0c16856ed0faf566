use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a legislator (the bioguide id in the source data).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LegislatorId(pub String);

impl LegislatorId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LegislatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LegislatorId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// The four filterable attributes of a legislator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Party,
    State,
    Rank,
    Gender,
}

impl Category {
    pub const fn ordered() -> [Self; 4] {
        [Self::Party, Self::State, Self::Rank, Self::Gender]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Party => "party",
            Self::State => "state",
            Self::Rank => "rank",
            Self::Gender => "gender",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Party => "Party",
            Self::State => "State",
            Self::Rank => "Rank",
            Self::Gender => "Gender",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "party" => Some(Self::Party),
            "state" => Some(Self::State),
            "rank" => Some(Self::Rank),
            "gender" => Some(Self::Gender),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Target of a filter mutation: one of the categories or the free-text name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKey {
    Category(Category),
    Name,
}

impl FilterKey {
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim().eq_ignore_ascii_case("name") {
            return Some(Self::Name);
        }
        Category::parse(raw).map(Self::Category)
    }
}

/// Display-ready legislator, built once at load time and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legislator {
    pub id: LegislatorId,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    pub description: String,
    pub party: String,
    pub state: String,
    pub rank: String,
    pub gender: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub office: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years_in_office: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leadership_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Legislator {
    /// Value this legislator carries for a filter category.
    pub fn category_value(&self, category: Category) -> &str {
        match category {
            Category::Party => &self.party,
            Category::State => &self.state,
            Category::Rank => &self.rank,
            Category::Gender => &self.gender,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Upper-cases the first character, leaving the rest untouched.
pub fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parse_is_case_insensitive() {
        assert_eq!(Category::parse("Party"), Some(Category::Party));
        assert_eq!(Category::parse(" gender "), Some(Category::Gender));
        assert_eq!(Category::parse("name"), None);
        assert_eq!(Category::parse("district"), None);
    }

    #[test]
    fn filter_key_recognizes_name_pseudo_category() {
        assert_eq!(FilterKey::parse("NAME"), Some(FilterKey::Name));
        assert_eq!(
            FilterKey::parse("rank"),
            Some(FilterKey::Category(Category::Rank))
        );
        assert_eq!(FilterKey::parse("office"), None);
    }

    #[test]
    fn capitalize_first_handles_empty_and_unicode() {
        assert_eq!(capitalize_first("democrat"), "Democrat");
        assert_eq!(capitalize_first(""), "");
        assert_eq!(capitalize_first("état"), "État");
    }
}
