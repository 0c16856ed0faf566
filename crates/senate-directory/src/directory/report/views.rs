use crate::directory::domain::LegislatorId;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartyCountEntry {
    pub party: String,
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenderStats {
    pub female: usize,
    pub male: usize,
    pub female_pct: u32,
    pub male_pct: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearsInOfficeBar {
    pub years: i32,
    pub count: usize,
    /// Bar width relative to the tallest bar, 0-100.
    pub width_pct: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearsInOfficeHistogram {
    pub bars: Vec<YearsInOfficeBar>,
    pub axis: [usize; 3],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderEntry {
    pub id: LegislatorId,
    pub title: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderGroup {
    pub party: String,
    pub heading: String,
    pub leaders: Vec<LeaderEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Seat<'a> {
    pub id: &'a LegislatorId,
    pub row: usize,
    pub x: f64,
    pub y: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectorySummary {
    pub total: usize,
    pub party_counts: Vec<PartyCountEntry>,
    pub gender: GenderStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_age: Option<i32>,
    pub years_in_office: YearsInOfficeHistogram,
    pub leaders: Vec<LeaderGroup>,
}
