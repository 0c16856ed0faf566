use super::domain::Legislator;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// String-valued fields the directory can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    LastName,
    FirstName,
    State,
    Party,
}

impl SortField {
    pub const fn ordered() -> [Self; 4] {
        [Self::LastName, Self::FirstName, Self::State, Self::Party]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::LastName => "last_name",
            Self::FirstName => "first_name",
            Self::State => "state",
            Self::Party => "party",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::LastName => "Name",
            Self::FirstName => "First name",
            Self::State => "State",
            Self::Party => "Party",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "last_name" | "lastname" | "secondname" | "name" => Some(Self::LastName),
            "first_name" | "firstname" => Some(Self::FirstName),
            "state" => Some(Self::State),
            "party" => Some(Self::Party),
            _ => None,
        }
    }

    fn value(self, legislator: &Legislator) -> &str {
        match self {
            Self::LastName => &legislator.last_name,
            Self::FirstName => &legislator.first_name,
            Self::State => &legislator.state,
            Self::Party => &legislator.party,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    None,
    Ascending,
    Descending,
}

impl SortDirection {
    /// none → ascending → descending → none.
    pub const fn next(self) -> Self {
        match self {
            Self::None => Self::Ascending,
            Self::Ascending => Self::Descending,
            Self::Descending => Self::None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "unsorted",
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }
}

/// Tri-state toggle per field; at most one field is sorted at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SortDirective {
    active: Option<(SortField, SortDirection)>,
}

impl SortDirective {
    /// Advances `field` one step through its cycle, cancelling any other field's sort.
    pub fn click(&mut self, field: SortField) -> SortDirection {
        let current = match self.active {
            Some((active, direction)) if active == field => direction,
            _ => SortDirection::None,
        };
        let next = current.next();
        self.active = match next {
            SortDirection::None => None,
            direction => Some((field, direction)),
        };
        next
    }

    pub fn direction_for(&self, field: SortField) -> SortDirection {
        match self.active {
            Some((active, direction)) if active == field => direction,
            _ => SortDirection::None,
        }
    }

    pub fn active(&self) -> Option<(SortField, SortDirection)> {
        self.active
    }

    pub fn clear(&mut self) {
        self.active = None;
    }
}

/// Stable reordering of the full collection; `None` keeps source order.
///
/// Holds no state between calls.
pub fn sort_legislators(
    field: SortField,
    direction: SortDirection,
    legislators: &[Legislator],
) -> Vec<&Legislator> {
    let mut ordered: Vec<&Legislator> = legislators.iter().collect();
    match direction {
        SortDirection::None => {}
        SortDirection::Ascending => {
            ordered.sort_by(|a, b| collate(field.value(a), field.value(b)));
        }
        SortDirection::Descending => {
            ordered.sort_by(|a, b| collate(field.value(b), field.value(a)));
        }
    }
    ordered
}

/// Case-insensitive ordering with a case-sensitive tiebreak.
pub fn collate(left: &str, right: &str) -> Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| left.cmp(right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::test_support::legislator;

    fn roster() -> Vec<Legislator> {
        vec![
            legislator("1", "Jane", "doe", "democrat", "TX"),
            legislator("2", "John", "Roe", "republican", "CA"),
            legislator("3", "Ann", "Adams", "democrat", "TX"),
            legislator("4", "Zoe", "Baker", "independent", "AK"),
        ]
    }

    fn ids(ordered: &[&Legislator]) -> Vec<String> {
        ordered.iter().map(|l| l.id.to_string()).collect()
    }

    #[test]
    fn ascending_and_descending_by_last_name_ignore_case() {
        let legislators = roster();
        assert_eq!(
            ids(&sort_legislators(SortField::LastName, SortDirection::Ascending, &legislators)),
            vec!["3", "4", "1", "2"]
        );
        assert_eq!(
            ids(&sort_legislators(SortField::LastName, SortDirection::Descending, &legislators)),
            vec!["2", "1", "4", "3"]
        );
    }

    #[test]
    fn equal_keys_keep_source_order_in_both_directions() {
        let legislators = roster();
        assert_eq!(
            ids(&sort_legislators(SortField::State, SortDirection::Ascending, &legislators)),
            vec!["4", "2", "1", "3"]
        );
        assert_eq!(
            ids(&sort_legislators(SortField::State, SortDirection::Descending, &legislators)),
            vec!["1", "3", "2", "4"]
        );
    }

    #[test]
    fn none_direction_returns_source_order() {
        let legislators = roster();
        assert_eq!(
            ids(&sort_legislators(SortField::State, SortDirection::None, &legislators)),
            vec!["1", "2", "3", "4"]
        );
    }

    #[test]
    fn three_clicks_return_to_unsorted() {
        let legislators = roster();
        let mut directive = SortDirective::default();

        assert_eq!(directive.click(SortField::LastName), SortDirection::Ascending);
        assert_eq!(directive.click(SortField::LastName), SortDirection::Descending);
        assert_eq!(directive.click(SortField::LastName), SortDirection::None);
        assert!(directive.active().is_none());

        let direction = directive.direction_for(SortField::LastName);
        assert_eq!(
            ids(&sort_legislators(SortField::LastName, direction, &legislators)),
            vec!["1", "2", "3", "4"]
        );
    }

    #[test]
    fn selecting_another_field_cancels_the_active_sort() {
        let mut directive = SortDirective::default();
        directive.click(SortField::LastName);
        directive.click(SortField::LastName);

        assert_eq!(directive.click(SortField::State), SortDirection::Ascending);
        assert_eq!(directive.direction_for(SortField::LastName), SortDirection::None);
        assert_eq!(
            directive.active(),
            Some((SortField::State, SortDirection::Ascending))
        );
    }

    #[test]
    fn field_parse_accepts_source_aliases() {
        assert_eq!(SortField::parse("secondname"), Some(SortField::LastName));
        assert_eq!(SortField::parse("last-name"), Some(SortField::LastName));
        assert_eq!(SortField::parse("State"), Some(SortField::State));
        assert_eq!(SortField::parse("age"), None);
    }
}
