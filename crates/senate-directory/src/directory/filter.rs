use super::domain::{Category, FilterKey};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Selected filter values per category plus the free-text name fragment.
///
/// An empty selection set places no constraint on its category. Mutations never
/// touch the legislator collection; callers re-run the predicate afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    selections: HashMap<Category, HashSet<String>>,
    name: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterState {
    pub fn new() -> Self {
        Self {
            selections: Category::ordered()
                .into_iter()
                .map(|category| (category, HashSet::new()))
                .collect(),
            name: String::new(),
        }
    }

    /// True iff `value` is selected for `category`. Unknown categories and `name` answer false.
    pub fn has_filter(&self, category: &str, value: &str) -> bool {
        match FilterKey::parse(category) {
            Some(FilterKey::Category(category)) => self.has(category, value),
            Some(FilterKey::Name) | None => false,
        }
    }

    /// Selects `value`, or replaces the name fragment when `category` is `name`.
    /// Returns whether the state changed.
    pub fn add_filter(&mut self, category: &str, value: &str) -> bool {
        match FilterKey::parse(category) {
            Some(FilterKey::Category(category)) => self.insert(category, value),
            Some(FilterKey::Name) => self.set_name(value),
            None => {
                tracing::debug!(category, value, "ignoring filter for unknown category");
                false
            }
        }
    }

    /// Deselects `value`; for `name` the fragment is cleared. Absent values are a no-op.
    pub fn remove_filter(&mut self, category: &str, value: &str) -> bool {
        match FilterKey::parse(category) {
            Some(FilterKey::Category(category)) => self.remove(category, value),
            Some(FilterKey::Name) => self.set_name(""),
            None => {
                tracing::debug!(category, value, "ignoring filter removal for unknown category");
                false
            }
        }
    }

    /// Clears every selection set and the name fragment.
    pub fn reset_filters(&mut self) {
        for set in self.selections.values_mut() {
            set.clear();
        }
        self.name.clear();
    }

    pub fn has(&self, category: Category, value: &str) -> bool {
        self.selections
            .get(&category)
            .is_some_and(|set| set.contains(value))
    }

    pub fn insert(&mut self, category: Category, value: &str) -> bool {
        self.selections
            .entry(category)
            .or_default()
            .insert(value.to_string())
    }

    pub fn remove(&mut self, category: Category, value: &str) -> bool {
        self.selections
            .get_mut(&category)
            .is_some_and(|set| set.remove(value))
    }

    pub fn set_name(&mut self, fragment: &str) -> bool {
        let lowered = fragment.to_lowercase();
        if lowered == self.name {
            return false;
        }
        self.name = lowered;
        true
    }

    /// The stored, lower-cased name fragment.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn selection(&self, category: Category) -> Option<&HashSet<String>> {
        self.selections.get(&category)
    }

    /// Whether the category constrains the result (non-empty selection).
    pub fn is_active(&self, category: Category) -> bool {
        self.selections
            .get(&category)
            .is_some_and(|set| !set.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && !Category::ordered().into_iter().any(|c| self.is_active(c))
    }

    pub fn view(&self) -> FilterStateView {
        FilterStateView {
            selections: Category::ordered()
                .into_iter()
                .map(|category| {
                    let values = self
                        .selections
                        .get(&category)
                        .map(|set| set.iter().cloned().collect())
                        .unwrap_or_default();
                    (category.key(), values)
                })
                .collect(),
            name: self.name.clone(),
        }
    }
}

/// Serializable snapshot with deterministically ordered values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterStateView {
    pub selections: BTreeMap<&'static str, BTreeSet<String>>,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn add_is_idempotent_and_remove_tolerates_absent_values() {
        let mut state = FilterState::new();
        assert!(state.add_filter("party", "democrat"));
        assert!(!state.add_filter("party", "democrat"));
        assert!(state.has_filter("party", "democrat"));

        assert!(state.remove_filter("party", "democrat"));
        assert!(!state.remove_filter("party", "democrat"));
        assert!(!state.has_filter("party", "democrat"));
    }

    #[test]
    fn name_filter_is_stored_lower_cased_and_replaced() {
        let mut state = FilterState::new();
        state.add_filter("name", "SM");
        assert_eq!(state.name(), "sm");
        state.add_filter("name", "Jo");
        assert_eq!(state.name(), "jo");
        assert!(!state.has_filter("name", "jo"));

        state.remove_filter("name", "jo");
        assert_eq!(state.name(), "");
    }

    #[test]
    fn unknown_categories_are_ignored() {
        let mut state = FilterState::new();
        assert!(!state.add_filter("district", "7"));
        assert!(!state.remove_filter("district", "7"));
        assert!(!state.has_filter("district", "7"));
        assert_eq!(state, FilterState::new());
    }

    #[test]
    fn reset_clears_selections_and_name() {
        let mut state = FilterState::new();
        state.add_filter("rank", "senior");
        state.add_filter("gender", "female");
        state.add_filter("name", "ja");

        state.reset_filters();
        assert!(state.is_empty());
        assert!(!state.has_filter("rank", "senior"));
        assert_eq!(state.name(), "");
    }

    #[test]
    fn view_orders_values() {
        let mut state = FilterState::new();
        state.insert(Category::State, "TX");
        state.insert(Category::State, "CA");

        let view = state.view();
        let states: Vec<_> = view.selections["state"].iter().cloned().collect();
        assert_eq!(states, vec!["CA", "TX"]);
        assert!(view.selections["party"].is_empty());
    }

    fn category_key() -> impl Strategy<Value = &'static str> {
        prop_oneof![Just("party"), Just("state"), Just("rank"), Just("gender")]
    }

    proptest! {
        /// Adding then removing a value restores every `has_filter` answer.
        #[test]
        fn add_then_remove_round_trips(
            seeded in prop::collection::vec((category_key(), "[a-z]{1,6}"), 0..8),
            category in category_key(),
            value in "[a-z]{1,6}",
            probes in prop::collection::vec((category_key(), "[a-z]{1,6}"), 1..8),
        ) {
            let mut state = FilterState::new();
            for (c, v) in &seeded {
                state.add_filter(c, v);
            }
            prop_assume!(!state.has_filter(category, &value));

            let before: Vec<bool> = probes.iter().map(|(c, v)| state.has_filter(c, v)).collect();
            state.add_filter(category, &value);
            state.remove_filter(category, &value);
            let after: Vec<bool> = probes.iter().map(|(c, v)| state.has_filter(c, v)).collect();

            prop_assert_eq!(before, after);
            prop_assert!(!state.has_filter(category, &value));
        }
    }
}
