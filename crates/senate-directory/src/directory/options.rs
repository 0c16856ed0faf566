use super::domain::{Category, Legislator};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Every distinct value observed per category, computed once from the full collection.
///
/// Only drives the selectable options; the predicate never consults it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptionsIndex {
    values: BTreeMap<Category, BTreeSet<String>>,
}

impl FilterOptionsIndex {
    pub fn from_legislators(legislators: &[Legislator]) -> Self {
        let mut values: BTreeMap<Category, BTreeSet<String>> = Category::ordered()
            .into_iter()
            .map(|category| (category, BTreeSet::new()))
            .collect();

        for legislator in legislators {
            for category in Category::ordered() {
                let value = legislator.category_value(category);
                if value.is_empty() {
                    continue;
                }
                if let Some(set) = values.get_mut(&category) {
                    set.insert(value.to_string());
                }
            }
        }

        Self { values }
    }

    pub fn contains(&self, category: Category, value: &str) -> bool {
        self.values
            .get(&category)
            .is_some_and(|set| set.contains(value))
    }

    /// Options for a category in lexicographic order.
    pub fn sorted(&self, category: Category) -> Vec<&str> {
        self.values
            .get(&category)
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn categories(&self) -> impl Iterator<Item = (Category, Vec<&str>)> + '_ {
        Category::ordered()
            .into_iter()
            .map(move |category| (category, self.sorted(category)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::test_support::legislator;

    #[test]
    fn collects_distinct_values_per_category() {
        let legislators = vec![
            legislator("1", "Jane", "Doe", "democrat", "CA"),
            legislator("2", "John", "Roe", "republican", "TX"),
            legislator("3", "Ann", "Poe", "democrat", "CA"),
        ];

        let index = FilterOptionsIndex::from_legislators(&legislators);
        assert_eq!(index.sorted(Category::Party), vec!["democrat", "republican"]);
        assert_eq!(index.sorted(Category::State), vec!["CA", "TX"]);
        assert!(index.contains(Category::Party, "democrat"));
        assert!(!index.contains(Category::Party, "independent"));
    }

    #[test]
    fn empty_values_are_not_selectable() {
        let mut record = legislator("1", "Jane", "Doe", "democrat", "CA");
        record.rank = String::new();

        let index = FilterOptionsIndex::from_legislators(&[record]);
        assert!(index.sorted(Category::Rank).is_empty());
        assert_eq!(index.categories().count(), 4);
    }
}
