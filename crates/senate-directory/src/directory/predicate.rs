use super::domain::{Category, Legislator};
use super::filter::FilterState;

/// Legislators satisfying every active filter, in their original relative order.
///
/// Values are OR-ed within a category and categories are AND-ed together; an empty
/// selection set passes everything. The name fragment must prefix the first or last
/// name, ignoring case.
pub fn apply_filter<'a>(state: &FilterState, legislators: &'a [Legislator]) -> Vec<&'a Legislator> {
    legislators
        .iter()
        .filter(|legislator| matches(state, legislator))
        .collect()
}

pub fn matches(state: &FilterState, legislator: &Legislator) -> bool {
    Category::ordered()
        .into_iter()
        .all(|category| category_passes(state, category, legislator))
        && name_passes(state.name(), legislator)
}

fn category_passes(state: &FilterState, category: Category, legislator: &Legislator) -> bool {
    !state.is_active(category) || state.has(category, legislator.category_value(category))
}

fn name_passes(fragment: &str, legislator: &Legislator) -> bool {
    if fragment.is_empty() {
        return true;
    }
    let fragment = fragment.to_lowercase();
    legislator.first_name.to_lowercase().starts_with(&fragment)
        || legislator.last_name.to_lowercase().starts_with(&fragment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::test_support::legislator;
    use proptest::prelude::*;

    fn pair() -> Vec<Legislator> {
        vec![
            legislator("1", "Jane", "Doe", "democrat", "CA"),
            legislator("2", "John", "Roe", "republican", "TX"),
        ]
    }

    fn ids(selected: &[&Legislator]) -> Vec<String> {
        selected.iter().map(|l| l.id.to_string()).collect()
    }

    #[test]
    fn party_selection_keeps_only_members() {
        let legislators = pair();
        let mut state = FilterState::new();
        state.add_filter("party", "democrat");

        assert_eq!(ids(&apply_filter(&state, &legislators)), vec!["1"]);
    }

    #[test]
    fn name_fragment_with_empty_party_selects_by_prefix() {
        let legislators = pair();
        let mut state = FilterState::new();
        state.add_filter("name", "jo");

        assert_eq!(ids(&apply_filter(&state, &legislators)), vec!["2"]);
    }

    #[test]
    fn name_matching_is_prefix_only_and_case_insensitive() {
        let legislators = vec![
            legislator("1", "Ann", "Smith", "democrat", "CA"),
            legislator("2", "Smyth", "Jones", "republican", "TX"),
            legislator("3", "Bob", "Blacksmith", "democrat", "NY"),
        ];
        let mut state = FilterState::new();
        state.add_filter("name", "SM");

        assert_eq!(ids(&apply_filter(&state, &legislators)), vec!["1", "2"]);
    }

    #[test]
    fn categories_are_anded_and_values_ored() {
        let legislators = vec![
            legislator("1", "Jane", "Doe", "democrat", "CA"),
            legislator("2", "John", "Roe", "republican", "TX"),
            legislator("3", "Ann", "Poe", "democrat", "TX"),
            legislator("4", "Tim", "Loe", "independent", "VT"),
        ];
        let mut state = FilterState::new();
        state.add_filter("party", "democrat");
        state.add_filter("party", "independent");
        state.add_filter("state", "TX");
        state.add_filter("state", "VT");

        assert_eq!(ids(&apply_filter(&state, &legislators)), vec!["3", "4"]);
    }

    #[test]
    fn values_missing_from_the_options_index_still_pass_wildcards() {
        let mut drifted = legislator("9", "Zed", "Zee", "democrat", "ZZ");
        drifted.rank = "emeritus".to_string();
        let legislators = vec![drifted];
        let mut state = FilterState::new();
        state.add_filter("party", "democrat");

        assert_eq!(ids(&apply_filter(&state, &legislators)), vec!["9"]);
    }

    fn roster() -> impl Strategy<Value = Vec<Legislator>> {
        let party = prop_oneof![Just("democrat"), Just("republican"), Just("independent")];
        let state = prop_oneof![Just("CA"), Just("TX"), Just("NY")];
        prop::collection::vec(("[A-Z][a-z]{1,5}", "[A-Z][a-z]{1,7}", party, state), 0..20).prop_map(
            |rows| {
                rows.into_iter()
                    .enumerate()
                    .map(|(i, (first, last, party, state))| {
                        legislator(&i.to_string(), &first, &last, party, state)
                    })
                    .collect()
            },
        )
    }

    proptest! {
        /// With nothing selected the output is the whole input in order.
        #[test]
        fn empty_state_returns_everything(legislators in roster()) {
            let state = FilterState::new();
            let selected = apply_filter(&state, &legislators);
            prop_assert_eq!(selected.len(), legislators.len());
            for (kept, original) in selected.iter().zip(legislators.iter()) {
                prop_assert_eq!(&kept.id, &original.id);
            }
        }

        /// A single-category selection equals union membership in that category.
        #[test]
        fn single_category_selection_is_union_membership(
            legislators in roster(),
            parties in prop::collection::btree_set(
                prop_oneof![Just("democrat"), Just("republican"), Just("independent")], 1..3),
        ) {
            let mut state = FilterState::new();
            for party in &parties {
                state.add_filter("party", party);
            }

            let expected: Vec<_> = legislators
                .iter()
                .filter(|l| parties.contains(l.party.as_str()))
                .map(|l| l.id.clone())
                .collect();
            let actual: Vec<_> = apply_filter(&state, &legislators)
                .into_iter()
                .map(|l| l.id.clone())
                .collect();
            prop_assert_eq!(actual, expected);
        }

        /// Identical inputs give identical, order-stable output.
        #[test]
        fn predicate_is_pure(legislators in roster(), fragment in "[a-z]{0,2}") {
            let mut state = FilterState::new();
            state.add_filter("name", &fragment);
            let first: Vec<_> = apply_filter(&state, &legislators).into_iter().map(|l| l.id.clone()).collect();
            let second: Vec<_> = apply_filter(&state, &legislators).into_iter().map(|l| l.id.clone()).collect();
            prop_assert_eq!(first, second);
        }
    }
}
