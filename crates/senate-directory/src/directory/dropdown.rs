use super::domain::Category;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropdownState {
    Closed,
    Open,
}

/// Open/closed state of the category dropdowns plus each dropdown's option search text.
///
/// At most one dropdown is open at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropdownPanel {
    open: Option<Category>,
    searches: HashMap<Category, String>,
}

impl DropdownPanel {
    /// Opens `category` (closing any other) or closes it when already open.
    pub fn toggle(&mut self, category: Category) -> DropdownState {
        if self.open == Some(category) {
            self.open = None;
            DropdownState::Closed
        } else {
            self.open = Some(category);
            DropdownState::Open
        }
    }

    pub fn close(&mut self, category: Category) {
        if self.open == Some(category) {
            self.open = None;
        }
    }

    pub fn state(&self, category: Category) -> DropdownState {
        if self.open == Some(category) {
            DropdownState::Open
        } else {
            DropdownState::Closed
        }
    }

    pub fn open_category(&self) -> Option<Category> {
        self.open
    }

    pub fn set_search(&mut self, category: Category, fragment: &str) {
        if fragment.is_empty() {
            self.searches.remove(&category);
        } else {
            self.searches.insert(category, fragment.to_string());
        }
    }

    pub fn clear_search(&mut self, category: Category) {
        self.searches.remove(&category);
    }

    pub fn search(&self, category: Category) -> &str {
        self.searches.get(&category).map(String::as_str).unwrap_or("")
    }
}

/// Whether an option stays listed for the dropdown's search text (case-insensitive prefix).
pub fn option_matches(option: &str, fragment: &str) -> bool {
    option.to_lowercase().starts_with(&fragment.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_one_dropdown_closes_the_others() {
        let mut panel = DropdownPanel::default();
        assert_eq!(panel.toggle(Category::Party), DropdownState::Open);
        assert_eq!(panel.toggle(Category::State), DropdownState::Open);

        assert_eq!(panel.state(Category::Party), DropdownState::Closed);
        assert_eq!(panel.state(Category::State), DropdownState::Open);
    }

    #[test]
    fn toggling_an_open_dropdown_closes_it() {
        let mut panel = DropdownPanel::default();
        panel.toggle(Category::Rank);
        assert_eq!(panel.toggle(Category::Rank), DropdownState::Closed);
        assert!(panel.open_category().is_none());
    }

    #[test]
    fn close_only_affects_the_named_dropdown() {
        let mut panel = DropdownPanel::default();
        panel.toggle(Category::Gender);
        panel.close(Category::Party);
        assert_eq!(panel.state(Category::Gender), DropdownState::Open);
        panel.close(Category::Gender);
        assert_eq!(panel.state(Category::Gender), DropdownState::Closed);
    }

    #[test]
    fn search_text_is_per_category() {
        let mut panel = DropdownPanel::default();
        panel.set_search(Category::State, "n");
        assert_eq!(panel.search(Category::State), "n");
        assert_eq!(panel.search(Category::Party), "");
        panel.clear_search(Category::State);
        assert_eq!(panel.search(Category::State), "");
    }

    #[test]
    fn option_matching_is_case_insensitive_prefix() {
        assert!(option_matches("NY", "n"));
        assert!(option_matches("democrat", ""));
        assert!(!option_matches("republican", "pub"));
    }
}
