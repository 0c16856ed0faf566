//! Per-viewer directory state: filters, sort, dropdowns and the drawn card deck.
//!
//! Every mutation re-runs the predicate over the full collection and syncs card
//! visibility, so the deck always reflects the fully-applied filter.

mod repository;
pub mod router;

pub use repository::{SessionError, SessionId, SessionRepository};
pub use router::directory_router;

use super::domain::{capitalize_first, Category, FilterKey, Legislator, LegislatorId};
use super::dropdown::{option_matches, DropdownPanel, DropdownState};
use super::filter::{FilterState, FilterStateView};
use super::predicate::apply_filter;
use super::roster::Directory;
use super::sort::{sort_legislators, SortDirection, SortDirective, SortField};
use super::visibility::{sync_visibility, Card, CardDeck, VisibilityError, VisibilityReport};
use serde::Serialize;
use std::sync::Arc;

/// A removable marker for one selected (category, value) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterTag {
    pub category: Category,
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct DirectorySession {
    directory: Arc<Directory>,
    filter: FilterState,
    sort: SortDirective,
    dropdowns: DropdownPanel,
    tags: Vec<FilterTag>,
    deck: CardDeck,
}

impl DirectorySession {
    /// Draws the full deck in source order with nothing filtered.
    pub fn open(directory: Arc<Directory>) -> Result<Self, VisibilityError> {
        let mut session = Self {
            directory,
            filter: FilterState::new(),
            sort: SortDirective::default(),
            dropdowns: DropdownPanel::default(),
            tags: Vec::new(),
            deck: CardDeck::default(),
        };
        session.redraw();
        session.apply()?;
        Ok(session)
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn deck(&self) -> &CardDeck {
        &self.deck
    }

    pub fn sort(&self) -> &SortDirective {
        &self.sort
    }

    pub fn dropdowns(&self) -> &DropdownPanel {
        &self.dropdowns
    }

    pub fn tags(&self) -> &[FilterTag] {
        &self.tags
    }

    /// Checks or unchecks an option. The dropdown's search text is cleared either way.
    pub fn toggle_filter(
        &mut self,
        category: &str,
        value: &str,
        selected: bool,
    ) -> Result<VisibilityReport, VisibilityError> {
        match FilterKey::parse(category) {
            Some(FilterKey::Category(category)) => {
                if selected {
                    self.select(category, value);
                } else {
                    self.deselect(category, value);
                }
                self.dropdowns.clear_search(category);
            }
            Some(FilterKey::Name) => {
                self.filter.set_name(if selected { value } else { "" });
            }
            None => {
                tracing::debug!(category, value, "ignoring toggle for unknown category");
            }
        }
        self.apply()
    }

    /// Removes a filter through its tag, unchecking the matching option.
    pub fn remove_tag(
        &mut self,
        category: Category,
        value: &str,
    ) -> Result<VisibilityReport, VisibilityError> {
        self.deselect(category, value);
        self.dropdowns.clear_search(category);
        self.apply()
    }

    pub fn search_name(&mut self, fragment: &str) -> Result<VisibilityReport, VisibilityError> {
        self.filter.add_filter("name", fragment);
        self.apply()
    }

    /// Clears every selection, tag, option search and the name fragment.
    pub fn reset(&mut self) -> Result<VisibilityReport, VisibilityError> {
        self.filter.reset_filters();
        self.tags.clear();
        for category in Category::ordered() {
            self.dropdowns.clear_search(category);
        }
        self.apply()
    }

    /// Advances `field` through its sort cycle, redraws the deck in the new order and
    /// re-applies the current filter.
    pub fn click_sort(&mut self, field: SortField) -> Result<SortDirection, VisibilityError> {
        let direction = self.sort.click(field);
        tracing::debug!(field = field.key(), direction = direction.label(), "sort toggled");
        self.redraw();
        self.apply()?;
        Ok(direction)
    }

    pub fn toggle_dropdown(&mut self, category: Category) -> DropdownState {
        self.dropdowns.toggle(category)
    }

    pub fn close_dropdown(&mut self, category: Category) {
        self.dropdowns.close(category);
    }

    pub fn search_options(&mut self, category: Category, fragment: &str) {
        self.dropdowns.set_search(category, fragment);
    }

    /// Options for a category in display order, with checked and listed flags.
    pub fn option_entries(&self, category: Category) -> Vec<OptionEntry> {
        let search = self.dropdowns.search(category);
        self.directory
            .options()
            .sorted(category)
            .into_iter()
            .map(|value| OptionEntry {
                value: value.to_string(),
                label: capitalize_first(value),
                checked: self.filter.has(category, value),
                listed: option_matches(value, search),
            })
            .collect()
    }

    /// Runs the predicate and syncs the deck to its output.
    pub fn apply(&mut self) -> Result<VisibilityReport, VisibilityError> {
        let legislators = self.directory.legislators();
        let shown = apply_filter(&self.filter, legislators);
        sync_visibility(legislators, &shown, &mut self.deck)
    }

    /// Visible legislators in display order.
    pub fn visible(&self) -> Vec<&Legislator> {
        self.deck
            .visible_ids()
            .filter_map(|id| self.directory.get(id))
            .collect()
    }

    pub fn is_visible(&self, id: &LegislatorId) -> bool {
        self.deck.is_visible(id).unwrap_or(false)
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            filters: self.filter.view(),
            sort: self.sort.active().map(|(field, direction)| SortView { field, direction }),
            open_dropdown: self.dropdowns.open_category(),
            tags: self.tags.clone(),
            visible: self.deck.visible_ids().count(),
            total: self.deck.len(),
            cards: self.deck.cards().to_vec(),
        }
    }

    fn select(&mut self, category: Category, value: &str) {
        if self.filter.insert(category, value) {
            self.tags.push(FilterTag {
                category,
                value: value.to_string(),
                label: capitalize_first(value),
            });
        }
    }

    fn deselect(&mut self, category: Category, value: &str) {
        self.filter.remove(category, value);
        self.tags
            .retain(|tag| !(tag.category == category && tag.value == value));
    }

    fn redraw(&mut self) {
        let (field, direction) = self
            .sort
            .active()
            .unwrap_or((SortField::LastName, SortDirection::None));
        let ordered = sort_legislators(field, direction, self.directory.legislators());
        self.deck.draw(&ordered);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionEntry {
    pub value: String,
    pub label: String,
    pub checked: bool,
    pub listed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortView {
    pub field: SortField,
    pub direction: SortDirection,
}

/// Serializable snapshot of a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub filters: FilterStateView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_dropdown: Option<Category>,
    pub tags: Vec<FilterTag>,
    pub visible: usize,
    pub total: usize,
    pub cards: Vec<Card>,
}

#[cfg(test)]
mod tests;
