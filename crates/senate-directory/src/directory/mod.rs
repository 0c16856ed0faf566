//! Legislator directory: loading, filtering, sorting and card visibility.

pub mod detail;
pub mod domain;
pub mod dropdown;
pub mod filter;
pub mod handle;
pub mod loader;
pub mod options;
pub mod predicate;
pub mod render;
pub mod report;
pub mod roster;
pub mod session;
pub mod sort;
pub mod visibility;

pub use detail::{LegislatorDetail, SocialLink};
pub use domain::{Category, FilterKey, Legislator, LegislatorId};
pub use dropdown::{DropdownPanel, DropdownState};
pub use filter::{FilterState, FilterStateView};
pub use handle::DirectoryHandle;
pub use loader::{DirectoryLoader, LoadError};
pub use options::FilterOptionsIndex;
pub use predicate::apply_filter;
pub use report::views::DirectorySummary;
pub use roster::Directory;
pub use session::{
    directory_router, DirectorySession, FilterTag, OptionEntry, SessionError, SessionId,
    SessionRepository, SessionView,
};
pub use sort::{sort_legislators, SortDirection, SortDirective, SortField};
pub use visibility::{
    sync_visibility, Card, CardDeck, VisibilityError, VisibilityReport, VisibilitySurface,
};

#[cfg(test)]
pub(crate) mod test_support {
    use super::domain::{Legislator, LegislatorId};

    pub(crate) fn legislator(
        id: &str,
        first: &str,
        last: &str,
        party: &str,
        state: &str,
    ) -> Legislator {
        Legislator {
            id: LegislatorId::new(id),
            first_name: first.to_string(),
            last_name: last.to_string(),
            nickname: None,
            description: String::new(),
            party: party.to_string(),
            state: state.to_string(),
            rank: "junior".to_string(),
            gender: "male".to_string(),
            office: None,
            phone: None,
            birthday: None,
            age: None,
            start_date: None,
            end_date: None,
            years_in_office: None,
            twitter: None,
            youtube: None,
            website: None,
            leadership_title: None,
            image_url: None,
        }
    }
}
