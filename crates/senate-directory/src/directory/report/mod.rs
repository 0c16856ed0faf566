mod seating;
mod summary;
pub mod views;

pub use seating::{seat_layout, SEATS_PER_ROW};
pub use summary::{
    average_age, gender_stats, leaders_by_party, party_counts, summarize, years_in_office,
};
