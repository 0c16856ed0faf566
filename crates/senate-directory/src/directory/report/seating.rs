use super::views::Seat;
use crate::directory::domain::Legislator;

pub const SEATS_PER_ROW: usize = 20;

const START_X: f64 = 800.0;
const START_Y: f64 = 20.0;
const ROW_X_SHIFT: f64 = 27.5;
const START_DISTANCE: f64 = 40.0;
const ROW_DISTANCE_SHIFT: f64 = 4.4;
const ANGLE_STEP: f64 = 0.1571;
const FIRST_ANGLE_MULTIPLIER: f64 = 10.0;

/// Places legislators on concentric arcs, twenty per row, in collection order.
pub fn seat_layout(legislators: &[Legislator]) -> Vec<Seat<'_>> {
    legislators
        .chunks(SEATS_PER_ROW)
        .enumerate()
        .flat_map(|(row, bucket)| {
            let distance = START_DISTANCE - ROW_DISTANCE_SHIFT * row as f64;
            let mut x = START_X - ROW_X_SHIFT * row as f64;
            let mut y = START_Y;
            let mut multiplier = FIRST_ANGLE_MULTIPLIER;

            bucket.iter().map(move |legislator| {
                let angle = ANGLE_STEP * multiplier;
                x += distance * angle.cos();
                y += distance * angle.sin();
                multiplier += 1.0;
                Seat {
                    id: &legislator.id,
                    row,
                    x,
                    y,
                    color: party_color(&legislator.party),
                }
            })
        })
        .collect()
}

fn party_color(party: &str) -> &'static str {
    match party {
        "democrat" => "blue",
        "republican" => "red",
        _ => "grey",
    }
}
