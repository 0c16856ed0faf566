use super::domain::{Legislator, LegislatorId};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// A legislator without a display element: the deck was not drawn before syncing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VisibilityError {
    #[error("no display element for legislator {0}")]
    MissingElement(LegislatorId),
}

/// Narrow boundary over whatever holds the rendered cards.
pub trait VisibilitySurface {
    fn contains(&self, id: &LegislatorId) -> bool;
    fn set_visible(&mut self, id: &LegislatorId, visible: bool) -> Result<(), VisibilityError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VisibilityReport {
    pub shown: usize,
    pub hidden: usize,
}

/// Shows exactly the cards in `shown` and hides every other legislator's card.
///
/// Elements are never created or destroyed. Every legislator must already have an
/// element; the check runs before any element is touched.
pub fn sync_visibility<S: VisibilitySurface + ?Sized>(
    legislators: &[Legislator],
    shown: &[&Legislator],
    surface: &mut S,
) -> Result<VisibilityReport, VisibilityError> {
    if let Some(missing) = legislators.iter().find(|l| !surface.contains(&l.id)) {
        tracing::error!(id = %missing.id, "visibility sync ran before the card deck was drawn");
        return Err(VisibilityError::MissingElement(missing.id.clone()));
    }

    let show_set: HashSet<&LegislatorId> = shown.iter().map(|l| &l.id).collect();
    let mut report = VisibilityReport::default();
    for legislator in legislators {
        let visible = show_set.contains(&legislator.id);
        surface.set_visible(&legislator.id, visible)?;
        if visible {
            report.shown += 1;
        } else {
            report.hidden += 1;
        }
    }

    Ok(report)
}

/// One rendered card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub id: LegislatorId,
    pub hidden: bool,
}

/// The on-screen card set, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardDeck {
    cards: Vec<Card>,
    positions: HashMap<LegislatorId, usize>,
}

impl CardDeck {
    /// Discards the current cards and draws one visible card per legislator in the given order.
    pub fn draw(&mut self, ordered: &[&Legislator]) {
        self.cards = ordered
            .iter()
            .map(|legislator| Card {
                id: legislator.id.clone(),
                hidden: false,
            })
            .collect();
        self.positions = self
            .cards
            .iter()
            .enumerate()
            .map(|(position, card)| (card.id.clone(), position))
            .collect();
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn visible_ids(&self) -> impl Iterator<Item = &LegislatorId> {
        self.cards
            .iter()
            .filter(|card| !card.hidden)
            .map(|card| &card.id)
    }

    pub fn is_visible(&self, id: &LegislatorId) -> Option<bool> {
        self.positions
            .get(id)
            .and_then(|&position| self.cards.get(position))
            .map(|card| !card.hidden)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl VisibilitySurface for CardDeck {
    fn contains(&self, id: &LegislatorId) -> bool {
        self.positions.contains_key(id)
    }

    fn set_visible(&mut self, id: &LegislatorId, visible: bool) -> Result<(), VisibilityError> {
        let card = self
            .positions
            .get(id)
            .and_then(|&position| self.cards.get_mut(position))
            .ok_or_else(|| VisibilityError::MissingElement(id.clone()))?;
        card.hidden = !visible;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::test_support::legislator;

    fn pair() -> Vec<Legislator> {
        vec![
            legislator("1", "Jane", "Doe", "democrat", "CA"),
            legislator("2", "John", "Roe", "republican", "TX"),
        ]
    }

    fn drawn(legislators: &[Legislator]) -> CardDeck {
        let mut deck = CardDeck::default();
        deck.draw(&legislators.iter().collect::<Vec<_>>());
        deck
    }

    #[test]
    fn sync_shows_members_and_hides_the_rest() {
        let legislators = pair();
        let mut deck = drawn(&legislators);

        let report = sync_visibility(&legislators, &[&legislators[0]], &mut deck).expect("sync");
        assert_eq!(report, VisibilityReport { shown: 1, hidden: 1 });
        assert_eq!(deck.is_visible(&LegislatorId::from("1")), Some(true));
        assert_eq!(deck.is_visible(&LegislatorId::from("2")), Some(false));
        assert_eq!(deck.len(), 2);
    }

    #[test]
    fn sync_is_idempotent() {
        let legislators = pair();
        let mut deck = drawn(&legislators);

        sync_visibility(&legislators, &[&legislators[0]], &mut deck).expect("first sync");
        let snapshot = deck.clone();
        sync_visibility(&legislators, &[&legislators[0]], &mut deck).expect("second sync");
        assert_eq!(deck, snapshot);
    }

    #[test]
    fn weaker_filter_reshows_hidden_cards_without_redrawing() {
        let legislators = pair();
        let mut deck = drawn(&legislators);

        sync_visibility(&legislators, &[], &mut deck).expect("hide all");
        assert_eq!(deck.visible_ids().count(), 0);

        let everyone: Vec<_> = legislators.iter().collect();
        sync_visibility(&legislators, &everyone, &mut deck).expect("show all");
        assert_eq!(deck.visible_ids().count(), 2);
    }

    #[test]
    fn missing_element_fails_before_mutating() {
        let legislators = pair();
        let mut deck = drawn(&legislators[..1]);
        sync_visibility(&legislators[..1], &[], &mut deck).expect("hide first");

        let error = sync_visibility(&legislators, &[&legislators[0]], &mut deck)
            .expect_err("second legislator has no card");
        assert_eq!(error, VisibilityError::MissingElement(LegislatorId::from("2")));
        assert_eq!(deck.is_visible(&LegislatorId::from("1")), Some(false));
    }
}
