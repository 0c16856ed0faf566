use super::domain::{Legislator, LegislatorId};
use super::options::FilterOptionsIndex;
use std::collections::HashMap;

/// The immutable legislator collection shared by every session.
#[derive(Debug, Clone)]
pub struct Directory {
    legislators: Vec<Legislator>,
    positions: HashMap<LegislatorId, usize>,
    options: FilterOptionsIndex,
}

impl Directory {
    /// Builds the collection; a repeated id keeps its first record and drops the rest.
    pub fn new(records: Vec<Legislator>) -> Self {
        let mut positions = HashMap::with_capacity(records.len());
        let mut legislators = Vec::with_capacity(records.len());
        for legislator in records {
            if positions.contains_key(&legislator.id) {
                tracing::warn!(id = %legislator.id, "dropping duplicate legislator id from roster");
                continue;
            }
            positions.insert(legislator.id.clone(), legislators.len());
            legislators.push(legislator);
        }
        let options = FilterOptionsIndex::from_legislators(&legislators);

        Self {
            legislators,
            positions,
            options,
        }
    }

    /// All legislators in source order.
    pub fn legislators(&self) -> &[Legislator] {
        &self.legislators
    }

    pub fn options(&self) -> &FilterOptionsIndex {
        &self.options
    }

    pub fn get(&self, id: &LegislatorId) -> Option<&Legislator> {
        self.positions
            .get(id)
            .and_then(|&position| self.legislators.get(position))
    }

    pub fn len(&self) -> usize {
        self.legislators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.legislators.is_empty()
    }
}
