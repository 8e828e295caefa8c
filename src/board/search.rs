//! Filtering the board with the search field

use std::collections::BTreeMap;

use bitflags::bitflags;

use crate::board::view::{BoardView, TaskCard};
use crate::key::Key;
use crate::status::Status;

bitflags! {
    /// The parts of a card a search looks into
    pub struct SearchFields: u8 {
        const TITLE = 1;
        const DESCRIPTION = 2;
        const CATEGORY = 4;
        const ASSIGNEES = 8;
    }
}

impl Default for SearchFields {
    fn default() -> Self {
        SearchFields::all()
    }
}


/// The cards that match a search
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchResult {
    /// Matching cards, per column
    pub matches: BTreeMap<Status, Vec<Key>>,
    /// Set when nothing matches, so that a "no result" message can be shown
    pub no_result: bool,
}

impl SearchResult {
    pub fn is_match(&self, id: &Key) -> bool {
        self.matches.values().any(|ids| ids.contains(id))
    }

    pub fn count(&self) -> usize {
        self.matches.values().map(|ids| ids.len()).sum()
    }
}

/// Whether a card contains `query` (case-insensitively) in one of the given fields
pub fn card_matches(card: &TaskCard, query: &str, fields: SearchFields) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    let contains = |text: &str| text.to_lowercase().contains(&query);

    (fields.contains(SearchFields::TITLE) && contains(card.title.as_str()))
        || (fields.contains(SearchFields::DESCRIPTION) && contains(card.description.as_str()))
        || (fields.contains(SearchFields::CATEGORY) && contains(card.category.as_str()))
        || (fields.contains(SearchFields::ASSIGNEES) && card.assignees.iter().any(|a| contains(a.name.as_str())))
}

/// Search the board. An empty query matches every card
pub fn search(view: &BoardView, query: &str, fields: SearchFields) -> SearchResult {
    let mut matches = BTreeMap::new();
    for column in &view.columns {
        let ids: Vec<Key> = column.cards.iter()
            .filter(|card| card_matches(card, query, fields))
            .map(|card| card.id.clone())
            .collect();
        matches.insert(column.status, ids);
    }

    let no_result = matches.values().all(|ids| ids.is_empty());
    log::debug!("Search for {:?} matched {} card(s)", query, matches.values().map(|ids| ids.len()).sum::<usize>());
    SearchResult { matches, no_result }
}

impl BoardView {
    /// A copy of this board that only contains the cards matching `query`
    pub fn filtered(&self, query: &str, fields: SearchFields) -> BoardView {
        let mut filtered = self.clone();
        for column in filtered.columns.iter_mut() {
            column.cards.retain(|card| card_matches(card, query, fields));
        }
        filtered
    }
}
