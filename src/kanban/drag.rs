//! Drag and drop between columns

use super::board::Board;
use crate::error::KanbanError;

/// A card picked up from a column, waiting to be dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub card_id: String,
    pub from: String,
}

impl Board {
    /// Pick up `card_id` from `from`; fails if it is not there
    pub fn begin_drag(&self, card_id: &str, from: &str) -> Result<DragSession, KanbanError> {
        let cards = self.cards(from)?;
        if !cards.iter().any(|c| c.id == card_id) {
            return Err(KanbanError::UnknownCard(card_id.to_string()));
        }
        Ok(DragSession {
            card_id: card_id.to_string(),
            from: from.to_string(),
        })
    }
}

impl DragSession {
    /// Drop onto column `to`; the card lands at the end of that column
    pub fn drop_on(self, board: &mut Board, to: &str) -> Result<(), KanbanError> {
        board.move_card(&self.card_id, &self.from, to)
    }

    /// Released outside any column
    pub fn cancel(self) {
        log::debug!("Drag of card {} cancelled", self.card_id);
    }
}
