//! Board data model and mutations

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::KanbanError;

/// Title given to a column added with a blank name
pub const DEFAULT_COLUMN_TITLE: &str = "New list";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    /// Display order, left to right
    columns: Vec<Column>,
    /// Card lists keyed by column id, top to bottom
    cards: BTreeMap<String, Vec<Card>>,
    #[serde(skip)]
    next_id: u64,
}

impl Default for Board {
    fn default() -> Self {
        let columns = [("todo", "To Do"), ("in-progress", "In Progress"), ("done", "Done")];
        let seeded: [(&str, &[(&str, &str)]); 3] = [
            (
                "todo",
                &[
                    ("1", "Review pull requests"),
                    ("2", "Update documentation"),
                    ("3", "Plan sprint"),
                ],
            ),
            ("in-progress", &[("4", "Fix login bug"), ("5", "Design dashboard")]),
            ("done", &[("6", "Deploy to staging"), ("7", "Write tests")]),
        ];

        let mut board = Self {
            columns: columns
                .iter()
                .map(|(id, title)| Column {
                    id: id.to_string(),
                    title: title.to_string(),
                })
                .collect(),
            cards: BTreeMap::new(),
            next_id: 0,
        };
        for (column, cards) in seeded {
            board.cards.insert(
                column.to_string(),
                cards
                    .iter()
                    .map(|(id, text)| Card {
                        id: id.to_string(),
                        text: text.to_string(),
                    })
                    .collect(),
            );
        }
        board.next_id = board.max_numeric_id() + 1;
        board
    }
}

/// Trimmed text, or `EmptyText` if nothing is left
fn non_blank(text: &str) -> Result<&str, KanbanError> {
    match text.trim() {
        "" => Err(KanbanError::EmptyText),
        trimmed => Ok(trimmed),
    }
}

impl Board {
    /// A board with a single empty column
    pub fn empty() -> Self {
        let mut board = Self {
            columns: Vec::new(),
            cards: BTreeMap::new(),
            next_id: 1,
        };
        board.add_column(DEFAULT_COLUMN_TITLE);
        board
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    /// Cards in `column_id`, top first
    pub fn cards(&self, column_id: &str) -> Result<&[Card], KanbanError> {
        self.cards
            .get(column_id)
            .map(Vec::as_slice)
            .ok_or_else(|| KanbanError::UnknownColumn(column_id.to_string()))
    }

    /// Column currently holding `card_id`
    pub fn find_card(&self, card_id: &str) -> Option<(&str, &Card)> {
        self.cards.iter().find_map(|(column, cards)| {
            cards
                .iter()
                .find(|c| c.id == card_id)
                .map(|card| (column.as_str(), card))
        })
    }

    pub fn card_count(&self) -> usize {
        self.cards.values().map(Vec::len).sum()
    }

    fn cards_mut(&mut self, column_id: &str) -> Result<&mut Vec<Card>, KanbanError> {
        self.cards
            .get_mut(column_id)
            .ok_or_else(|| KanbanError::UnknownColumn(column_id.to_string()))
    }

    fn is_id_taken(&self, id: &str) -> bool {
        self.columns.iter().any(|c| c.id == id) || self.find_card(id).is_some()
    }

    /// Next counter value not already used by a card or column
    fn fresh_id(&mut self) -> String {
        loop {
            let id = self.next_id.to_string();
            self.next_id += 1;
            if !self.is_id_taken(&id) {
                return id;
            }
        }
    }

    fn max_numeric_id(&self) -> u64 {
        let column_ids = self.columns.iter().map(|c| c.id.as_str());
        let card_ids = self.cards.values().flatten().map(|c| c.id.as_str());
        column_ids
            .chain(card_ids)
            .filter_map(|id| id.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
    }

    /// Put a new card at the top of `column_id`, returns its id
    pub fn add_card(&mut self, column_id: &str, text: &str) -> Result<String, KanbanError> {
        let text = non_blank(text)?.to_string();
        if !self.cards.contains_key(column_id) {
            return Err(KanbanError::UnknownColumn(column_id.to_string()));
        }

        let id = self.fresh_id();
        self.cards_mut(column_id)?.insert(
            0,
            Card {
                id: id.clone(),
                text,
            },
        );
        log::debug!("Added card {id} to {column_id}");
        Ok(id)
    }

    /// Append a column, blank titles become [`DEFAULT_COLUMN_TITLE`]
    pub fn add_column(&mut self, title: &str) -> String {
        let title = non_blank(title).unwrap_or(DEFAULT_COLUMN_TITLE).to_string();
        let id = self.fresh_id();
        self.columns.push(Column {
            id: id.clone(),
            title,
        });
        self.cards.insert(id.clone(), Vec::new());
        id
    }

    /// Remove a column and all its cards; the last column always stays
    pub fn remove_column(&mut self, column_id: &str) -> Result<Vec<Card>, KanbanError> {
        let index = self
            .columns
            .iter()
            .position(|c| c.id == column_id)
            .ok_or_else(|| KanbanError::UnknownColumn(column_id.to_string()))?;
        if self.columns.len() == 1 {
            return Err(KanbanError::LastColumn);
        }

        self.columns.remove(index);
        let removed = self.cards.remove(column_id).unwrap_or_default();
        log::debug!("Removed column {column_id} with {} cards", removed.len());
        Ok(removed)
    }

    pub fn update_column_title(&mut self, column_id: &str, title: &str) -> Result<(), KanbanError> {
        let column = self
            .columns
            .iter_mut()
            .find(|c| c.id == column_id)
            .ok_or_else(|| KanbanError::UnknownColumn(column_id.to_string()))?;
        column.title = non_blank(title)?.to_string();
        Ok(())
    }

    pub fn update_card(
        &mut self,
        column_id: &str,
        card_id: &str,
        text: &str,
    ) -> Result<(), KanbanError> {
        let text = non_blank(text)?.to_string();
        let card = self
            .cards_mut(column_id)?
            .iter_mut()
            .find(|c| c.id == card_id)
            .ok_or_else(|| KanbanError::UnknownCard(card_id.to_string()))?;
        card.text = text;
        Ok(())
    }

    /// Move a card to the end of another column
    ///
    /// Moving within the same column is a no-op. Both columns and the card are
    /// checked before anything is removed.
    pub fn move_card(&mut self, card_id: &str, from: &str, to: &str) -> Result<(), KanbanError> {
        if from == to {
            return Ok(());
        }
        if !self.cards.contains_key(to) {
            return Err(KanbanError::UnknownColumn(to.to_string()));
        }

        let source = self.cards_mut(from)?;
        let index = source
            .iter()
            .position(|c| c.id == card_id)
            .ok_or_else(|| KanbanError::UnknownCard(card_id.to_string()))?;
        let card = source.remove(index);
        self.cards_mut(to)?.push(card);
        log::debug!("Moved card {card_id} from {from} to {to}");
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, KanbanError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Load a board, refusing any that breaks the one-card-one-column rule
    pub fn from_json(json: &str) -> Result<Self, KanbanError> {
        let mut board: Board = serde_json::from_str(json)?;
        board.validate()?;
        board.next_id = board.max_numeric_id() + 1;
        Ok(board)
    }

    /// Check every card list belongs to a column and ids are unique
    pub fn validate(&self) -> Result<(), KanbanError> {
        if self.columns.is_empty() {
            return Err(KanbanError::Inconsistent("no columns".into()));
        }

        let mut ids = HashSet::new();
        for column in &self.columns {
            if !ids.insert(column.id.as_str()) {
                return Err(KanbanError::Inconsistent(format!(
                    "duplicate column id `{}`",
                    column.id
                )));
            }
            if !self.cards.contains_key(&column.id) {
                return Err(KanbanError::Inconsistent(format!(
                    "column `{}` has no card list",
                    column.id
                )));
            }
        }
        if let Some(orphan) = self.cards.keys().find(|k| !ids.contains(k.as_str())) {
            return Err(KanbanError::Inconsistent(format!(
                "cards listed under unknown column `{orphan}`"
            )));
        }

        let mut card_ids = HashSet::new();
        for card in self.cards.values().flatten() {
            if !card_ids.insert(card.id.as_str()) || ids.contains(card.id.as_str()) {
                return Err(KanbanError::Inconsistent(format!(
                    "duplicate id `{}`",
                    card.id
                )));
            }
        }
        Ok(())
    }
}
