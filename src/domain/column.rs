use crate::domain::card::Card;
use crate::domain::order::OrderState;
use serde::Serialize;

/// Visual feedback state of a column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnHighlight {
    #[default]
    Idle,
    /// The dragging pointer is over this column or one of its cards
    Hovered,
}

/// Drop zone bound to one state, holding that state's bucket as cards
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub state: OrderState,
    pub label: String,
    pub highlight: ColumnHighlight,
    pub cards: Vec<Card>,
}

impl Column {
    pub fn new(state: OrderState) -> Self {
        Self {
            state,
            label: state.to_string(),
            highlight: ColumnHighlight::Idle,
            cards: Vec::new(),
        }
    }

    pub fn with_cards(mut self, cards: Vec<Card>) -> Self {
        self.cards = cards;
        self
    }

    pub fn with_highlight(mut self, highlight: ColumnHighlight) -> Self {
        self.highlight = highlight;
        self
    }

    pub fn is_hovered(&self) -> bool {
        self.highlight == ColumnHighlight::Hovered
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }
}
