use crate::domain::order::{Order, OrderId, OrderState};
use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

/// Where a card is being rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardPresence {
    /// Normal slot in its column
    Resting,
    /// Origin slot of the card being dragged, shown dimmed
    DragOrigin,
    /// Floating copy following the pointer; read-only
    Overlay,
}

/// User intents a card can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardIntent {
    Open,
    Delete,
    DragHandle,
}

/// Display projection of one order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub order_id: OrderId,
    pub state: OrderState,
    pub title: String,
    pub company: String,
    pub description: String,
    pub priority: String,
    pub priority_color: &'static str,
    pub service_type: String,
    pub technician: Option<String>,
    pub amount: String,
    pub created: String,
    pub presence: CardPresence,
}

impl Card {
    pub fn from_order(order: &Order, presence: CardPresence) -> Self {
        Self {
            order_id: order.id.clone(),
            state: order.state,
            title: format!("OS #{}", order.number),
            company: order.company.clone(),
            description: order.description.clone(),
            priority: order.priority.to_string(),
            priority_color: order.priority.badge_color(),
            service_type: order.service_type.to_string(),
            technician: order.technician.clone(),
            amount: format_amount(order.amount),
            created: format_date(order.created_at),
            presence,
        }
    }

    /// Overlay copies carry no handles
    pub fn is_interactive(&self) -> bool {
        self.presence != CardPresence::Overlay
    }

    pub fn is_dimmed(&self) -> bool {
        self.presence == CardPresence::DragOrigin
    }

    /// Intents this rendering of the card can emit
    pub fn intents(&self) -> &'static [CardIntent] {
        match self.presence {
            CardPresence::Resting | CardPresence::DragOrigin => {
                &[CardIntent::Open, CardIntent::Delete, CardIntent::DragHandle]
            }
            CardPresence::Overlay => &[],
        }
    }
}

/// Formats an amount as `$1,234.50`, or an em dash when absent
pub fn format_amount(amount: Option<Decimal>) -> String {
    let Some(amount) = amount else {
        return "—".to_string();
    };

    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${grouped}.{cents}")
}

pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%d/%m/%Y").to_string()
}
