use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

use crate::error::KanbanError;

/// Opaque, unique identifier of a service order
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrderId(String);

impl OrderId {
    /// Generates a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for OrderId {
    type Err = KanbanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(KanbanError::InvalidOrderId(s.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl TryFrom<String> for OrderId {
    type Error = KanbanError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<OrderId> for String {
    fn from(id: OrderId) -> Self {
        id.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Workflow state of a service order.
///
/// Variants are declared in board layout order, so the derived `Ord`
/// is the column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderState {
    New,
    Quoted,
    Approved,
    Scheduled,
    InProgress,
    Completed,
    Invoiced,
    Paid,
    Closed,
}

impl OrderState {
    /// Every state, in layout order
    pub const ALL: [OrderState; 9] = [
        Self::New,
        Self::Quoted,
        Self::Approved,
        Self::Scheduled,
        Self::InProgress,
        Self::Completed,
        Self::Invoiced,
        Self::Paid,
        Self::Closed,
    ];

    /// Index of this state in [`OrderState::ALL`]
    pub fn position(self) -> usize {
        self as usize
    }

    /// Kebab-case slug used in configuration files and serialized orders
    pub fn slug(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Quoted => "quoted",
            Self::Approved => "approved",
            Self::Scheduled => "scheduled",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Invoiced => "invoiced",
            Self::Paid => "paid",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => write!(f, "New"),
            Self::Quoted => write!(f, "Quoted"),
            Self::Approved => write!(f, "Approved"),
            Self::Scheduled => write!(f, "Scheduled"),
            Self::InProgress => write!(f, "In Progress"),
            Self::Completed => write!(f, "Completed"),
            Self::Invoiced => write!(f, "Invoiced"),
            Self::Paid => write!(f, "Paid"),
            Self::Closed => write!(f, "Closed"),
        }
    }
}

impl FromStr for OrderState {
    type Err = KanbanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        Self::ALL
            .into_iter()
            .find(|state| state.slug() == normalized)
            .ok_or_else(|| KanbanError::InvalidState(s.to_string()))
    }
}

/// Urgency of a service order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// Badge color token for the card priority pill
    pub fn badge_color(self) -> &'static str {
        match self {
            Self::Low => "gray",
            Self::Medium => "blue",
            Self::High => "orange",
            Self::Urgent => "red",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
            Self::Urgent => write!(f, "Urgent"),
        }
    }
}

/// Kind of mechanical service requested
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Preventive,
    #[default]
    Corrective,
    Installation,
    Inspection,
    Emergency,
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Preventive => write!(f, "Preventive"),
            Self::Corrective => write!(f, "Corrective"),
            Self::Installation => write!(f, "Installation"),
            Self::Inspection => write!(f, "Inspection"),
            Self::Emergency => write!(f, "Emergency"),
        }
    }
}

/// A service order as shown on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub number: u32,
    pub company: String,
    pub description: String,
    pub state: OrderState,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub service_type: ServiceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technician: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Creates a new order in the `New` state
    pub fn new(id: OrderId, number: u32, company: impl Into<String>) -> Self {
        Self {
            id,
            number,
            company: company.into(),
            description: String::new(),
            state: OrderState::New,
            priority: Priority::default(),
            service_type: ServiceType::default(),
            technician: None,
            amount: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_state(mut self, state: OrderState) -> Self {
        self.state = state;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_service_type(mut self, service_type: ServiceType) -> Self {
        self.service_type = service_type;
        self
    }

    pub fn with_technician(mut self, technician: impl Into<String>) -> Self {
        self.technician = Some(technician.into());
        self
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_id_parsing() {
        let id = OrderId::from_str("OS-0042").unwrap();
        assert_eq!(id.as_str(), "OS-0042");

        let id = OrderId::from_str("  padded  ").unwrap();
        assert_eq!(id.as_str(), "padded");

        assert!(OrderId::from_str("").is_err());
        assert!(OrderId::from_str("   ").is_err());
    }

    #[test]
    fn test_order_id_deserialization_is_validated() {
        let id: OrderId = serde_json::from_str("\"OS-7\"").unwrap();
        assert_eq!(id.as_str(), "OS-7");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"OS-7\"");

        assert!(serde_json::from_str::<OrderId>("\"\"").is_err());
        assert!(serde_json::from_str::<OrderId>("\"  \"").is_err());
        assert!(OrderId::try_from(String::new()).is_err());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = OrderId::generate();
        let b = OrderId::generate();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn test_state_layout_order() {
        for (index, state) in OrderState::ALL.iter().enumerate() {
            assert_eq!(state.position(), index);
        }
        assert!(OrderState::New < OrderState::Scheduled);
        assert!(OrderState::Paid < OrderState::Closed);
    }

    #[test]
    fn test_state_parsing() {
        assert_eq!(
            OrderState::from_str("in-progress").unwrap(),
            OrderState::InProgress
        );
        assert_eq!(
            OrderState::from_str("In Progress").unwrap(),
            OrderState::InProgress
        );
        assert_eq!(OrderState::from_str("PAID").unwrap(), OrderState::Paid);
        assert!(OrderState::from_str("archived").is_err());
    }

    #[test]
    fn test_state_serde_uses_slug() {
        let json = serde_json::to_string(&OrderState::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");

        let state: OrderState = serde_json::from_str("\"scheduled\"").unwrap();
        assert_eq!(state, OrderState::Scheduled);
    }

    #[test]
    fn test_priority_badge_colors() {
        assert_eq!(Priority::Low.badge_color(), "gray");
        assert_eq!(Priority::Urgent.badge_color(), "red");
        assert!(Priority::High > Priority::Medium);
    }

    #[test]
    fn test_order_builder() {
        let order = Order::new("o1".parse::<OrderId>().unwrap(), 17, "Acme Tornos")
            .with_state(OrderState::Quoted)
            .with_priority(Priority::High)
            .with_technician("R. Silva")
            .with_amount(Decimal::new(125050, 2));

        assert_eq!(order.state, OrderState::Quoted);
        assert_eq!(order.priority, Priority::High);
        assert_eq!(order.technician.as_deref(), Some("R. Silva"));
        assert_eq!(order.amount, Some(Decimal::new(125050, 2)));
        assert_eq!(order.service_type, ServiceType::Corrective);
    }

    #[test]
    fn test_order_deserializes_with_defaults() {
        let json = r#"{
            "id": "o9",
            "number": 9,
            "company": "Hidraulica Sur",
            "description": "Pump leak",
            "state": "new",
            "created_at": "2024-03-01T10:00:00Z"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.id.as_str(), "o9");
        assert_eq!(order.priority, Priority::Medium);
        assert!(order.technician.is_none());
        assert!(order.amount.is_none());
    }
}
