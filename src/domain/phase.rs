use crate::domain::order::OrderState;
use crate::error::{KanbanError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Purpose of a phase within the service workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseKind {
    /// Quotation and negotiation with the customer
    Commercial,
    /// Operational execution of the service
    Technical,
    /// Invoicing, payment and closing
    Administrative,
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Commercial => write!(f, "commercial"),
            Self::Technical => write!(f, "technical"),
            Self::Administrative => write!(f, "administrative"),
        }
    }
}

/// Color tokens used to paint a phase header and its columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseColors {
    pub accent: String,
    pub background: String,
}

impl PhaseColors {
    pub fn new(accent: &str, background: &str) -> Self {
        Self {
            accent: accent.to_string(),
            background: background.to_string(),
        }
    }
}

/// A labeled group of contiguous states
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub kind: PhaseKind,
    pub label: String,
    pub icon: String,
    pub colors: PhaseColors,
    pub states: Vec<OrderState>,
}

impl Phase {
    pub fn new(kind: PhaseKind, label: &str, icon: &str, states: Vec<OrderState>) -> Self {
        Self {
            kind,
            label: label.to_string(),
            icon: icon.to_string(),
            colors: PhaseColors::new("slate", "slate-50"),
            states,
        }
    }

    pub fn with_colors(mut self, colors: PhaseColors) -> Self {
        self.colors = colors;
        self
    }

    pub fn contains(&self, state: OrderState) -> bool {
        self.states.contains(&state)
    }
}

/// Role claim issued by the authentication provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Commercial,
    Technical,
    Administrative,
}

impl Role {
    /// Elevated roles see the whole workflow regardless of other claims
    pub fn is_elevated(self) -> bool {
        matches!(self, Self::Admin | Self::Manager)
    }
}

/// Returns true when the role set restricts the board to operational phases
fn is_technical_only(roles: &[Role]) -> bool {
    roles.contains(&Role::Technical) && !roles.iter().any(|role| role.is_elevated())
}

#[derive(Deserialize)]
struct RegistryDefinition {
    phases: Vec<Phase>,
}

/// Immutable table mapping every state to exactly one phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseRegistry {
    phases: Vec<Phase>,
    #[serde(skip)]
    index: HashMap<OrderState, usize>,
}

impl PhaseRegistry {
    /// Builds a registry, validating that `phases` partition the state set
    pub fn new(phases: Vec<Phase>) -> Result<Self> {
        let mut index = HashMap::new();

        for (position, phase) in phases.iter().enumerate() {
            if phase.states.is_empty() {
                return Err(KanbanError::Config(format!(
                    "phase '{}' has no states",
                    phase.label
                )));
            }
            for state in &phase.states {
                if let Some(previous) = index.insert(*state, position) {
                    return Err(KanbanError::DuplicateState {
                        state: state.slug().to_string(),
                        first: phases[previous].label.clone(),
                        second: phase.label.clone(),
                    });
                }
            }
        }

        if let Some(missing) = OrderState::ALL
            .into_iter()
            .find(|state| !index.contains_key(state))
        {
            return Err(KanbanError::MissingPhase(missing.slug().to_string()));
        }

        Ok(Self { phases, index })
    }

    /// Loads and validates a registry from its JSON definition
    pub fn from_json(json: &str) -> Result<Self> {
        let definition: RegistryDefinition = serde_json::from_str(json)?;
        Self::new(definition.phases)
    }

    /// Serializes the registry definition to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// All phases in board order
    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// Resolves the phase a state belongs to
    pub fn phase_of(&self, state: OrderState) -> Result<&Phase> {
        self.index
            .get(&state)
            .map(|&position| &self.phases[position])
            .ok_or_else(|| KanbanError::MissingPhase(state.slug().to_string()))
    }

    /// Phases visible to a single role
    pub fn phases_for_role(&self, role: Role) -> Vec<&Phase> {
        self.phases_for_roles(&[role])
    }

    /// Phases visible to a user holding `roles`.
    ///
    /// Technical users without an elevated role only see operational phases;
    /// everyone else sees the full workflow.
    pub fn phases_for_roles(&self, roles: &[Role]) -> Vec<&Phase> {
        let technical_only = is_technical_only(roles);
        self.phases
            .iter()
            .filter(|phase| !technical_only || phase.kind == PhaseKind::Technical)
            .collect()
    }

    /// States of the visible phases, flattened in layout order
    pub fn visible_states(&self, roles: &[Role]) -> Vec<OrderState> {
        self.phases_for_roles(roles)
            .into_iter()
            .flat_map(|phase| phase.states.iter().copied())
            .collect()
    }
}

impl Default for PhaseRegistry {
    fn default() -> Self {
        let phases = vec![
            Phase::new(
                PhaseKind::Commercial,
                "Commercial",
                "💼",
                vec![OrderState::New, OrderState::Quoted, OrderState::Approved],
            )
            .with_colors(PhaseColors::new("blue-600", "blue-50")),
            Phase::new(
                PhaseKind::Technical,
                "Technical",
                "🔧",
                vec![
                    OrderState::Scheduled,
                    OrderState::InProgress,
                    OrderState::Completed,
                ],
            )
            .with_colors(PhaseColors::new("amber-600", "amber-50")),
            Phase::new(
                PhaseKind::Administrative,
                "Administrative",
                "🧾",
                vec![OrderState::Invoiced, OrderState::Paid, OrderState::Closed],
            )
            .with_colors(PhaseColors::new("emerald-600", "emerald-50")),
        ];

        let index = phases
            .iter()
            .enumerate()
            .flat_map(|(position, phase)| phase.states.iter().map(move |s| (*s, position)))
            .collect();

        Self { phases, index }
    }
}
