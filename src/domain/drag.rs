//! Drag coordinator.
//!
//! Single-pointer state machine that turns pointer gestures over columns and
//! cards into board mutations. Moves across states are committed while the
//! pointer hovers (live preview) and are never rolled back; reordering within
//! a state is committed on release.

use crate::domain::board::{apply_reorder, apply_state_change, find_order};
use crate::domain::order::{Order, OrderId, OrderState};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::mem;
use tracing::{debug, trace};

/// Pointer position in board coordinates (pixels)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

fn default_activation_distance() -> f64 {
    5.0
}

/// Gesture tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragConfig {
    /// Distance the pointer must exceed after pressing a card before a drag starts
    #[serde(default = "default_activation_distance")]
    pub activation_distance: f64,
}

impl DragConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            activation_distance: default_activation_distance(),
        }
    }
}

/// What the pointer is over
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum DropTarget {
    /// A whole column, including its empty area
    Column(OrderState),
    /// A card resting in some column
    Card(OrderId),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragPhase {
    #[default]
    Idle,
    /// Pointer is down on a card but has not travelled far enough yet
    Pressed { order_id: OrderId, origin: Point },
    Dragging {
        order_id: OrderId,
        over: Option<DropTarget>,
    },
}

#[derive(Debug, Clone)]
pub struct DragCoordinator {
    config: DragConfig,
    visible: Vec<OrderState>,
    phase: DragPhase,
}

impl DragCoordinator {
    /// Creates a coordinator that only accepts targets in `visible` states
    pub fn new(config: DragConfig, visible: Vec<OrderState>) -> Self {
        Self {
            config,
            visible,
            phase: DragPhase::Idle,
        }
    }

    pub fn phase(&self) -> &DragPhase {
        &self.phase
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    /// Order currently being dragged
    pub fn active_order(&self) -> Option<&OrderId> {
        match &self.phase {
            DragPhase::Dragging { order_id, .. } => Some(order_id),
            _ => None,
        }
    }

    /// State of the column under the pointer, for hover highlighting
    pub fn hovered_state(&self, orders: &[Order]) -> Option<OrderState> {
        match &self.phase {
            DragPhase::Dragging {
                over: Some(target), ..
            } => self.resolve_state(orders, target),
            _ => None,
        }
    }

    /// Pointer pressed on a card's drag handle.
    ///
    /// Ignored unless the coordinator is idle.
    pub fn pointer_down(&mut self, order_id: OrderId, at: Point) -> bool {
        if self.phase != DragPhase::Idle {
            debug!(order_id = %order_id, "pointer down ignored: gesture already in progress");
            return false;
        }
        self.phase = DragPhase::Pressed {
            order_id,
            origin: at,
        };
        true
    }

    /// Pointer moved. Returns the new order list when a live-preview move commits.
    pub fn pointer_move(
        &mut self,
        orders: &[Order],
        at: Point,
        over: Option<DropTarget>,
    ) -> Option<Vec<Order>> {
        if let DragPhase::Pressed { order_id, origin } = self.phase.clone() {
            if origin.distance_to(at) <= self.config.activation_distance {
                return None;
            }
            if find_order(orders, &order_id).is_none() {
                debug!(order_id = %order_id, "drag not started: order no longer on the board");
                self.phase = DragPhase::Idle;
                return None;
            }
            debug!(order_id = %order_id, "drag started");
            self.phase = DragPhase::Dragging {
                order_id,
                over: None,
            };
        }

        self.hover(orders, over)
    }

    /// Pointer released. Returns the new order list when a move or reorder commits.
    pub fn release(&mut self, orders: &[Order], over: Option<DropTarget>) -> Option<Vec<Order>> {
        let preview = if self.is_dragging() {
            self.hover(orders, over.clone())
        } else {
            None
        };

        let DragPhase::Dragging { order_id, .. } = mem::take(&mut self.phase) else {
            return None;
        };

        let current = preview.as_deref().unwrap_or(orders);
        let reordered = match over {
            Some(DropTarget::Card(target_id)) if target_id != order_id => {
                self.reorder(current, &order_id, &target_id)
            }
            Some(_) => None,
            None => {
                debug!(order_id = %order_id, "drop without target");
                None
            }
        };

        debug!(order_id = %order_id, "drag ended");
        reordered.or(preview)
    }

    /// Gesture cancelled by the input system. Already committed previews stay.
    pub fn cancel(&mut self) {
        if let DragPhase::Dragging { order_id, .. } = mem::take(&mut self.phase) {
            debug!(order_id = %order_id, "drag cancelled");
        }
    }

    fn hover(&mut self, orders: &[Order], over: Option<DropTarget>) -> Option<Vec<Order>> {
        let DragPhase::Dragging {
            order_id,
            over: current,
        } = &mut self.phase
        else {
            return None;
        };
        if *current == over {
            return None;
        }
        trace!(order_id = %order_id, over = ?over, "hover target changed");
        *current = over.clone();
        let order_id = order_id.clone();

        let target = over?;
        let Some(active) = find_order(orders, &order_id) else {
            debug!(order_id = %order_id, "hover skipped: dragged order no longer on the board");
            return None;
        };
        if target == DropTarget::Card(order_id.clone()) {
            return None;
        }

        let state = self.resolve_state(orders, &target)?;
        if state == active.state {
            return None;
        }

        debug!(order_id = %order_id, from = %active.state, to = %state, "live preview move");
        Some(apply_state_change(orders, &order_id, state))
    }

    fn reorder(&self, orders: &[Order], from: &OrderId, to: &OrderId) -> Option<Vec<Order>> {
        let active = find_order(orders, from)?;
        let target = find_order(orders, to)?;
        if active.state != target.state || !self.is_visible(target.state) {
            return None;
        }

        let updated = apply_reorder(orders, active.state, from, to);
        (updated != orders).then_some(updated)
    }

    /// Resolves a target to its column state, rejecting hidden or unknown targets
    fn resolve_state(&self, orders: &[Order], target: &DropTarget) -> Option<OrderState> {
        let state = match target {
            DropTarget::Column(state) => *state,
            DropTarget::Card(id) => match find_order(orders, id) {
                Some(order) => order.state,
                None => {
                    debug!(card = %id, "target card no longer on the board");
                    return None;
                }
            },
        };

        if self.is_visible(state) {
            Some(state)
        } else {
            debug!(state = %state, "target column not visible for this role");
            None
        }
    }

    fn is_visible(&self, state: OrderState) -> bool {
        self.visible.contains(&state)
    }
}
