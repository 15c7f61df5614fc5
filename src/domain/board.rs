//! Board model.
//!
//! The order list is the single source of truth; buckets are projections
//! recomputed from it. Mutations never touch the slice they are given and
//! always hand back a new list for the owner to adopt.

use crate::domain::card::{Card, CardPresence};
use crate::domain::column::{Column, ColumnHighlight};
use crate::domain::order::{Order, OrderId, OrderState};
use crate::domain::phase::{Phase, PhaseRegistry, Role};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Orders currently in `state`, in list order
pub fn bucket_for(orders: &[Order], state: OrderState) -> Vec<&Order> {
    orders.iter().filter(|order| order.state == state).collect()
}

/// Every state's bucket, including empty ones
pub fn buckets(orders: &[Order]) -> BTreeMap<OrderState, Vec<&Order>> {
    let mut map: BTreeMap<OrderState, Vec<&Order>> = OrderState::ALL
        .into_iter()
        .map(|state| (state, Vec::new()))
        .collect();
    for order in orders {
        map.entry(order.state).or_default().push(order);
    }
    map
}

pub fn find_order<'a>(orders: &'a [Order], id: &OrderId) -> Option<&'a Order> {
    orders.iter().find(|order| &order.id == id)
}

/// Moves an order into `state`.
///
/// The moved order is placed at the end of the list, which makes it the last
/// card of the target bucket. Unknown ids and orders already in `state` leave
/// the list unchanged.
pub fn apply_state_change(orders: &[Order], id: &OrderId, state: OrderState) -> Vec<Order> {
    let Some(position) = orders.iter().position(|order| &order.id == id) else {
        debug!(order_id = %id, "state change skipped: order not found");
        return orders.to_vec();
    };
    if orders[position].state == state {
        return orders.to_vec();
    }

    let mut updated = Vec::with_capacity(orders.len());
    updated.extend_from_slice(&orders[..position]);
    updated.extend_from_slice(&orders[position + 1..]);

    let mut moved = orders[position].clone();
    moved.state = state;
    updated.push(moved);
    updated
}

/// Moves `from` to the position `to` holds within the bucket of `state`.
///
/// Orders outside the bucket keep their list positions. Does nothing when
/// either id is missing, the ids are equal, or either order is in a
/// different state.
pub fn apply_reorder(orders: &[Order], state: OrderState, from: &OrderId, to: &OrderId) -> Vec<Order> {
    let slots: Vec<usize> = orders
        .iter()
        .enumerate()
        .filter(|(_, order)| order.state == state)
        .map(|(index, _)| index)
        .collect();

    let from_index = slots.iter().position(|&slot| &orders[slot].id == from);
    let to_index = slots.iter().position(|&slot| &orders[slot].id == to);

    let (Some(from_index), Some(to_index)) = (from_index, to_index) else {
        debug!(%from, %to, state = %state, "reorder skipped: orders not both in bucket");
        return orders.to_vec();
    };
    if from_index == to_index {
        return orders.to_vec();
    }

    let mut bucket: Vec<Order> = slots.iter().map(|&slot| orders[slot].clone()).collect();
    let moved = bucket.remove(from_index);
    bucket.insert(to_index, moved);

    let mut updated = orders.to_vec();
    for (slot, order) in slots.into_iter().zip(bucket) {
        updated[slot] = order;
    }
    updated
}

/// A phase section of the rendered board
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseSection {
    pub label: String,
    pub icon: String,
    pub accent: String,
    pub background: String,
    pub columns: Vec<Column>,
}

/// Full render projection: visible phases, their columns and the drag overlay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardView {
    pub sections: Vec<PhaseSection>,
    pub overlay: Option<Card>,
}

impl BoardView {
    /// Projects `orders` onto the phases visible to `roles`.
    ///
    /// `active` is the order being dragged, if any; `hovered` is the state of
    /// the column under the pointer.
    pub fn project(
        registry: &PhaseRegistry,
        roles: &[Role],
        orders: &[Order],
        active: Option<&OrderId>,
        hovered: Option<OrderState>,
    ) -> Self {
        let mut buckets = buckets(orders);

        let sections = registry
            .phases_for_roles(roles)
            .into_iter()
            .map(|phase| section(phase, &mut buckets, active, hovered))
            .collect();

        let overlay = active
            .and_then(|id| find_order(orders, id))
            .map(|order| Card::from_order(order, CardPresence::Overlay));

        Self { sections, overlay }
    }

    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.sections.iter().flat_map(|section| section.columns.iter())
    }

    pub fn column(&self, state: OrderState) -> Option<&Column> {
        self.columns().find(|column| column.state == state)
    }
}

fn section(
    phase: &Phase,
    buckets: &mut BTreeMap<OrderState, Vec<&Order>>,
    active: Option<&OrderId>,
    hovered: Option<OrderState>,
) -> PhaseSection {
    let columns = phase
        .states
        .iter()
        .map(|&state| {
            let cards = buckets
                .remove(&state)
                .unwrap_or_default()
                .into_iter()
                .map(|order| {
                    let presence = if Some(&order.id) == active {
                        CardPresence::DragOrigin
                    } else {
                        CardPresence::Resting
                    };
                    Card::from_order(order, presence)
                })
                .collect();

            let highlight = if hovered == Some(state) {
                ColumnHighlight::Hovered
            } else {
                ColumnHighlight::Idle
            };

            Column::new(state).with_cards(cards).with_highlight(highlight)
        })
        .collect();

    PhaseSection {
        label: phase.label.clone(),
        icon: phase.icon.clone(),
        accent: phase.colors.accent.clone(),
        background: phase.colors.background.clone(),
        columns,
    }
}
