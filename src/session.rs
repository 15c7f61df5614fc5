//! Page shell around a [`KanbanBoard`].
//!
//! The session owns the authoritative order list. It adopts every list the
//! board commits, writes it back to storage, and performs deletions against
//! storage before reloading.

use crate::domain::{
    sort_orders, BoardEvents, BoardIntent, BoardView, DragConfig, DragPhase, KanbanBoard, Order,
    OrderId, Role, SortField, SortOrder,
};
use crate::error::{KanbanError, Result};
use crate::storage::Storage;
use tracing::{debug, info};

/// Collects board callbacks so they can be applied asynchronously
#[derive(Default)]
struct Outbox {
    changed: Option<Vec<Order>>,
    opened: Option<OrderId>,
    deleted: Vec<OrderId>,
}

impl BoardEvents for Outbox {
    fn on_change(&mut self, orders: Vec<Order>) {
        self.changed = Some(orders);
    }

    fn on_open(&mut self, order: &Order) {
        self.opened = Some(order.id.clone());
    }

    fn on_delete(&mut self, id: &OrderId) {
        self.deleted.push(id.clone());
    }
}

pub struct BoardSession<S: Storage> {
    storage: S,
    board: KanbanBoard,
    orders: Vec<Order>,
    selected: Option<OrderId>,
}

impl<S: Storage> BoardSession<S> {
    /// Opens the board stored in `storage` for a user holding `roles`
    pub async fn open(storage: S, roles: Vec<Role>, config: DragConfig) -> Result<Self> {
        if !storage.is_initialized().await {
            return Err(KanbanError::NotInitialized);
        }

        let registry = storage.load_registry().await?;
        let orders = storage.load_orders().await?;
        info!(orders = orders.len(), ?roles, "board session opened");

        Ok(Self {
            storage,
            board: KanbanBoard::new(registry, roles, config),
            orders,
            selected: None,
        })
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Order whose detail view was last requested
    pub fn selected(&self) -> Option<&OrderId> {
        self.selected.as_ref()
    }

    pub fn board(&self) -> &KanbanBoard {
        &self.board
    }

    pub fn render(&self) -> BoardView {
        self.board.render(&self.orders)
    }

    /// Feeds one input event through the board and applies the outcome
    pub async fn handle(&mut self, intent: BoardIntent) -> Result<()> {
        let mut outbox = Outbox::default();
        self.board.dispatch(&self.orders, intent, &mut outbox);

        if let Some(orders) = outbox.changed {
            // adopt first: the coordinator will not emit this move again
            self.orders = orders;
            self.storage.save_orders(&self.orders).await?;
            info!(orders = self.orders.len(), "board change persisted");
        }

        if let Some(id) = outbox.opened {
            self.selected = Some(id);
        }

        for id in outbox.deleted {
            match self.storage.delete_order(&id).await {
                Ok(()) => info!(order_id = %id, "order deleted"),
                Err(KanbanError::OrderNotFound(_)) => {
                    debug!(order_id = %id, "delete skipped: order already gone")
                }
                Err(err) => return Err(err),
            }
            if self.selected.as_ref() == Some(&id) {
                self.selected = None;
            }
            self.orders = self.storage.load_orders().await?;
        }

        Ok(())
    }

    /// Re-sorts the whole board and persists the new order.
    ///
    /// Ignored while a gesture is in progress.
    pub async fn sort(&mut self, field: SortField, order: SortOrder) -> Result<()> {
        if self.board.coordinator().phase() != &DragPhase::Idle {
            debug!(?field, "sort skipped: gesture in progress");
            return Ok(());
        }

        let mut sorted = self.orders.clone();
        sort_orders(&mut sorted, field, order);
        self.orders = sorted;
        self.storage.save_orders(&self.orders).await?;
        info!(?field, ?order, "board re-sorted");
        Ok(())
    }

    /// Replaces the in-memory list with the stored one
    pub async fn reload(&mut self) -> Result<()> {
        self.orders = self.storage.load_orders().await?;
        Ok(())
    }
}
