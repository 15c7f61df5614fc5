use crate::{
    domain::{Order, OrderId, PhaseRegistry},
    error::Result,
};
use async_trait::async_trait;

#[cfg(feature = "file-storage")]
pub mod file_storage;

/// Storage trait for persisting the order list and the phase registry
#[async_trait]
pub trait Storage: Send + Sync {
    /// Initializes the storage backend
    async fn initialize(&self) -> Result<()>;

    /// Loads the authoritative order list, in board order
    async fn load_orders(&self) -> Result<Vec<Order>>;

    /// Replaces the stored order list
    async fn save_orders(&self, orders: &[Order]) -> Result<()>;

    /// Removes one order
    async fn delete_order(&self, id: &OrderId) -> Result<()>;

    /// Loads and validates the phase registry
    async fn load_registry(&self) -> Result<PhaseRegistry>;

    /// Saves the phase registry definition
    async fn save_registry(&self, registry: &PhaseRegistry) -> Result<()>;

    /// Checks if the storage has been initialized
    async fn is_initialized(&self) -> bool;
}
