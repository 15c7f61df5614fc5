//! # Taller Kanban
//!
//! Service-order workflow engine for a mechanical-service CRM.
//!
//! Orders move through an ordered set of states grouped into commercial,
//! technical and administrative phases. This crate provides the phase
//! registry, the board model that buckets orders by state, and the drag
//! coordinator that turns pointer gestures into state changes and
//! reorders, without depending on any UI toolkit. Persistence is behind
//! the [`Storage`] trait.

pub mod domain;
pub mod error;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use domain::{
    board::{apply_reorder, apply_state_change, bucket_for, BoardView},
    drag::{DragConfig, DragCoordinator, DropTarget, Point},
    kanban::{BoardEvents, BoardIntent, KanbanBoard},
    order::{Order, OrderId, OrderState, Priority, ServiceType},
    phase::{Phase, PhaseKind, PhaseRegistry, Role},
};
pub use error::{KanbanError, Result};
pub use session::BoardSession;
pub use storage::Storage;
