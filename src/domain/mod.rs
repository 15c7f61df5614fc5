pub mod board;
pub mod card;
pub mod column;
pub mod drag;
pub mod kanban;
pub mod order;
pub mod phase;
pub mod sorting;

pub use board::{apply_reorder, apply_state_change, bucket_for, buckets, BoardView, PhaseSection};
pub use card::{Card, CardIntent, CardPresence};
pub use column::{Column, ColumnHighlight};
pub use drag::{DragConfig, DragCoordinator, DragPhase, DropTarget, Point};
pub use kanban::{BoardEvents, BoardIntent, KanbanBoard};
pub use order::{Order, OrderId, OrderState, Priority, ServiceType};
pub use phase::{Phase, PhaseColors, PhaseKind, PhaseRegistry, Role};
pub use sorting::{sort_orders, SortField, SortOrder};
