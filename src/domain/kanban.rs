use crate::domain::board::{find_order, BoardView};
use crate::domain::drag::{DragConfig, DragCoordinator, DropTarget, Point};
use crate::domain::order::{Order, OrderId};
use crate::domain::phase::{PhaseRegistry, Role};
use tracing::debug;

/// Callbacks supplied by the page shell that owns the order list
pub trait BoardEvents {
    /// A mutation committed; `orders` is the list the shell should adopt
    fn on_change(&mut self, orders: Vec<Order>);

    /// The user asked to open an order's detail view
    fn on_open(&mut self, _order: &Order) {}

    /// The user asked to delete an order
    fn on_delete(&mut self, _id: &OrderId) {}
}

/// Input delivered to the board, in device order
#[derive(Debug, Clone, PartialEq)]
pub enum BoardIntent {
    PointerDown { order_id: OrderId, at: Point },
    PointerMove { at: Point, over: Option<DropTarget> },
    PointerUp { over: Option<DropTarget> },
    PointerCancel,
    Open(OrderId),
    Delete(OrderId),
}

/// Kanban board for one acting user.
///
/// Holds no orders; every call receives the shell's current list.
pub struct KanbanBoard {
    registry: PhaseRegistry,
    roles: Vec<Role>,
    coordinator: DragCoordinator,
}

impl KanbanBoard {
    pub fn new(registry: PhaseRegistry, roles: Vec<Role>, config: DragConfig) -> Self {
        let visible = registry.visible_states(&roles);
        Self {
            registry,
            roles,
            coordinator: DragCoordinator::new(config, visible),
        }
    }

    pub fn registry(&self) -> &PhaseRegistry {
        &self.registry
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn coordinator(&self) -> &DragCoordinator {
        &self.coordinator
    }

    /// Routes one intent, calling back into `events` for anything the shell must act on
    pub fn dispatch<E: BoardEvents + ?Sized>(
        &mut self,
        orders: &[Order],
        intent: BoardIntent,
        events: &mut E,
    ) {
        let committed = match intent {
            BoardIntent::PointerDown { order_id, at } => {
                self.coordinator.pointer_down(order_id, at);
                None
            }
            BoardIntent::PointerMove { at, over } => self.coordinator.pointer_move(orders, at, over),
            BoardIntent::PointerUp { over } => self.coordinator.release(orders, over),
            BoardIntent::PointerCancel => {
                self.coordinator.cancel();
                None
            }
            BoardIntent::Open(id) => {
                match find_order(orders, &id) {
                    Some(order) => events.on_open(order),
                    None => debug!(order_id = %id, "open skipped: order not found"),
                }
                None
            }
            BoardIntent::Delete(id) => {
                events.on_delete(&id);
                None
            }
        };

        if let Some(updated) = committed {
            events.on_change(updated);
        }
    }

    /// Render projection for the current list and gesture
    pub fn render(&self, orders: &[Order]) -> BoardView {
        BoardView::project(
            &self.registry,
            &self.roles,
            orders,
            self.coordinator.active_order(),
            self.coordinator.hovered_state(orders),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::board::bucket_for;
    use crate::domain::order::OrderState;

    #[derive(Default)]
    struct Shell {
        orders: Vec<Order>,
        changes: usize,
        opened: Vec<OrderId>,
        deleted: Vec<OrderId>,
    }

    impl BoardEvents for Shell {
        fn on_change(&mut self, orders: Vec<Order>) {
            self.orders = orders;
            self.changes += 1;
        }

        fn on_open(&mut self, order: &Order) {
            self.opened.push(order.id.clone());
        }

        fn on_delete(&mut self, id: &OrderId) {
            self.deleted.push(id.clone());
        }
    }

    impl Shell {
        fn with(orders: Vec<Order>) -> Self {
            Self {
                orders,
                ..Self::default()
            }
        }

        fn send(&mut self, board: &mut KanbanBoard, intent: BoardIntent) {
            let orders = self.orders.clone();
            board.dispatch(&orders, intent, self);
        }
    }

    fn order(name: &str, state: OrderState) -> Order {
        Order::new(id(name), 0, "Acme").with_state(state)
    }

    fn id(s: &str) -> OrderId {
        s.parse().unwrap()
    }

    #[test]
    fn test_full_gesture_moves_and_renders() {
        let mut board = KanbanBoard::new(
            PhaseRegistry::default(),
            vec![Role::Admin],
            DragConfig::default(),
        );
        let mut shell = Shell::with(vec![
            order("1", OrderState::New),
            order("2", OrderState::New),
            order("3", OrderState::Scheduled),
        ]);

        shell.send(
            &mut board,
            BoardIntent::PointerDown {
                order_id: id("2"),
                at: Point::new(0.0, 0.0),
            },
        );
        shell.send(
            &mut board,
            BoardIntent::PointerMove {
                at: Point::new(40.0, 0.0),
                over: Some(DropTarget::Column(OrderState::Scheduled)),
            },
        );
        assert_eq!(shell.changes, 1);

        let view = board.render(&shell.orders);
        let scheduled = view.column(OrderState::Scheduled).unwrap();
        assert!(scheduled.is_hovered());
        assert_eq!(scheduled.len(), 2);
        assert!(scheduled.cards[1].is_dimmed());
        assert!(view.overlay.is_some());

        shell.send(&mut board, BoardIntent::PointerUp { over: None });
        assert_eq!(shell.changes, 1);

        let view = board.render(&shell.orders);
        assert!(view.overlay.is_none());
        assert!(view.columns().all(|column| !column.is_hovered()));
        assert_eq!(bucket_for(&shell.orders, OrderState::New).len(), 1);
    }

    #[test]
    fn test_open_and_delete_are_delegated() {
        let mut board = KanbanBoard::new(
            PhaseRegistry::default(),
            vec![Role::Commercial],
            DragConfig::default(),
        );
        let mut shell = Shell::with(vec![order("1", OrderState::New)]);

        shell.send(&mut board, BoardIntent::Open(id("1")));
        shell.send(&mut board, BoardIntent::Open(id("missing")));
        shell.send(&mut board, BoardIntent::Delete(id("1")));

        assert_eq!(shell.opened, vec![id("1")]);
        assert_eq!(shell.deleted, vec![id("1")]);
        assert_eq!(shell.changes, 0);
        assert_eq!(shell.orders.len(), 1);
    }

    #[test]
    fn test_technical_user_cannot_reach_hidden_states() {
        let mut board = KanbanBoard::new(
            PhaseRegistry::default(),
            vec![Role::Technical],
            DragConfig::default(),
        );
        let mut shell = Shell::with(vec![order("1", OrderState::Scheduled)]);

        shell.send(
            &mut board,
            BoardIntent::PointerDown {
                order_id: id("1"),
                at: Point::default(),
            },
        );
        shell.send(
            &mut board,
            BoardIntent::PointerMove {
                at: Point::new(0.0, 50.0),
                over: Some(DropTarget::Column(OrderState::Invoiced)),
            },
        );
        shell.send(
            &mut board,
            BoardIntent::PointerUp {
                over: Some(DropTarget::Column(OrderState::Invoiced)),
            },
        );

        assert_eq!(shell.changes, 0);
        assert_eq!(shell.orders[0].state, OrderState::Scheduled);
        assert_eq!(board.render(&shell.orders).sections.len(), 1);
    }

    #[test]
    fn test_cancel_keeps_previewed_move() {
        let mut board = KanbanBoard::new(
            PhaseRegistry::default(),
            vec![Role::Manager],
            DragConfig::default(),
        );
        let mut shell = Shell::with(vec![order("1", OrderState::Quoted)]);

        shell.send(
            &mut board,
            BoardIntent::PointerDown {
                order_id: id("1"),
                at: Point::default(),
            },
        );
        shell.send(
            &mut board,
            BoardIntent::PointerMove {
                at: Point::new(100.0, 0.0),
                over: Some(DropTarget::Column(OrderState::Approved)),
            },
        );
        shell.send(&mut board, BoardIntent::PointerCancel);

        assert_eq!(shell.changes, 1);
        assert_eq!(shell.orders[0].state, OrderState::Approved);
        assert!(!board.coordinator().is_dragging());
    }
}
