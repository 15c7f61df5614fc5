use crate::domain::order::Order;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::str::FromStr;

/// Fields available for sorting orders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Number,
    Company,
    State,
    Priority,
    Created,
    Amount,
}

/// Sort order direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "number" => Ok(SortField::Number),
            "company" => Ok(SortField::Company),
            "state" => Ok(SortField::State),
            "priority" => Ok(SortField::Priority),
            "created" => Ok(SortField::Created),
            "amount" => Ok(SortField::Amount),
            _ => Err(format!(
                "Invalid sort field '{}'. Valid fields: number, company, state, priority, created, amount",
                s
            )),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Ascending),
            "desc" => Ok(SortOrder::Descending),
            _ => Err(format!(
                "Invalid sort order '{}'. Valid orders: asc, desc",
                s
            )),
        }
    }
}

/// Sorts orders in place, e.g. to seed a board in a deterministic order.
///
/// The sort is stable, so equal keys keep their current relative order and
/// therefore their bucket positions.
///
/// # Examples
/// ```
/// use taller_kanban::domain::order::{Order, OrderId};
/// use taller_kanban::domain::sorting::{sort_orders, SortField, SortOrder};
///
/// let mut orders = vec![
///     Order::new("c".parse::<OrderId>().unwrap(), 3, "Gamma"),
///     Order::new("a".parse::<OrderId>().unwrap(), 1, "Alpha"),
///     Order::new("b".parse::<OrderId>().unwrap(), 2, "Beta"),
/// ];
///
/// sort_orders(&mut orders, SortField::Number, SortOrder::Ascending);
/// assert_eq!(orders[0].number, 1);
/// ```
pub fn sort_orders(orders: &mut [Order], field: SortField, order: SortOrder) {
    orders.sort_by(|a, b| {
        if field == SortField::Amount {
            return compare_option_amounts(a.amount, b.amount, order);
        }

        let cmp = match field {
            SortField::Number => a.number.cmp(&b.number),
            SortField::Company => a.company.to_lowercase().cmp(&b.company.to_lowercase()),
            SortField::State => a.state.cmp(&b.state),
            SortField::Priority => a.priority.cmp(&b.priority),
            SortField::Created => a.created_at.cmp(&b.created_at),
            SortField::Amount => Ordering::Equal,
        };

        match order {
            SortOrder::Ascending => cmp,
            SortOrder::Descending => cmp.reverse(),
        }
    });
}

/// Compare optional amounts with None always sorting to the end,
/// regardless of direction
fn compare_option_amounts(a: Option<Decimal>, b: Option<Decimal>, order: SortOrder) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match order {
            SortOrder::Ascending => a.cmp(&b),
            SortOrder::Descending => b.cmp(&a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::{OrderState, Priority};

    fn order(id: &str, number: u32, company: &str) -> Order {
        Order::new(id.parse().unwrap(), number, company)
    }

    #[test]
    fn test_sort_by_number() {
        let mut orders = vec![order("c", 3, "C"), order("a", 1, "A"), order("b", 2, "B")];

        sort_orders(&mut orders, SortField::Number, SortOrder::Ascending);
        assert_eq!(
            orders.iter().map(|o| o.number).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );

        sort_orders(&mut orders, SortField::Number, SortOrder::Descending);
        assert_eq!(
            orders.iter().map(|o| o.number).collect::<Vec<_>>(),
            vec![3, 2, 1]
        );
    }

    #[test]
    fn test_sort_by_company_case_insensitive() {
        let mut orders = vec![
            order("1", 1, "zeta Bombas"),
            order("2", 2, "Acme"),
            order("3", 3, "BETA Tornos"),
        ];

        sort_orders(&mut orders, SortField::Company, SortOrder::Ascending);

        assert_eq!(orders[0].company, "Acme");
        assert_eq!(orders[1].company, "BETA Tornos");
        assert_eq!(orders[2].company, "zeta Bombas");
    }

    #[test]
    fn test_sort_by_state_follows_workflow() {
        let mut orders = vec![
            order("1", 1, "A").with_state(OrderState::Paid),
            order("2", 2, "A").with_state(OrderState::New),
            order("3", 3, "A").with_state(OrderState::InProgress),
        ];

        sort_orders(&mut orders, SortField::State, SortOrder::Ascending);

        assert_eq!(orders[0].state, OrderState::New);
        assert_eq!(orders[1].state, OrderState::InProgress);
        assert_eq!(orders[2].state, OrderState::Paid);
    }

    #[test]
    fn test_sort_by_priority_descending_puts_urgent_first() {
        let mut orders = vec![
            order("1", 1, "A").with_priority(Priority::Low),
            order("2", 2, "A").with_priority(Priority::Urgent),
            order("3", 3, "A").with_priority(Priority::Medium),
        ];

        sort_orders(&mut orders, SortField::Priority, SortOrder::Descending);

        assert_eq!(orders[0].priority, Priority::Urgent);
        assert_eq!(orders[2].priority, Priority::Low);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let mut orders = vec![
            order("first", 1, "Same"),
            order("second", 2, "Same"),
            order("third", 3, "Same"),
        ];

        sort_orders(&mut orders, SortField::Company, SortOrder::Descending);

        assert_eq!(orders[0].id.as_str(), "first");
        assert_eq!(orders[2].id.as_str(), "third");
    }

    #[test]
    fn test_missing_amounts_sort_last_both_ways() {
        let mut orders = vec![
            order("none", 1, "A"),
            order("big", 2, "A").with_amount(Decimal::new(5000, 0)),
            order("small", 3, "A").with_amount(Decimal::new(10, 0)),
        ];

        sort_orders(&mut orders, SortField::Amount, SortOrder::Ascending);
        assert_eq!(orders[0].id.as_str(), "small");
        assert_eq!(orders[2].id.as_str(), "none");

        sort_orders(&mut orders, SortField::Amount, SortOrder::Descending);
        assert_eq!(orders[0].id.as_str(), "big");
        assert_eq!(orders[2].id.as_str(), "none");
    }

    #[test]
    fn test_parse_sort_arguments() {
        assert_eq!(SortField::from_str("Amount").unwrap(), SortField::Amount);
        assert_eq!(SortOrder::from_str("DESC").unwrap(), SortOrder::Descending);
        assert!(SortField::from_str("title").is_err());
        assert!(SortOrder::from_str("up").is_err());
    }
}
