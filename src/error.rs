use thiserror::Error;

pub type Result<T> = std::result::Result<T, KanbanError>;

#[derive(Debug, Error)]
pub enum KanbanError {
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Invalid order ID: {0:?}")]
    InvalidOrderId(String),

    #[error("Unknown order state: {0}")]
    InvalidState(String),

    #[error("State {0} has no phase mapping")]
    MissingPhase(String),

    #[error("State {state} is mapped to more than one phase ({first} and {second})")]
    DuplicateState {
        state: String,
        first: String,
        second: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Board storage not initialized")]
    NotInitialized,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
