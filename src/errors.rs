use thiserror::Error;

use crate::order::OrderStatus;

#[derive(Debug, Error, PartialEq)]
pub enum BarError {
    #[error("Error while taking a lock")]
    LockError,

    #[error("Cocktail {0} is not on the menu")]
    CocktailNotFound(String),

    #[error("Ingredient {0} is not in stock")]
    IngredientNotFound(String),

    #[error("Ingredient {0} is already registered")]
    DuplicateIngredient(String),

    #[error("Cocktail {0} is already on the menu")]
    DuplicateCocktail(String),

    #[error("Employee {0} is already registered")]
    DuplicateEmployee(String),

    #[error("Employee {0} must have a speed greater than zero")]
    InvalidEmployeeSpeed(String),

    #[error("An order needs at least one cocktail")]
    EmptySelection,

    #[error("An order needs a client name")]
    EmptyClientName,

    #[error("Not enough {ingredient}: required {required}, available {available}")]
    InsufficientStock {
        ingredient: String,
        required: u64,
        available: u64,
    },

    #[error("There is no employee to prepare the order")]
    NoAvailableEmployee,

    #[error("Order can not go from {from:?} to {to:?}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("The preparation was cut off while closing the bar")]
    PreparationCutOff,

    #[error("Unexpected failure while preparing the order")]
    PreparationPanicked,

    #[error("An order was admitted but none was found")]
    EmptyQueueWhenNotExpected,

    #[error("The bar is closed, no more orders are taken")]
    SchedulerShutDown,

    #[error("{0} orders were still in preparation after the grace period")]
    ShutdownTimeout(usize),

    #[error("Error while reading the bar file: {0}")]
    FileReaderError(String),

    #[error("Invalid bar setup: {0}")]
    InvalidSetup(String),
}

impl<T> From<std::sync::PoisonError<T>> for BarError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        BarError::LockError
    }
}
