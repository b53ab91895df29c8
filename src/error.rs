//! Error types for the combination engine

use thiserror::Error;

use crate::actions::ActionId;
use crate::groups::GroupId;

/// Main error type for hierarchy edits and generation
#[derive(Error, Debug)]
pub enum CombiError {
    #[error("Element {child} does not exist at level {level}")]
    InvalidReference { level: usize, child: usize },

    #[error("Element {child} is already part of group {group}")]
    DuplicateElement { group: GroupId, child: usize },

    #[error("Level {0} not found in hierarchy")]
    LevelNotFound(usize),

    #[error("Group {group} not found at level {level}")]
    GroupNotFound { level: usize, group: GroupId },

    #[error("Action {0} not found in registry")]
    ActionNotFound(ActionId),

    #[error("Action {0} already exists in registry")]
    DuplicateAction(ActionId),

    #[error("Root level contains no group")]
    EmptyRootLevel,

    #[error("Root level must contain exactly one group, found {0}")]
    MultipleRootGroups(usize),

    #[error("Structural error: {0}")]
    Structural(String),

    #[error("Action {0} has a category with no coefficient row for this country")]
    UnknownCategory(ActionId),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("No result vector for action {0}")]
    MissingResult(ActionId),

    #[error("Generation cancelled")]
    Cancelled,

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for combination engine operations
pub type CombiResult<T> = Result<T, CombiError>;
