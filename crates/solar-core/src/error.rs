use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error(
        "Infeasible structure: {beam_count} beams at {spacing} cm spacing need {required} cm, \
         but only {available} cm of depth is available"
    )]
    InfeasibleStructure {
        beam_count: usize,
        spacing: f64,
        required: f64,
        available: f64,
    },

    #[error("Geometry error: {0}")]
    Geometry(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl PlanError {
    /// True for rejections the user can recover from by adjusting the input.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            PlanError::ConstraintViolation(_) | PlanError::InfeasibleStructure { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, PlanError>;
