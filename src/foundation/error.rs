pub type StratumResult<T> = Result<T, StratumError>;

#[derive(thiserror::Error, Debug)]
pub enum StratumError {
    /// `save`/`restore`, `group_begin`/`group_end` or `mask_begin`/`mask_end` do not pair up.
    #[error("unbalanced state stack: {0}")]
    UnbalancedStateStack(String),

    #[error("singular transform (determinant {determinant})")]
    SingularTransform { determinant: f64 },

    #[error("invalid filter graph: {0}")]
    InvalidFilterGraph(String),

    #[error("resource budget exceeded: {0}")]
    ResourceBudgetExceeded(String),

    #[error("scene already submitted (frame {frame})")]
    SceneAlreadySubmitted { frame: u64 },

    #[error("validation error: {0}")]
    Validation(String),

    #[error("evaluation error: {0}")]
    Evaluation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StratumError {
    pub fn unbalanced(msg: impl Into<String>) -> Self {
        Self::UnbalancedStateStack(msg.into())
    }

    pub fn singular(determinant: f64) -> Self {
        Self::SingularTransform { determinant }
    }

    pub fn invalid_filter(msg: impl Into<String>) -> Self {
        Self::InvalidFilterGraph(msg.into())
    }

    pub fn budget(msg: impl Into<String>) -> Self {
        Self::ResourceBudgetExceeded(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Errors that abort the presentation of the current frame.
    ///
    /// Budget errors are recoverable: the compositor degrades and keeps going.
    pub fn is_frame_fatal(&self) -> bool {
        !matches!(self, Self::ResourceBudgetExceeded(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
