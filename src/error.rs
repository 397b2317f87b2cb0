use thiserror::Error;

/// Disagreement between the class index and an attribute list. These are never
/// recoverable: the scan that hit one is aborted and the error surfaces to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConsistencyError {
    #[error("rid {rid} was ingested more than once")]
    DuplicateRid { rid: usize },

    #[error("attribute list '{attribute}' references rid {rid}, which has no class label")]
    UnknownRid { attribute: String, rid: usize },

    #[error("class id {class} is not part of the root histogram")]
    UnknownClass { class: usize },

    #[error("moving class '{class}' to the left partition would drive its right count negative")]
    NegativeCount { class: String },

    #[error("attribute list '{attribute}' is not sorted: {current} follows {previous}")]
    UnsortedAttributeList {
        attribute: String,
        previous: f64,
        current: f64,
    },
}

#[derive(Debug, Error)]
pub enum SliqError {
    #[error(transparent)]
    Consistency(#[from] ConsistencyError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{resource}:{line}: {message}")]
    Parse {
        resource: String,
        line: usize,
        message: String,
    },

    #[error("sorting attribute '{attribute}' failed: {message}")]
    Sort { attribute: String, message: String },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("scan of attribute '{attribute}' was cancelled")]
    Cancelled { attribute: String },

    #[error("could not build thread pool: {0}")]
    ThreadPool(String),
}

/// Coarse classification of a [`SliqError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The engine's own inputs contradict each other.
    Consistency,
    /// An external collaborator (ingestion, materialization, sorting) failed.
    Collaborator,
    /// The run was misconfigured.
    Configuration,
    /// A time budget or caller cancelled the run.
    Cancelled,
}

impl SliqError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SliqError::Consistency(_) => ErrorKind::Consistency,
            SliqError::Io(_) | SliqError::Parse { .. } | SliqError::Sort { .. } => {
                ErrorKind::Collaborator
            }
            SliqError::InvalidParameter(_) | SliqError::ThreadPool(_) => ErrorKind::Configuration,
            SliqError::Cancelled { .. } => ErrorKind::Cancelled,
        }
    }

    pub(crate) fn parse(resource: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        SliqError::Parse {
            resource: resource.into(),
            line,
            message: message.into(),
        }
    }
}
