use thiserror::Error;

use crate::model::PointKind;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("index {index} out of range for length {len}")]
    InvalidIndex { index: usize, len: usize },

    #[error("expected {expected} coordinates, got {got}")]
    RankMismatch { expected: usize, got: usize },

    #[error("point {index} has no drawable predecessor")]
    InvalidAdjacency { index: usize },

    #[error("point {index} is a {kind:?}, expected a line or curve")]
    UnsupportedControlPointType { index: usize, kind: PointKind },

    #[error("mask shape {got:?} does not match {expected:?}")]
    ShapeMismatch { expected: Vec<usize>, got: Vec<usize> },

    #[error("parameter '{name}' = {value} out of range")]
    ParameterOutOfRange { name: &'static str, value: f64 },

    #[error("malformed path description: {0}")]
    MalformedPathDescription(String),
}

impl Error {
    /// Stable short code, used by the wasm surface.
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidIndex { .. } => "invalid_index",
            Error::RankMismatch { .. } => "rank_mismatch",
            Error::InvalidAdjacency { .. } => "invalid_adjacency",
            Error::UnsupportedControlPointType { .. } => "unsupported_point",
            Error::ShapeMismatch { .. } => "shape_mismatch",
            Error::ParameterOutOfRange { .. } => "out_of_range",
            Error::MalformedPathDescription(_) => "malformed_path",
        }
    }

    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Error::MalformedPathDescription(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
