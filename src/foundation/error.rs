use crate::foundation::core::PersonId;

/// Convenience result type used across famtree.
pub type FamtreeResult<T> = Result<T, FamtreeError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum FamtreeError {
    /// Input records that cannot be turned into a tree (missing `id`, undecodable JSON).
    #[error("malformed data: {0}")]
    MalformedData(String),

    /// A person was reached again while still on the current downward path.
    #[error("cyclic ancestry: person {0} is their own ancestor")]
    CyclicAncestry(PersonId),

    /// Errors while fitting or rasterizing a drawing plan.
    #[error("render error: {0}")]
    Render(String),

    /// Errors while decoding photos or backgrounds.
    #[error("asset error: {0}")]
    Asset(String),

    /// Errors when serializing data structures such as drawing plans.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FamtreeError {
    /// Build a [`FamtreeError::MalformedData`] value.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedData(msg.into())
    }

    /// Build a [`FamtreeError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`FamtreeError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`FamtreeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
