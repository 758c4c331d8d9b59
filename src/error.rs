//! Error types shared by the listing and favorites stores.

/// Errors raised by store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No record matched the requested id.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Raw id text that cannot be coerced to a numeric id.
    #[error("Invalid id: {0:?}")]
    InvalidId(String),

    /// The highest existing id leaves no room for a new one.
    #[error("No {entity} ids left after {max}")]
    IdsExhausted { entity: &'static str, max: u32 },
}

impl StoreError {
    pub fn property_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            entity: "Property",
            id: id.to_string(),
        }
    }

    pub fn favorite_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            entity: "Favorite",
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// A convenience type alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised while loading a seed dataset.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Failed to read seed file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed seed data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate {entity} id {id} in seed data")]
    DuplicateId { entity: &'static str, id: u32 },

    #[error("Listing {0} has no images")]
    MissingImages(u32),
}
