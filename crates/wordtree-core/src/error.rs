pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid record JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Structure(#[from] StructureError),

    #[error("Invalid layout config: {message}")]
    InvalidConfig { message: String },
}

/// Reasons a record set cannot be stratified into a single tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StructureError {
    #[error("missing parent \"{parent_id}\" for record \"{id}\"")]
    MissingParent { id: String, parent_id: String },

    #[error("multiple roots: \"{first}\" and \"{second}\"")]
    MultipleRoots { first: String, second: String },

    #[error("no root record (every id contains a dot)")]
    NoRoot,

    #[error("duplicate record id \"{id}\"")]
    DuplicateId { id: String },

    #[error("malformed record id \"{id}\"")]
    MalformedId { id: String },
}
