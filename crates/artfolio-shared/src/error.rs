use thiserror::Error;

/// Rejected user input.  Produced before anything touches storage.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("{field} must be greater than zero")]
    NonPositivePrice { field: &'static str },

    #[error("Discounted price {discounted} exceeds original price {original}")]
    DiscountExceedsOriginal { original: f64, discounted: f64 },
}

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Password hashing failed: {0}")]
    Hash(String),

    #[error("Stored password hash is malformed")]
    MalformedHash,
}
