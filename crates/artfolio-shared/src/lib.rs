pub mod constants;
pub mod error;
pub mod password;
pub mod pricing;
pub mod types;
pub mod validation;
