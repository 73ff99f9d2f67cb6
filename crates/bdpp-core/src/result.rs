use crate::error::BdppError;

pub type Result<T> = std::result::Result<T, BdppError>;
