//! The module contains the error the utility core can throw.
//!
//! The errors are:
//!
//! - [`NotFound`] thrown when an entity id is unknown to the registry.
//! - [`InvalidLinkage`] thrown when a contract, service point and meter do
//!   not line up.
//! - [`InsufficientData`] thrown when estimation lacks recorded readings.
//! - [`DateOutOfRange`] thrown when a date is not bracketed by readings.
//! - [`InvalidDate`] thrown when a breakdown month is not a real calendar
//!   month.
//!
//! [`NotFound`]: UtilityError::NotFound
//! [`InvalidLinkage`]: UtilityError::InvalidLinkage
//! [`InsufficientData`]: UtilityError::InsufficientData
//! [`DateOutOfRange`]: UtilityError::DateOutOfRange
//! [`InvalidDate`]: UtilityError::InvalidDate
use thiserror::Error;

/// Utility core custom errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum UtilityError {
    #[error("\"{0}\" not found!")]
    NotFound(String),
    #[error("Invalid linkage: {0}")]
    InvalidLinkage(String),
    #[error("Not enough readings: {0}")]
    InsufficientData(String),
    #[error("Cannot estimate a reading for {0}")]
    DateOutOfRange(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}
