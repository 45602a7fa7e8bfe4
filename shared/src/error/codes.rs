//! Unified error codes for the Peque platform
//!
//! This module defines all error codes used across the server and clients.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Appointment errors
//! - 5xxx: Intake eligibility errors
//! - 6xxx: Client errors
//! - 7xxx: Inventory errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role required
    RoleRequired = 2002,
    /// Elevated role required (administrator, manager, superadmin, encargado)
    ElevatedRoleRequired = 2003,
    /// Role claim could not be normalized
    UnknownRole = 2004,

    // ==================== 4xxx: Appointment ====================
    /// Appointment not found
    AppointmentNotFound = 4001,
    /// Appointment is already in a terminal state
    AppointmentTerminalState = 4002,
    /// Slot was claimed by a concurrent booking
    SlotAlreadyBooked = 4003,
    /// Requested time is not on the slot grid
    SlotNotAvailable = 4004,
    /// Requested date is not a bookable weekday
    DateNotBookable = 4005,
    /// Cancellation requires a non-empty reason
    CancellationReasonRequired = 4006,
    /// Requested status transition is not allowed
    InvalidStatusTransition = 4007,

    // ==================== 5xxx: Intake eligibility ====================
    /// Cart has no items
    CartEmpty = 5001,
    /// One or more items are not excellent quality
    QualityNotExcellent = 5002,
    /// A referenced subcategory has purchasing disabled
    SubcategoryDisabled = 5003,
    /// Minimum item thresholds not met
    MinimumNotMet = 5004,
    /// Subcategory not found
    SubcategoryNotFound = 5101,

    // ==================== 6xxx: Client ====================
    /// Client not found
    ClientNotFound = 6001,
    /// Client name is required
    ClientNameRequired = 6002,
    /// Client phone is required
    ClientPhoneRequired = 6003,
    /// A client with this phone already exists
    ClientPhoneDuplicate = 6004,

    // ==================== 7xxx: Inventory ====================
    /// Inventory product not found
    ProductNotFound = 7001,
    /// Quantity must be a non-negative integer
    InvalidQuantity = 7002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
}

impl ErrorCode {
    /// Get the numeric code
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default human-readable message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::InvalidFormat => "Invalid format",
            Self::RequiredField => "Required field missing",
            Self::ValueOutOfRange => "Value out of range",

            Self::NotAuthenticated => "Please login first",
            Self::InvalidCredentials => "Invalid credentials",
            Self::TokenExpired => "Token expired",
            Self::TokenInvalid => "Invalid token",

            Self::PermissionDenied => "Permission denied",
            Self::RoleRequired => "Role required",
            Self::ElevatedRoleRequired => "Elevated role required",
            Self::UnknownRole => "Unknown role",

            Self::AppointmentNotFound => "Appointment not found",
            Self::AppointmentTerminalState => "Appointment is already closed",
            Self::SlotAlreadyBooked => "Slot already taken, please pick another",
            Self::SlotNotAvailable => "Requested time is not a bookable slot",
            Self::DateNotBookable => "Appointments are only available on Tuesdays and Thursdays",
            Self::CancellationReasonRequired => "A cancellation reason is required",
            Self::InvalidStatusTransition => "Status transition not allowed",

            Self::CartEmpty => "Add at least one item",
            Self::QualityNotExcellent => {
                "Only excellent-condition items are accepted via appointment"
            }
            Self::SubcategoryDisabled => "Subcategory is not currently being purchased",
            Self::MinimumNotMet => "Minimum item thresholds not met",
            Self::SubcategoryNotFound => "Subcategory not found",

            Self::ClientNotFound => "Client not found",
            Self::ClientNameRequired => "Client name is required",
            Self::ClientPhoneRequired => "Client phone is required",
            Self::ClientPhoneDuplicate => {
                "A client with this phone already exists, please search and select it"
            }

            Self::ProductNotFound => "Inventory product not found",
            Self::InvalidQuantity => "Quantity must be zero or positive",

            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
            Self::ConfigError => "Configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message(), self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code as u16
    }
}

/// Error returned when deserializing an unknown numeric error code
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,
            6 => Self::InvalidFormat,
            7 => Self::RequiredField,
            8 => Self::ValueOutOfRange,

            1001 => Self::NotAuthenticated,
            1002 => Self::InvalidCredentials,
            1003 => Self::TokenExpired,
            1004 => Self::TokenInvalid,

            2001 => Self::PermissionDenied,
            2002 => Self::RoleRequired,
            2003 => Self::ElevatedRoleRequired,
            2004 => Self::UnknownRole,

            4001 => Self::AppointmentNotFound,
            4002 => Self::AppointmentTerminalState,
            4003 => Self::SlotAlreadyBooked,
            4004 => Self::SlotNotAvailable,
            4005 => Self::DateNotBookable,
            4006 => Self::CancellationReasonRequired,
            4007 => Self::InvalidStatusTransition,

            5001 => Self::CartEmpty,
            5002 => Self::QualityNotExcellent,
            5003 => Self::SubcategoryDisabled,
            5004 => Self::MinimumNotMet,
            5101 => Self::SubcategoryNotFound,

            6001 => Self::ClientNotFound,
            6002 => Self::ClientNameRequired,
            6003 => Self::ClientPhoneRequired,
            6004 => Self::ClientPhoneDuplicate,

            7001 => Self::ProductNotFound,
            7002 => Self::InvalidQuantity,

            9001 => Self::InternalError,
            9002 => Self::DatabaseError,
            9003 => Self::ConfigError,

            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_u16() {
        for code in [
            ErrorCode::Success,
            ErrorCode::SlotAlreadyBooked,
            ErrorCode::MinimumNotMet,
            ErrorCode::ElevatedRoleRequired,
            ErrorCode::DatabaseError,
        ] {
            let raw: u16 = code.into();
            assert_eq!(ErrorCode::try_from(raw).unwrap(), code);
        }
    }

    #[test]
    fn unknown_code_is_rejected() {
        assert!(ErrorCode::try_from(65000).is_err());
    }
}
