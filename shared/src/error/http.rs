//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::AppointmentNotFound
            | Self::SubcategoryNotFound
            | Self::ClientNotFound
            | Self::ProductNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::AppointmentTerminalState
            | Self::SlotAlreadyBooked
            | Self::ClientPhoneDuplicate => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::PermissionDenied
            | Self::RoleRequired
            | Self::ElevatedRoleRequired
            | Self::UnknownRole => StatusCode::FORBIDDEN,

            // 422 Unprocessable Entity (intake eligibility rejections)
            Self::CartEmpty
            | Self::QualityNotExcellent
            | Self::SubcategoryDisabled
            | Self::MinimumNotMet => StatusCode::UNPROCESSABLE_ENTITY,

            // 500 Internal Server Error
            Self::InternalError | Self::DatabaseError | Self::ConfigError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request (default for validation/business errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_race_maps_to_conflict() {
        assert_eq!(
            ErrorCode::SlotAlreadyBooked.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ErrorCode::AppointmentTerminalState.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ErrorCode::ClientPhoneDuplicate.http_status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn eligibility_rejections_map_to_unprocessable() {
        assert_eq!(
            ErrorCode::MinimumNotMet.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ErrorCode::SubcategoryDisabled.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
