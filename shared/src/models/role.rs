//! Staff roles
//!
//! 角色在认证边界一次性归一化为枚举，下游只比较枚举值，
//! 不在每个调用点重新解析字符串。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Normalized staff role
///
/// The upstream auth subsystem issues tokens with a free-form role claim;
/// [`Role::from_str`] is the single place that claim is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Platform superadmin
    Superadmin,
    /// Store administrator
    Administrator,
    /// Store manager
    Manager,
    /// Encargado — manager-equivalent shift lead
    Encargado,
    /// Regular employee (POS operator)
    Employee,
}

/// Error returned when a role claim cannot be normalized
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "admin" is the legacy spelling still present in older tokens
        match s.trim().to_ascii_lowercase().as_str() {
            "superadmin" => Ok(Self::Superadmin),
            "administrator" | "admin" => Ok(Self::Administrator),
            "manager" => Ok(Self::Manager),
            "encargado" => Ok(Self::Encargado),
            "employee" | "user" => Ok(Self::Employee),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

impl Role {
    /// Canonical string form (matches the serde representation)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Superadmin => "superadmin",
            Self::Administrator => "administrator",
            Self::Manager => "manager",
            Self::Encargado => "encargado",
            Self::Employee => "employee",
        }
    }

    /// Whether this role may perform inventory stock adjustments
    ///
    /// Elevated roles: superadmin, administrator, manager and encargado.
    pub fn is_elevated(&self) -> bool {
        !matches!(self, Self::Employee)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_legacy_spellings() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Administrator);
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Administrator);
        assert_eq!(" manager ".parse::<Role>().unwrap(), Role::Manager);
        assert_eq!("user".parse::<Role>().unwrap(), Role::Employee);
    }

    #[test]
    fn unknown_role_is_an_error() {
        assert!("wizard".parse::<Role>().is_err());
    }

    #[test]
    fn only_employee_is_not_elevated() {
        assert!(Role::Superadmin.is_elevated());
        assert!(Role::Administrator.is_elevated());
        assert!(Role::Manager.is_elevated());
        assert!(Role::Encargado.is_elevated());
        assert!(!Role::Employee.is_elevated());
    }
}
