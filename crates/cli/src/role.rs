//! Cosmetic user role for the report view.
//!
//! The role never reaches the engine: it only decides whether the printed
//! report marks large discounts as needing approval.

use core::str::FromStr;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UserRole {
    Admin,
    Staff,
}

impl UserRole {
    /// Staff may not apply discounts above 30%; the engine still computes
    /// and reports the number either way.
    pub fn can_apply_discount(self, percent: u8) -> bool {
        match self {
            UserRole::Admin => true,
            UserRole::Staff => percent <= 30,
        }
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(UserRole::Admin),
            "staff" => Ok(UserRole::Staff),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_is_gated_above_thirty_percent() {
        assert!(UserRole::Staff.can_apply_discount(30));
        assert!(!UserRole::Staff.can_apply_discount(35));
        assert!(UserRole::Admin.can_apply_discount(50));
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("STAFF".parse::<UserRole>().unwrap(), UserRole::Staff);
        assert!("manager".parse::<UserRole>().is_err());
    }
}
