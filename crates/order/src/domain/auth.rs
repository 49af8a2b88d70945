use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Staff,
    Guest,
}

impl FromStr for Role {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Role::Admin,
            "staff" => Role::Staff,
            _ => Role::Guest,
        })
    }
}

/// Who is calling. Built by the transport layer and passed explicitly into
/// every service operation; services never look up session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: Option<i32>,
    pub role: Role,
}

impl AuthContext {
    pub fn new(user_id: Option<i32>, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn staff(user_id: i32) -> Self {
        Self::new(Some(user_id), Role::Staff)
    }

    /// Admin and staff may operate on orders and reports.
    pub fn can_manage_orders(&self) -> bool {
        self.user_id.is_some() && matches!(self.role, Role::Admin | Role::Staff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_signed_in_staff_or_admin_manage_orders() {
        assert!(AuthContext::staff(3).can_manage_orders());
        assert!(AuthContext::new(Some(1), Role::Admin).can_manage_orders());
        assert!(!AuthContext::new(Some(9), Role::Guest).can_manage_orders());
        assert!(!AuthContext::new(None, Role::Staff).can_manage_orders());
    }

    #[test]
    fn unknown_roles_degrade_to_guest() {
        assert_eq!("ADMIN".parse::<Role>(), Ok(Role::Admin));
        assert_eq!(" staff ".parse::<Role>(), Ok(Role::Staff));
        assert_eq!("owner".parse::<Role>(), Ok(Role::Guest));
    }
}
