//! Navigation table for the console. Each route names the view it renders
//! and the access it needs; the auth guard decides on every navigation.

use crate::app_lib::AppError;
use crate::features::auth::Role;
use std::{fmt, str::FromStr};

/// Who may open a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Public,
    Role(Role),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Signup,
    AdminDashboard,
    AdminUsers,
    AdminFraudLogs,
    AdminFraudRules,
    UserAccounts,
    UserTransactions,
    UserTransfer,
}

impl Route {
    pub const ALL: [Self; 9] = [
        Self::Login,
        Self::Signup,
        Self::AdminDashboard,
        Self::AdminUsers,
        Self::AdminFraudLogs,
        Self::AdminFraudRules,
        Self::UserAccounts,
        Self::UserTransactions,
        Self::UserTransfer,
    ];

    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Signup => "/signup",
            Self::AdminDashboard => "/admin/dashboard",
            Self::AdminUsers => "/admin/users",
            Self::AdminFraudLogs => "/admin/fraud-logs",
            Self::AdminFraudRules => "/admin/fraud-rules",
            Self::UserAccounts => "/user/accounts",
            Self::UserTransactions => "/user/transactions",
            Self::UserTransfer => "/user/transfer",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Login => "Sign in",
            Self::Signup => "Sign up",
            Self::AdminDashboard => "Dashboard",
            Self::AdminUsers => "Users",
            Self::AdminFraudLogs => "Fraudulent Transactions",
            Self::AdminFraudRules => "Manage Fraud Rules",
            Self::UserAccounts => "My Accounts",
            Self::UserTransactions => "My Transactions",
            Self::UserTransfer => "Transfer Funds",
        }
    }

    #[must_use]
    pub const fn access(self) -> Access {
        match self {
            Self::Login | Self::Signup => Access::Public,
            Self::AdminDashboard
            | Self::AdminUsers
            | Self::AdminFraudLogs
            | Self::AdminFraudRules => Access::Role(Role::Admin),
            Self::UserAccounts | Self::UserTransactions | Self::UserTransfer => {
                Access::Role(Role::User)
            }
        }
    }

    /// Landing view for an actor of `role`.
    #[must_use]
    pub const fn home(role: Role) -> Self {
        match role {
            Role::Admin => Self::AdminDashboard,
            Role::User => Self::UserAccounts,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let normalized = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };
        Self::ALL
            .into_iter()
            .find(|route| route.path() == normalized)
            .ok_or_else(|| AppError::Validation(format!("Unknown page: {trimmed}")))
    }
}

#[cfg(test)]
mod tests {
    use super::{Access, Route};
    use crate::features::auth::Role;

    #[test]
    fn paths_round_trip() {
        for route in Route::ALL {
            assert_eq!(route.path().parse::<Route>().ok(), Some(route));
        }
        assert_eq!("/admin/fraud-logs/".parse::<Route>().ok(), Some(Route::AdminFraudLogs));
        assert!("/admin/secret".parse::<Route>().is_err());
        assert!("".parse::<Route>().is_err());
    }

    #[test]
    fn homes_match_role() {
        assert_eq!(Route::home(Role::Admin).path(), "/admin/dashboard");
        assert_eq!(Route::home(Role::User).path(), "/user/accounts");
        for role in [Role::Admin, Role::User] {
            assert_eq!(Route::home(role).access(), Access::Role(role));
        }
    }
}
