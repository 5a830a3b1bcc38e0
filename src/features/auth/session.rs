use super::types::Role;
use secrecy::SecretString;

/// Who the console is signed in as. The token and the role only exist
/// together; there is no variant holding one without the other.
#[derive(Clone, Debug, Default)]
pub enum Session {
    #[default]
    Anonymous,
    Admin(SecretString),
    User(SecretString),
}

impl Session {
    #[must_use]
    pub fn new(token: SecretString, role: Role) -> Self {
        match role {
            Role::Admin => Self::Admin(token),
            Role::User => Self::User(token),
        }
    }

    /// Rebuilds a session from independently stored fields. Anything short of
    /// a non-empty token plus a known role is treated as signed out.
    #[must_use]
    pub fn from_parts(token: Option<&str>, role: Option<&str>) -> Self {
        let token = token.map(str::trim).filter(|token| !token.is_empty());
        let role = role.and_then(|role| role.parse::<Role>().ok());
        match (token, role) {
            (Some(token), Some(role)) => Self::new(SecretString::from(token.to_string()), role),
            _ => Self::Anonymous,
        }
    }

    #[must_use]
    pub const fn role(&self) -> Option<Role> {
        match self {
            Self::Anonymous => None,
            Self::Admin(_) => Some(Role::Admin),
            Self::User(_) => Some(Role::User),
        }
    }

    #[must_use]
    pub const fn token(&self) -> Option<&SecretString> {
        match self {
            Self::Anonymous => None,
            Self::Admin(token) | Self::User(token) => Some(token),
        }
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        !matches!(self, Self::Anonymous)
    }
}
