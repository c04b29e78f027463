use engine::Role;

/// Identity sent with every request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub role: Role,
    /// Picks a specific development user; the service default for the role
    /// is used otherwise.
    pub user_id: Option<i64>,
    /// Forwarded as `Authorization: Bearer`.
    pub token: Option<String>,
}

impl Session {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            user_id: None,
            token: None,
        }
    }

    pub fn with_user_id(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}
