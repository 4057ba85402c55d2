use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    pub display_name: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    pub role: Role,
    /// Argon2id hash, never the plain credential.
    pub password: String,
}

impl User {
    pub fn new(display_name: &str, username: &str, about: Option<String>, password_hash: &str) -> Self {
        User {
            id: 0,
            display_name: display_name.to_string(),
            username: username.to_string(),
            about,
            role: Role::User,
            password: password_hash.to_string(),
        }
    }
}
