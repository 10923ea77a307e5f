use super::UserRole;

/// Account fields written at registration. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
}
