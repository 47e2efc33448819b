//! Account Data

/// New Account Data
///
/// The password arrives already hashed; see [`crate::auth::hash_password`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub street: Option<String>,
    pub state: Option<String>,

    /// Defaults to `Nigeria` when omitted.
    pub country: Option<String>,
}
