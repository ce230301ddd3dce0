use serde::{Deserialize, Serialize};

/// JWT payload. `admin` is informational; roles are always re-read from the database.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64,
    pub exp: usize,
    pub admin: bool,
}

#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);
