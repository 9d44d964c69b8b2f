//! Earthdata credentials taken from the environment.

use point_extractor::Credential;

/// Username/password pair read once at startup. Valid when both are set and
/// non-empty; the actual login happens in whatever fetches remote granules.
#[derive(Clone, Default)]
pub struct EnvCredential {
    username: Option<String>,
    password: Option<String>,
}

impl EnvCredential {
    pub fn new(username: Option<String>, password: Option<String>) -> Self {
        Self { username, password }
    }

    /// Read `EARTHDATA_USERNAME` / `EARTHDATA_PASSWORD`.
    pub fn from_env() -> Self {
        Self::new(
            std::env::var("EARTHDATA_USERNAME").ok(),
            std::env::var("EARTHDATA_PASSWORD").ok(),
        )
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }
}

impl std::fmt::Debug for EnvCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvCredential")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

impl Credential for EnvCredential {
    fn is_valid(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.username) && present(&self.password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_required() {
        let some = |s: &str| Some(s.to_string());
        assert!(EnvCredential::new(some("user"), some("secret")).is_valid());
        assert!(!EnvCredential::new(some("user"), None).is_valid());
        assert!(!EnvCredential::new(None, some("secret")).is_valid());
        assert!(!EnvCredential::new(some("user"), some("  ")).is_valid());
        assert!(!EnvCredential::default().is_valid());
    }

    #[test]
    fn test_debug_hides_password() {
        let cred = EnvCredential::new(Some("user".into()), Some("hunter2".into()));
        let shown = format!("{:?}", cred);
        assert!(shown.contains("user"));
        assert!(!shown.contains("hunter2"));
    }
}
