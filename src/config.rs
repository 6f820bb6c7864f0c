//! Runtime environment detection.
//!
//! The environment decides whether session cookies carry the `Secure`
//! attribute. It is read from [`ENVIRONMENT_VAR`].

/// Environment variable naming the deployment environment.
pub const ENVIRONMENT_VAR: &str = "APP_ENV";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Parses an environment name. Only `production` (any case) selects
    /// [`Environment::Production`].
    pub fn from_value(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("production") => Self::Production,
            _ => Self::Development,
        }
    }

    /// Reads [`ENVIRONMENT_VAR`] from the process environment.
    pub fn from_env() -> Self {
        Self::from_value(std::env::var(ENVIRONMENT_VAR).ok().as_deref())
    }

    pub fn is_production(self) -> bool {
        self == Self::Production
    }
}
