use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Name of the environment variable that selects the backend.
pub const ENVIRONMENT_VAR: &str = "COLLEGE_PULSE_ENVIRONMENT";

/// Backend the client talks to.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum Environment {
    /// Backend running on this machine on the default port.
    #[default]
    Local,
    /// Backend at an explicit base URL.
    Custom(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid backend '{0}': expected 'local' or an http(s):// URL")]
pub struct InvalidEnvironment(pub String);

impl Environment {
    /// Returns the backend base URL, without a trailing slash.
    pub fn api_url(&self) -> String {
        match self {
            Environment::Local => "http://localhost:8000".to_string(),
            Environment::Custom(url) => url.trim_end_matches('/').to_string(),
        }
    }
}

impl FromStr for Environment {
    type Err = InvalidEnvironment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("local") {
            return Ok(Environment::Local);
        }
        let lower = trimmed.to_lowercase();
        let host = lower
            .strip_prefix("http://")
            .or_else(|| lower.strip_prefix("https://"));
        match host {
            Some(rest) if !rest.trim_matches('/').is_empty() => Ok(Environment::Custom(
                trimmed.trim_end_matches('/').to_string(),
            )),
            _ => Err(InvalidEnvironment(s.to_string())),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "local"),
            Environment::Custom(url) => write!(f, "{}", url.trim_end_matches('/')),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Local => write!(f, "Environment::Local, URL: {}", self.api_url()),
            Environment::Custom(_) => write!(f, "Environment::Custom, URL: {}", self.api_url()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_local() {
        assert_eq!("local".parse::<Environment>(), Ok(Environment::Local));
        assert_eq!("LOCAL".parse::<Environment>(), Ok(Environment::Local));
    }

    #[test]
    fn test_parse_url_strips_trailing_slash() {
        let env: Environment = "http://10.0.0.5:8000/".parse().unwrap();
        assert_eq!(env, Environment::Custom("http://10.0.0.5:8000".to_string()));
        assert_eq!(env.api_url(), "http://10.0.0.5:8000");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("staging".parse::<Environment>().is_err());
        assert!("ftp://campus".parse::<Environment>().is_err());
        assert!("".parse::<Environment>().is_err());
    }

    #[test]
    fn test_display_shows_backend() {
        assert_eq!(Environment::Local.to_string(), "local");
        let env: Environment = "https://campus.example".parse().unwrap();
        assert_eq!(env.to_string(), "https://campus.example");
    }

    #[test]
    fn test_local_url() {
        assert_eq!(Environment::default().api_url(), "http://localhost:8000");
    }
}
