//! Gr4vy server environments.

use serde::{Deserialize, Serialize};

/// Target Gr4vy environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gr4vyServer {
    /// Sandbox environment, hosted at `api.sandbox.{id}.gr4vy.app`.
    #[default]
    Sandbox,
    /// Production environment, hosted at `api.{id}.gr4vy.app`.
    Production,
}

impl Gr4vyServer {
    /// Parses a stored raw value.
    ///
    /// Anything other than `"production"` falls back to [`Self::Sandbox`];
    /// unknown persisted values must never fail.
    #[must_use]
    pub fn from_raw(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("production") {
            Self::Production
        } else {
            Self::Sandbox
        }
    }

    /// API host for the given Gr4vy merchant id.
    #[must_use]
    pub fn api_host(self, gr4vy_id: &str) -> String {
        match self {
            Self::Sandbox => format!("api.sandbox.{gr4vy_id}.gr4vy.app"),
            Self::Production => format!("api.{gr4vy_id}.gr4vy.app"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_production() {
        assert_eq!(Gr4vyServer::from_raw("production"), Gr4vyServer::Production);
        assert_eq!(Gr4vyServer::from_raw(" PRODUCTION "), Gr4vyServer::Production);
    }

    #[test]
    fn test_from_raw_falls_back_to_sandbox() {
        assert_eq!(Gr4vyServer::from_raw("sandbox"), Gr4vyServer::Sandbox);
        assert_eq!(Gr4vyServer::from_raw(""), Gr4vyServer::Sandbox);
        assert_eq!(Gr4vyServer::from_raw("staging"), Gr4vyServer::Sandbox);
    }

    #[test]
    fn test_api_host() {
        assert_eq!(
            Gr4vyServer::Sandbox.api_host("acme"),
            "api.sandbox.acme.gr4vy.app"
        );
        assert_eq!(
            Gr4vyServer::Production.api_host("acme"),
            "api.acme.gr4vy.app"
        );
    }
}
