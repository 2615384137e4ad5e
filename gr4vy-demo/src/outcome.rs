//! Terminal result of a submit attempt.

use serde_json::{Map, Value};

/// What the display boundary receives when a submission ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizationOutcome {
    /// Raw JSON body shown under a "Complete" title.
    Success(String),
    /// Classified failure.
    Failure {
        /// Display title, e.g. `Request timed out`.
        title: String,
        /// Formatted body, usually a JSON object.
        body: String,
    },
}

impl TokenizationOutcome {
    /// Builds a failure whose body is `{"error": title, "description": …}`.
    #[must_use]
    pub fn failure(title: impl Into<String>, description: &str) -> Self {
        Self::failure_with_details(title, description, &[])
    }

    /// Like [`Self::failure`], with additional string fields appended to
    /// the body object.
    #[must_use]
    pub fn failure_with_details(
        title: impl Into<String>,
        description: &str,
        details: &[(&str, String)],
    ) -> Self {
        let title = title.into();
        let mut body = Map::new();
        body.insert("error".to_owned(), Value::from(title.clone()));
        body.insert("description".to_owned(), Value::from(description));
        for (key, value) in details {
            body.insert((*key).to_owned(), Value::from(value.clone()));
        }
        // Object serialization cannot fail.
        let body = serde_json::to_string_pretty(&Value::Object(body))
            .unwrap_or_else(|_| description.to_owned());
        Self::Failure { title, body }
    }

    /// Display title for this outcome.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Success(_) => "Complete",
            Self::Failure { title, .. } => title,
        }
    }

    /// Display body for this outcome.
    #[must_use]
    pub fn body(&self) -> &str {
        match self {
            Self::Success(body) | Self::Failure { body, .. } => body,
        }
    }

    /// Whether this outcome is a failure.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }
}
