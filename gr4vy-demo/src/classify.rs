//! Pure mapping from SDK failure variants to display outcomes.
//!
//! Each branch logs the failure before producing the outcome; logging is
//! side-channel only and never changes what is returned. The free-text
//! matching on network messages and the `error_code` strings are stable
//! contracts — downstream display behavior depends on them verbatim.

use gr4vy::Gr4vyError;

use crate::outcome::TokenizationOutcome;

/// Classifies an SDK failure into a display title and JSON body.
#[must_use]
pub fn classify(error: &Gr4vyError, gr4vy_id: &str) -> TokenizationOutcome {
    match error {
        Gr4vyError::InvalidGr4vyId(message) => {
            tracing::error!(%message, "invalid Gr4vy ID");
            TokenizationOutcome::failure("Invalid Gr4vy ID", message)
        }
        Gr4vyError::BadUrl { url } => {
            tracing::error!(%url, "bad URL");
            TokenizationOutcome::failure_with_details(
                "Bad URL",
                "The URL is malformed",
                &[("url", url.clone())],
            )
        }
        Gr4vyError::Http {
            status,
            message,
            response_body,
        } => {
            tracing::error!(status, "HTTP error");
            match response_body {
                Some(body) if !body.is_empty() => TokenizationOutcome::Failure {
                    title: format!("Error Response (Status: {status})"),
                    body: body.clone(),
                },
                _ => TokenizationOutcome::failure(
                    format!("HTTP Error {status}"),
                    message.as_deref().unwrap_or("An HTTP error occurred"),
                ),
            }
        }
        Gr4vyError::Network { message } => {
            tracing::error!(%message, "network error");
            classify_network(message, gr4vy_id)
        }
        Gr4vyError::Decoding(message) => {
            tracing::error!(%message, "decoding error");
            TokenizationOutcome::failure("Decoding error", message)
        }
        Gr4vyError::ThreeDs(message) => {
            tracing::error!(%message, "3D Secure error");
            TokenizationOutcome::failure("3DS error", message)
        }
        Gr4vyError::UiContext(message) => {
            tracing::error!(%message, "UI context error");
            TokenizationOutcome::failure("UI error", message)
        }
        Gr4vyError::Other(message) => {
            tracing::error!(%message, "tokenize failed");
            TokenizationOutcome::failure("Failed to tokenize payment method", message)
        }
    }
}

fn classify_network(message: &str, gr4vy_id: &str) -> TokenizationOutcome {
    let lowered = message.to_lowercase();
    if lowered.contains("cannot resolve host")
        || lowered.contains("unable to resolve host")
        || lowered.contains("no address associated with hostname")
    {
        TokenizationOutcome::failure_with_details(
            "Cannot find server",
            &format!("Please check your Merchant ID ({gr4vy_id})"),
            &[
                ("url", format!("https://api.{gr4vy_id}.gr4vy.app")),
                ("error_code", "cannotFindHost".to_owned()),
            ],
        )
    } else if lowered.contains("timeout") {
        TokenizationOutcome::failure_with_details(
            "Request timed out",
            "Please try again",
            &[("error_code", "timedOut".to_owned())],
        )
    } else {
        TokenizationOutcome::failure_with_details(
            "Network error",
            message,
            &[("error_code", "networkError".to_owned())],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_of(outcome: &TokenizationOutcome) -> serde_json::Value {
        serde_json::from_str(outcome.body()).expect("body is JSON")
    }

    #[test]
    fn test_invalid_gr4vy_id() {
        let outcome = classify(
            &Gr4vyError::InvalidGr4vyId("\"x y\" is not a valid Gr4vy ID".to_owned()),
            "acme",
        );
        assert_eq!(outcome.title(), "Invalid Gr4vy ID");
    }

    #[test]
    fn test_bad_url_carries_offending_url() {
        let outcome = classify(
            &Gr4vyError::BadUrl {
                url: "https://bad url".to_owned(),
            },
            "acme",
        );
        assert_eq!(outcome.title(), "Bad URL");
        assert_eq!(body_of(&outcome)["url"], "https://bad url");
    }

    #[test]
    fn test_http_error_with_body_is_verbatim() {
        let outcome = classify(
            &Gr4vyError::Http {
                status: 400,
                message: Some("Bad Request".to_owned()),
                response_body: Some("{\"code\": \"bad_request\"}".to_owned()),
            },
            "acme",
        );
        assert_eq!(outcome.title(), "Error Response (Status: 400)");
        assert_eq!(outcome.body(), "{\"code\": \"bad_request\"}");
    }

    #[test]
    fn test_http_error_without_body() {
        let outcome = classify(
            &Gr4vyError::Http {
                status: 502,
                message: Some("Bad Gateway".to_owned()),
                response_body: None,
            },
            "acme",
        );
        assert_eq!(outcome.title(), "HTTP Error 502");
        assert_eq!(body_of(&outcome)["description"], "Bad Gateway");
    }

    #[test]
    fn test_network_cannot_find_host() {
        let outcome = classify(
            &Gr4vyError::Network {
                message: "Unable to resolve host api.acme.gr4vy.app".to_owned(),
            },
            "acme",
        );
        assert_eq!(outcome.title(), "Cannot find server");
        let body = body_of(&outcome);
        assert_eq!(body["url"], "https://api.acme.gr4vy.app");
        assert_eq!(body["error_code"], "cannotFindHost");
    }

    #[test]
    fn test_network_timeout() {
        let outcome = classify(
            &Gr4vyError::Network {
                message: "request timeout: operation timed out".to_owned(),
            },
            "acme",
        );
        assert_eq!(outcome.title(), "Request timed out");
        assert_eq!(body_of(&outcome)["error_code"], "timedOut");
    }

    #[test]
    fn test_network_other() {
        let outcome = classify(
            &Gr4vyError::Network {
                message: "connection reset by peer".to_owned(),
            },
            "acme",
        );
        assert_eq!(outcome.title(), "Network error");
        let body = body_of(&outcome);
        assert_eq!(body["description"], "connection reset by peer");
        assert_eq!(body["error_code"], "networkError");
    }

    #[test]
    fn test_decoding_threeds_and_ui_context_titles() {
        assert_eq!(
            classify(&Gr4vyError::Decoding("bad json".to_owned()), "acme").title(),
            "Decoding error"
        );
        assert_eq!(
            classify(&Gr4vyError::ThreeDs("challenge aborted".to_owned()), "acme").title(),
            "3DS error"
        );
        assert_eq!(
            classify(&Gr4vyError::UiContext("no host".to_owned()), "acme").title(),
            "UI error"
        );
    }

    #[test]
    fn test_fallback_title() {
        let outcome = classify(&Gr4vyError::Other("something odd".to_owned()), "acme");
        assert_eq!(outcome.title(), "Failed to tokenize payment method");
        assert_eq!(body_of(&outcome)["description"], "something odd");
    }
}
