//! Onboarding API client
//!
//! Posts a validated submission to `<base>/api/onboard`. A single attempt is
//! made; failures are reported to the user as-is.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::api::OnboardAck;
use crate::error::ClientError;
use crate::form::OnboardingSubmission;

#[derive(Debug, Clone)]
pub struct OnboardClient {
    http: Client,
    endpoint: Url,
}

impl OnboardClient {
    /// Create a client for the API rooted at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let endpoint = onboard_endpoint(base_url)?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::Transport)?;

        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Submit the form
    pub async fn submit(&self, submission: &OnboardingSubmission) -> Result<OnboardAck, ClientError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(submission)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), endpoint = %self.endpoint, "onboarding API rejected submission");
            return Err(ClientError::Status(status.as_u16()));
        }

        response.json::<OnboardAck>().await.map_err(ClientError::Decode)
    }
}

/// `<base>/api/onboard`, tolerating a trailing slash on the base
fn onboard_endpoint(base_url: &str) -> Result<Url, ClientError> {
    let trimmed = base_url.trim().trim_end_matches('/');
    Url::parse(&format!("{}/api/onboard", trimmed))
        .map_err(|_| ClientError::InvalidUrl(base_url.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base() {
        let url = onboard_endpoint("http://localhost:5000").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/onboard");

        let url = onboard_endpoint("https://example.com/forms/").unwrap();
        assert_eq!(url.as_str(), "https://example.com/forms/api/onboard");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = onboard_endpoint("not a url").unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }
}
