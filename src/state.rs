//! Shared application state
//!
//! Immutable after startup: the form schema and the client used to forward
//! validated submissions to the onboarding API.

use std::sync::Arc;

use crate::client::OnboardClient;
use crate::config::ServerConfig;
use crate::error::ClientError;
use crate::form::FormSchema;

#[derive(Clone)]
pub struct AppState {
    pub schema: Arc<FormSchema>,
    pub client: OnboardClient,
}

impl AppState {
    pub fn new(client: OnboardClient) -> Self {
        Self {
            schema: Arc::new(FormSchema::onboarding()),
            client,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Result<Self, ClientError> {
        let client = OnboardClient::new(&config.onboard_url, config.request_timeout)?;
        Ok(Self::new(client))
    }
}
