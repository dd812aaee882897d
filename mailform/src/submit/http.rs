use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use super::{Delivery, MailApi, Payload};
use crate::{ApiConfig, ConfigError, SubmitError};

/// Posts payloads as `multipart/form-data` to `{api_url}/api/mail/send`.
///
/// No timeout is set beyond the client's defaults and failed requests are not retried.
#[derive(Clone)]
pub struct HttpMailApi {
    client: Client,
    endpoint: Url,
}

impl HttpMailApi {
    pub fn new(config: &ApiConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_client(Client::new(), config.endpoint()?))
    }

    pub fn with_client(client: Client, endpoint: Url) -> Self {
        HttpMailApi { client, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl MailApi for HttpMailApi {
    async fn send(&self, payload: Payload) -> Result<Delivery, SubmitError> {
        log::debug!(
            "POST {} with parts {:?}",
            self.endpoint,
            payload.part_names()
        );
        let form = payload.into_form()?;

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        // The body is JSON whatever the status; anything else is a decode failure.
        let body: Value = serde_json::from_slice(&bytes)?;
        log::debug!("mail API answered {}", status);

        if status.is_success() {
            Ok(Delivery { status, body })
        } else {
            Err(SubmitError::rejected(status, &body))
        }
    }
}
