//! Transactional email dispatch via the Resend HTTP API.
//!
//! One call per notification, no retries; a failed send surfaces the
//! provider's response to the caller.

use serde::Serialize;
use std::fmt;
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// HTTP transport error.
    #[error("email request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Provider returned a non-2xx status.
    #[error("email provider returned {status}: {body}")]
    Provider { status: u16, body: String },
    #[error("RESEND_API_KEY environment variable is required")]
    MissingApiKey,
    #[error("invalid RESEND_BASE_URL: {0}")]
    InvalidBaseUrl(String),
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

/// Resend API client. Cheap to clone; holds a shared `reqwest::Client`.
#[derive(Clone)]
pub struct Mailer {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
    from: String,
}

// Manual Debug so the API key never lands in log output.
impl fmt::Debug for Mailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mailer")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("from", &self.from)
            .finish()
    }
}

impl Mailer {
    pub fn new(base_url: Url, api_key: String, from: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
            from,
        }
    }

    /// Build a mailer from the environment.
    ///
    /// Variables:
    /// - `RESEND_API_KEY` (required)
    /// - `RESEND_BASE_URL` (default: `https://api.resend.com`)
    /// - `EMAIL_FROM` (default: `onboarding@resend.dev`)
    pub fn from_env() -> Result<Self, EmailError> {
        let api_key = std::env::var("RESEND_API_KEY").map_err(|_| EmailError::MissingApiKey)?;
        let raw_base = std::env::var("RESEND_BASE_URL")
            .unwrap_or_else(|_| "https://api.resend.com".to_string());
        let base_url =
            Url::parse(&raw_base).map_err(|err| EmailError::InvalidBaseUrl(err.to_string()))?;
        let from = std::env::var("EMAIL_FROM")
            .unwrap_or_else(|_| "onboarding@resend.dev".to_string());
        Ok(Self::new(base_url, api_key, from))
    }

    /// Send one HTML email. Returns the provider's response body.
    pub async fn send(
        &self,
        to: &str,
        subject: &str,
        html: &str,
    ) -> Result<serde_json::Value, EmailError> {
        let url = format!("{}emails", self.base_url);

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&SendEmailRequest {
                from: &self.from,
                to,
                subject,
                html,
            })
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(EmailError::Provider { status, body });
        }

        Ok(resp.json().await?)
    }
}
