//! Notification Senders
//!
//! Thin HTTP clients for the WhatsApp and email providers. Message
//! templating beyond a single line is the provider's concern; any
//! failure (network, timeout, non-2xx) surfaces as `DispatchFailed`.

use std::time::Duration;

use serde_json::json;

use crate::domain::repository::{OtpPurpose, OtpSender};
use crate::error::{AuthError, AuthResult};

/// Provider request timeout
const DISPATCH_TIMEOUT: Duration = Duration::from_secs(10);

fn message_body(purpose: OtpPurpose, code: &str) -> String {
    format!(
        "Your {} code is {}. It expires in 5 minutes.",
        purpose, code
    )
}

/// WhatsApp sender (Twilio-style messages API)
#[derive(Clone)]
pub struct WhatsAppSender {
    http: reqwest::Client,
    api_url: String,
    account_sid: String,
    auth_token: String,
    from_number: String,
}

impl WhatsAppSender {
    pub fn new(
        api_url: impl Into<String>,
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
        from_number: impl Into<String>,
    ) -> AuthResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(DISPATCH_TIMEOUT)
            .build()
            .map_err(|e| AuthError::Internal(format!("HTTP client build failed: {}", e)))?;

        Ok(Self {
            http,
            api_url: api_url.into(),
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
            from_number: from_number.into(),
        })
    }
}

impl OtpSender for WhatsAppSender {
    async fn send(&self, recipient: &str, purpose: OtpPurpose, code: &str) -> AuthResult<()> {
        let url = format!(
            "{}/Accounts/{}/Messages.json",
            self.api_url, self.account_sid
        );

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[
                ("From", format!("whatsapp:{}", self.from_number)),
                ("To", format!("whatsapp:{}", recipient)),
                ("Body", message_body(purpose, code)),
            ])
            .send()
            .await
            .map_err(|e| AuthError::DispatchFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::DispatchFailed(format!(
                "WhatsApp provider returned {}",
                response.status()
            )));
        }

        tracing::debug!(purpose = %purpose, "WhatsApp OTP dispatched");

        Ok(())
    }
}

/// Email sender (JSON REST provider)
#[derive(Clone)]
pub struct EmailSender {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    from_address: String,
}

impl EmailSender {
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        from_address: impl Into<String>,
    ) -> AuthResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(DISPATCH_TIMEOUT)
            .build()
            .map_err(|e| AuthError::Internal(format!("HTTP client build failed: {}", e)))?;

        Ok(Self {
            http,
            api_url: api_url.into(),
            api_key: api_key.into(),
            from_address: from_address.into(),
        })
    }
}

impl OtpSender for EmailSender {
    async fn send(&self, recipient: &str, purpose: OtpPurpose, code: &str) -> AuthResult<()> {
        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "from": self.from_address,
                "to": recipient,
                "subject": "Your verification code",
                "text": message_body(purpose, code),
            }))
            .send()
            .await
            .map_err(|e| AuthError::DispatchFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::DispatchFailed(format!(
                "Email provider returned {}",
                response.status()
            )));
        }

        tracing::debug!(purpose = %purpose, "Email OTP dispatched");

        Ok(())
    }
}
