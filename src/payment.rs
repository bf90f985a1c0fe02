//! Paystack payment gateway client.
//!
//! The gateway is only consulted after an order row exists. Callers map
//! the verification outcome onto the order's payment status themselves.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

const DEFAULT_BASE_URL: &str = "https://api.paystack.co";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("gateway request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("gateway rejected the request: {0}")]
    Rejected(String),
}

/// Result of starting a transaction with the gateway.
#[derive(Debug, Clone)]
pub struct InitializedPayment {
    /// URL the shopper is redirected to for the mobile money prompt.
    pub authorization_url: String,
    pub access_code: String,
    /// Gateway reference stored on the order for later verification.
    pub reference: String,
}

/// Result of verifying a transaction by reference.
#[derive(Debug, Clone)]
pub struct GatewayVerification {
    pub reference: String,
    /// True only when the gateway reports the charge as successful.
    pub succeeded: bool,
    /// Amount confirmed by the gateway, in the smallest currency unit.
    pub amount_cents: i64,
    /// Gateway-side status or failure explanation.
    pub message: Option<String>,
}

/// Interface the checkout service talks to.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn initialize(
        &self,
        email: &str,
        amount_cents: i64,
        callback_url: &str,
    ) -> Result<InitializedPayment, GatewayError>;

    async fn verify(&self, reference: &str) -> Result<GatewayVerification, GatewayError>;
}

#[derive(Clone)]
pub struct PaystackGateway {
    client: reqwest::Client,
    base_url: String,
    secret_key: String,
}

impl PaystackGateway {
    pub fn new(secret_key: impl Into<String>) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            secret_key: secret_key.into(),
        })
    }

    /// Overrides the API host, used against a local stand-in server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Deserialize)]
struct PaystackEnvelope<T> {
    status: bool,
    message: Option<String>,
    data: Option<T>,
}

#[derive(Deserialize)]
struct InitializeData {
    authorization_url: String,
    access_code: String,
    reference: String,
}

#[derive(Deserialize)]
struct VerifyData {
    reference: String,
    status: String,
    amount: i64,
    gateway_response: Option<String>,
}

impl<T> PaystackEnvelope<T> {
    fn into_data(self) -> Result<T, GatewayError> {
        if !self.status {
            return Err(GatewayError::Rejected(
                self.message
                    .unwrap_or_else(|| "gateway returned an error".to_string()),
            ));
        }
        self.data.ok_or_else(|| {
            GatewayError::Rejected("gateway response carried no payload".to_string())
        })
    }
}

#[async_trait]
impl PaymentGateway for PaystackGateway {
    async fn initialize(
        &self,
        email: &str,
        amount_cents: i64,
        callback_url: &str,
    ) -> Result<InitializedPayment, GatewayError> {
        let body = json!({
            "email": email,
            "amount": amount_cents,
            "callback_url": callback_url,
            "channels": ["mobile_money", "card"],
        });

        let envelope: PaystackEnvelope<InitializeData> = self
            .client
            .post(format!("{}/transaction/initialize", self.base_url))
            .bearer_auth(&self.secret_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let data = envelope.into_data()?;

        Ok(InitializedPayment {
            authorization_url: data.authorization_url,
            access_code: data.access_code,
            reference: data.reference,
        })
    }

    async fn verify(&self, reference: &str) -> Result<GatewayVerification, GatewayError> {
        let envelope: PaystackEnvelope<VerifyData> = self
            .client
            .get(format!("{}/transaction/verify/{}", self.base_url, reference))
            .bearer_auth(&self.secret_key)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let data = envelope.into_data()?;

        Ok(GatewayVerification {
            reference: data.reference,
            succeeded: data.status == "success",
            amount_cents: data.amount,
            message: data.gateway_response,
        })
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// In-memory gateway that replays scripted verification outcomes.
    pub struct MockGateway {
        verifications: Mutex<Vec<Result<GatewayVerification, GatewayError>>>,
    }

    impl MockGateway {
        pub fn new() -> Self {
            Self {
                verifications: Mutex::new(Vec::new()),
            }
        }

        pub fn push_verification(self, outcome: Result<GatewayVerification, GatewayError>) -> Self {
            self.verifications
                .lock()
                .unwrap()
                .push(outcome);
            self
        }
    }

    #[async_trait]
    impl PaymentGateway for MockGateway {
        async fn initialize(
            &self,
            _email: &str,
            _amount_cents: i64,
            _callback_url: &str,
        ) -> Result<InitializedPayment, GatewayError> {
            Ok(InitializedPayment {
                authorization_url: "https://checkout.test/redirect".to_string(),
                access_code: "access".to_string(),
                reference: "ref-test".to_string(),
            })
        }

        async fn verify(&self, _reference: &str) -> Result<GatewayVerification, GatewayError> {
            self.verifications
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| {
                    Ok(GatewayVerification {
                        reference: "ref-test".to_string(),
                        succeeded: true,
                        amount_cents: 0,
                        message: None,
                    })
                })
        }
    }
}
