//! Intent dispatch
//!
//! Routes an [`Intent`] by kind. Discovery goes through the injected
//! [`DiscoveryClient`]; execution and registration have no handler and
//! answer with a fixed "not implemented" response; any other kind is
//! rejected as an invalid intent type.
//!
//! Dispatch never returns an `Err` to the caller: every failure becomes an
//! unsuccessful [`IntentResponse`].

use std::sync::Arc;

use protoai_core::{Capability, Intent, IntentKind, IntentResponse};
use serde_json::Map;
use thiserror::Error;

use crate::constants::{DISCOVERY_FAILURE_MESSAGE, DISCOVERY_SUCCESS_MESSAGE, SERVICES_KEY};
use crate::services::discovery::{DiscoveryClient, DiscoveryError};
use crate::telemetry::METRICS;

/// Why an intent could not be fulfilled.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error("Failed to encode discovered services: {reason}")]
    Encode { reason: String },

    #[error("{capability} is not implemented")]
    Unsupported { capability: Capability },

    #[error("Invalid intent type: {kind}")]
    InvalidType { kind: String },
}

impl DispatchError {
    /// Metrics label for this failure.
    pub fn outcome(&self) -> &'static str {
        match self {
            DispatchError::Discovery(_) | DispatchError::Encode { .. } => "failure",
            DispatchError::Unsupported { .. } => "not_implemented",
            DispatchError::InvalidType { .. } => "invalid",
        }
    }
}

impl From<DispatchError> for IntentResponse {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::Unsupported { capability } => IntentResponse::not_implemented(capability),
            DispatchError::InvalidType { .. } => IntentResponse::invalid_intent_type(),
            other => IntentResponse::failure(DISCOVERY_FAILURE_MESSAGE, other.to_string()),
        }
    }
}

/// Stateless intent router.
#[derive(Clone)]
pub struct IntentDispatcher {
    discovery: Arc<dyn DiscoveryClient>,
}

impl IntentDispatcher {
    pub fn new(discovery: Arc<dyn DiscoveryClient>) -> Self {
        Self { discovery }
    }

    /// Dispatch `intent`, folding every failure into the response.
    pub async fn dispatch(&self, intent: &Intent) -> IntentResponse {
        let kind = intent.kind.as_str().to_string();
        tracing::info!(
            kind = %kind,
            service_name = ?intent.service_name,
            operation = ?intent.operation,
            "Dispatching intent"
        );

        let (outcome, response) = match self.try_dispatch(intent).await {
            Ok(response) => ("success", response),
            Err(err) => {
                match &err {
                    DispatchError::Discovery(_) | DispatchError::Encode { .. } => {
                        tracing::error!(kind = %kind, error = %err, "Intent failed");
                    }
                    _ => tracing::warn!(kind = %kind, error = %err, "Intent rejected"),
                }
                (err.outcome(), IntentResponse::from(err))
            }
        };

        if let Ok(metrics) = METRICS.as_ref() {
            metrics.record_intent(metrics_kind(&intent.kind), outcome);
        }
        response
    }

    /// Dispatch `intent`, surfacing failures as [`DispatchError`].
    pub async fn try_dispatch(&self, intent: &Intent) -> Result<IntentResponse, DispatchError> {
        match &intent.kind {
            IntentKind::Discovery => self.discover(intent.tags.as_deref()).await,
            IntentKind::Execution => Err(DispatchError::Unsupported {
                capability: Capability::Execution,
            }),
            IntentKind::Registration => Err(DispatchError::Unsupported {
                capability: Capability::Registration,
            }),
            IntentKind::Unknown(kind) => Err(DispatchError::InvalidType { kind: kind.clone() }),
        }
    }

    async fn discover(&self, tags: Option<&[String]>) -> Result<IntentResponse, DispatchError> {
        let services = self.discovery.discover(tags).await?;
        let count = services.len();
        let services = serde_json::to_value(services).map_err(|e| DispatchError::Encode {
            reason: e.to_string(),
        })?;

        let mut data = Map::new();
        data.insert(SERVICES_KEY.to_string(), services);

        tracing::info!(tags = ?tags, services = count, "Discovery intent completed");
        Ok(IntentResponse::success(DISCOVERY_SUCCESS_MESSAGE, data))
    }
}

/// Bounded label set for the intents counter.
fn metrics_kind(kind: &IntentKind) -> &'static str {
    match kind {
        IntentKind::Discovery => "discovery",
        IntentKind::Execution => "execution",
        IntentKind::Registration => "registration",
        IntentKind::Unknown(_) => "unknown",
    }
}
