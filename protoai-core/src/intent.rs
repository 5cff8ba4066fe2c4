//! Intent envelopes and their responses
//!
//! An intent names what the caller wants (discover, execute, register)
//! independent of transport. Only discovery is backed by a handler; the
//! other kinds map to a typed "unsupported capability" failure.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Error text for capabilities without a handler.
pub const NOT_IMPLEMENTED: &str = "Not implemented";

/// Error text for intent types outside the closed set.
pub const INVALID_INTENT_TYPE: &str = "Invalid intent type";

/// Kind of action an intent requests.
///
/// Any string outside the known set deserializes to `Unknown` so it can be
/// answered with a validation failure instead of a parse error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IntentKind {
    Discovery,
    Execution,
    Registration,
    Unknown(String),
}

impl IntentKind {
    pub fn as_str(&self) -> &str {
        match self {
            IntentKind::Discovery => "discovery",
            IntentKind::Execution => "execution",
            IntentKind::Registration => "registration",
            IntentKind::Unknown(raw) => raw,
        }
    }

    /// Capability this kind requires, or `None` for unknown kinds.
    pub fn capability(&self) -> Option<Capability> {
        match self {
            IntentKind::Discovery => Some(Capability::Discovery),
            IntentKind::Execution => Some(Capability::Execution),
            IntentKind::Registration => Some(Capability::Registration),
            IntentKind::Unknown(_) => None,
        }
    }
}

impl From<String> for IntentKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "discovery" => IntentKind::Discovery,
            "execution" => IntentKind::Execution,
            "registration" => IntentKind::Registration,
            _ => IntentKind::Unknown(raw),
        }
    }
}

impl From<&str> for IntentKind {
    fn from(raw: &str) -> Self {
        IntentKind::from(raw.to_string())
    }
}

impl From<IntentKind> for String {
    fn from(kind: IntentKind) -> Self {
        match kind {
            IntentKind::Unknown(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for IntentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capabilities a dispatcher may or may not provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Discovery,
    Execution,
    Registration,
}

impl Capability {
    /// Message for a capability that has no handler, or `None` when the
    /// capability is served.
    pub fn unavailable_message(&self) -> Option<&'static str> {
        match self {
            Capability::Discovery => None,
            Capability::Execution => Some("Operation execution is not implemented yet"),
            Capability::Registration => Some("Service registration is not implemented yet"),
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::Discovery => "discovery",
            Capability::Execution => "execution",
            Capability::Registration => "registration",
        };
        f.write_str(name)
    }
}

/// Typed request envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Intent {
    #[serde(rename = "type")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "discovery"))]
    pub kind: IntentKind,
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub operation: Option<String>,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
    pub parameters: Option<Map<String, Value>>,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
    pub context: Option<Map<String, Value>>,
    /// Only consulted for discovery.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl Intent {
    pub fn new(kind: impl Into<IntentKind>) -> Self {
        Self {
            kind: kind.into(),
            service_name: None,
            operation: None,
            parameters: None,
            context: None,
            tags: None,
        }
    }

    pub fn discovery<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(IntentKind::Discovery).with_tags(tags)
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_service(mut self, service_name: impl Into<String>) -> Self {
        self.service_name = Some(service_name.into());
        self
    }

    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    pub fn with_parameters(mut self, parameters: Map<String, Value>) -> Self {
        self.parameters = Some(parameters);
        self
    }
}

/// Outcome of dispatching an intent.
///
/// `data` is set on success, `error` on failure. Both always serialize,
/// as `null` when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct IntentResponse {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Object>))]
    pub data: Option<Map<String, Value>>,
    #[serde(default)]
    pub error: Option<String>,
}

impl IntentResponse {
    pub fn success(message: impl Into<String>, data: Map<String, Value>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            error: Some(error.into()),
        }
    }

    /// Defined response for a capability with no handler.
    pub fn not_implemented(capability: Capability) -> Self {
        let message = capability.unavailable_message().unwrap_or(NOT_IMPLEMENTED);
        Self::failure(message, NOT_IMPLEMENTED)
    }

    /// Defined response for an intent type outside the closed set.
    pub fn invalid_intent_type() -> Self {
        Self::failure("Unsupported intent type", INVALID_INTENT_TYPE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_intent_kind_parsing() {
        assert_eq!(IntentKind::from("discovery"), IntentKind::Discovery);
        assert_eq!(IntentKind::from("execution"), IntentKind::Execution);
        assert_eq!(IntentKind::from("registration"), IntentKind::Registration);
        assert_eq!(
            IntentKind::from("Discovery"),
            IntentKind::Unknown("Discovery".to_string())
        );
    }

    #[test]
    fn test_unknown_kind_keeps_raw_value() -> Result<(), serde_json::Error> {
        let intent: Intent = serde_json::from_value(json!({"type": "bogus"}))?;
        assert_eq!(intent.kind, IntentKind::Unknown("bogus".to_string()));
        assert_eq!(intent.kind.to_string(), "bogus");
        assert!(intent.kind.capability().is_none());
        Ok(())
    }

    #[test]
    fn test_intent_ignores_extra_fields() -> Result<(), serde_json::Error> {
        let intent: Intent = serde_json::from_value(json!({
            "type": "discovery",
            "scope": "repositorio_git",
            "action": "BUSCAR",
            "parameters": {"query": "machine learning"},
            "response_format": "json"
        }))?;
        assert_eq!(intent.kind, IntentKind::Discovery);
        assert!(intent.tags.is_none());
        assert_eq!(
            intent.parameters.as_ref().and_then(|p| p.get("query")),
            Some(&json!("machine learning"))
        );
        Ok(())
    }

    #[test]
    fn test_intent_serializes_type_field() -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(Intent::discovery(["api"]))?;
        assert_eq!(value["type"], "discovery");
        assert_eq!(value["tags"], json!(["api"]));
        Ok(())
    }

    #[test]
    fn test_response_serializes_nulls() -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(IntentResponse::invalid_intent_type())?;
        assert_eq!(value["success"], false);
        assert_eq!(value["error"], INVALID_INTENT_TYPE);
        assert!(value["data"].is_null());
        assert!(value.as_object().is_some_and(|o| o.contains_key("data")));
        Ok(())
    }

    #[test]
    fn test_not_implemented_messages_differ_by_capability() {
        let execution = IntentResponse::not_implemented(Capability::Execution);
        let registration = IntentResponse::not_implemented(Capability::Registration);
        assert_eq!(execution.error.as_deref(), Some(NOT_IMPLEMENTED));
        assert_eq!(registration.error.as_deref(), Some(NOT_IMPLEMENTED));
        assert_ne!(execution.message, registration.message);
    }

    #[test]
    fn test_only_unserved_capabilities_have_a_message() {
        assert_eq!(Capability::Discovery.unavailable_message(), None);
        assert!(Capability::Execution.unavailable_message().is_some());
        assert!(Capability::Registration.unavailable_message().is_some());
    }
}
