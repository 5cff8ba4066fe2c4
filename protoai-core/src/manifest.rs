//! Manifest descriptor
//!
//! The self-description document served at `/protoai/readme.protobuf`.
//! Values are deployment configuration; the field shape is the contract.

use std::fmt;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ManifestError;

static SEMVER: Lazy<Result<Regex, regex::Error>> = Lazy::new(|| Regex::new(r"^\d+\.\d+\.\d+$"));

/// Protocol kind of an access interface, carried as an integer on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", from = "i32")]
pub enum InterfaceType {
    Unspecified,
    Grpc,
    RestHttp,
    GraphQl,
    WebSocket,
    Other(i32),
}

impl From<i32> for InterfaceType {
    fn from(value: i32) -> Self {
        match value {
            0 => InterfaceType::Unspecified,
            1 => InterfaceType::Grpc,
            2 => InterfaceType::RestHttp,
            3 => InterfaceType::GraphQl,
            4 => InterfaceType::WebSocket,
            other => InterfaceType::Other(other),
        }
    }
}

impl From<InterfaceType> for i32 {
    fn from(kind: InterfaceType) -> Self {
        match kind {
            InterfaceType::Unspecified => 0,
            InterfaceType::Grpc => 1,
            InterfaceType::RestHttp => 2,
            InterfaceType::GraphQl => 3,
            InterfaceType::WebSocket => 4,
            InterfaceType::Other(value) => value,
        }
    }
}

impl fmt::Display for InterfaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterfaceType::Unspecified => f.write_str("UNSPECIFIED"),
            InterfaceType::Grpc => f.write_str("GRPC"),
            InterfaceType::RestHttp => f.write_str("REST_HTTP"),
            InterfaceType::GraphQl => f.write_str("GRAPHQL"),
            InterfaceType::WebSocket => f.write_str("WEBSOCKET"),
            InterfaceType::Other(value) => write!(f, "UNKNOWN({})", value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ProjectInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub repository: String,
    pub tags: Vec<String>,
    pub owner: String,
    pub license: String,
}

/// One way of reaching the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AccessInterface {
    #[serde(rename = "type")]
    #[cfg_attr(feature = "openapi", schema(value_type = i32, example = 2))]
    pub kind: InterfaceType,
    pub base_url_or_address: String,
    pub description: String,
    pub spec_url: String,
    pub available_methods_or_operations: Vec<String>,
    pub available_events: Vec<String>,
    pub data_formats: Vec<String>,
    pub preferred_protocol_version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CommunicationDetails {
    pub access_interfaces: Vec<AccessInterface>,
    pub default_data_formats: Vec<String>,
}

/// Security posture. The referenced policy documents are not enforced here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SecurityInfo {
    pub encryption_required: bool,
    pub auth_reference: String,
    pub permissions_reference: String,
    pub ignore_reference: String,
    pub high_level_security_policies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Documentation {
    pub human_readme_link: String,
    pub api_reference_link: String,
    pub contact_email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdatePolicy {
    pub versioning_scheme: String,
    pub changelog_link: String,
    pub update_check_endpoint: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ComplianceReference {
    pub compliance_proto_reference: String,
}

/// The full descriptor document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Manifest {
    pub project_info: ProjectInfo,
    pub communication_details: CommunicationDetails,
    pub security_info: SecurityInfo,
    pub documentation: Documentation,
    pub update_policy: UpdatePolicy,
    pub compliance_ref: ComplianceReference,
}

impl Manifest {
    /// Built-in descriptor advertising `base_url` as the REST interface.
    pub fn builtin(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/');
        let repository = "https://github.com/protoai/protoai-mcp";

        Self {
            project_info: ProjectInfo {
                name: "ProtoAi MCP".to_string(),
                version: "1.0.0".to_string(),
                description: "Manifest and discovery system for APIs".to_string(),
                repository: repository.to_string(),
                tags: vec![
                    "api".to_string(),
                    "discovery".to_string(),
                    "semantic-manifest".to_string(),
                ],
                owner: "ProtoAi Team".to_string(),
                license: "MIT".to_string(),
            },
            communication_details: CommunicationDetails {
                access_interfaces: vec![AccessInterface {
                    kind: InterfaceType::RestHttp,
                    base_url_or_address: base_url.to_string(),
                    description: "Primary REST API".to_string(),
                    spec_url: format!("{}/swagger-ui", base_url),
                    available_methods_or_operations: vec![
                        "/protoai/readme.protobuf".to_string(),
                        "/search".to_string(),
                    ],
                    available_events: Vec::new(),
                    data_formats: vec!["json".to_string()],
                    preferred_protocol_version: "HTTP/1.1".to_string(),
                }],
                default_data_formats: vec!["json".to_string(), "protobuf".to_string()],
            },
            security_info: SecurityInfo {
                encryption_required: true,
                auth_reference: "./auth.proto".to_string(),
                permissions_reference: "./permissions.proto".to_string(),
                ignore_reference: "./ignore.proto".to_string(),
                high_level_security_policies: vec!["JWT Bearer Token Required".to_string()],
            },
            documentation: Documentation {
                human_readme_link: format!("{}/README.md", repository),
                api_reference_link: format!("{}/swagger-ui", base_url),
                contact_email: "contact@protoai.example.com".to_string(),
            },
            update_policy: UpdatePolicy {
                versioning_scheme: "semantic".to_string(),
                changelog_link: format!("{}/CHANGELOG.md", repository),
                update_check_endpoint: "/version".to_string(),
            },
            compliance_ref: ComplianceReference {
                compliance_proto_reference: "./compliance.proto".to_string(),
            },
        }
    }

    /// Parse and validate a manifest from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ManifestError> {
        let manifest: Manifest =
            serde_json::from_str(json).map_err(|e| ManifestError::InvalidJson {
                reason: e.to_string(),
            })?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Read, parse and validate a manifest file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| ManifestError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json_str(&json)
    }

    /// Check required fields, version format and interfaces.
    ///
    /// Collects every problem rather than stopping at the first.
    pub fn validate(&self) -> Result<(), ManifestError> {
        let mut errors = Vec::new();
        let info = &self.project_info;

        for (field, value) in [
            ("project_info.name", &info.name),
            ("project_info.version", &info.version),
            ("project_info.description", &info.description),
        ] {
            if value.trim().is_empty() {
                errors.push(format!("Required field missing: {}", field));
            }
        }

        if !info.version.is_empty() && !is_semver(&info.version) {
            errors.push(format!(
                "project_info.version must be MAJOR.MINOR.PATCH, got '{}'",
                info.version
            ));
        }

        for (index, iface) in self
            .communication_details
            .access_interfaces
            .iter()
            .enumerate()
        {
            if matches!(
                iface.kind,
                InterfaceType::Unspecified | InterfaceType::Other(_)
            ) {
                errors.push(format!(
                    "Access interface {} has unsupported type {}",
                    index, iface.kind
                ));
            }
            if iface.base_url_or_address.trim().is_empty() {
                errors.push(format!(
                    "Access interface {} is missing base_url_or_address",
                    index
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ManifestError::Invalid { errors })
        }
    }
}

fn is_semver(version: &str) -> bool {
    match SEMVER.as_ref() {
        Ok(re) => re.is_match(version),
        Err(_) => false,
    }
}
