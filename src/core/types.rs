//! Configuration schema and resource-declaration types.
//!
//! `ProjectConfig` is the operator-supplied desired state parsed from
//! studio.yaml. `DerivedTopology` and `ResourceGraph` are computed from it
//! once per evaluation pass and handed to the provisioning engine; they carry
//! no state of their own beyond that pass.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Platform constants
// ============================================================================
// Role and API identifiers are defined by the cloud platform and must be
// reproduced verbatim for the emitted graph to be applicable.

pub const ROLE_IAP_ACCESSOR: &str = "roles/iap.httpsResourceAccessor";
pub const ROLE_RUN_INVOKER: &str = "roles/run.invoker";
pub const ROLE_RUN_DEVELOPER: &str = "roles/run.developer";
pub const ROLE_STORAGE_OBJECT_ADMIN: &str = "roles/storage.objectAdmin";
pub const ROLE_DATASTORE_USER: &str = "roles/datastore.user";
pub const ROLE_AIPLATFORM_USER: &str = "roles/aiplatform.user";
pub const ROLE_LOG_WRITER: &str = "roles/logging.logWriter";
pub const ROLE_ARTIFACT_WRITER: &str = "roles/artifactregistry.writer";
pub const ROLE_SERVICE_ACCOUNT_USER: &str = "roles/iam.serviceAccountUser";

/// Platform APIs the application stack requires before anything else exists.
pub const REQUIRED_APIS: &[&str] = &[
    "aiplatform.googleapis.com",
    "artifactregistry.googleapis.com",
    "cloudbuild.googleapis.com",
    "compute.googleapis.com",
    "firestore.googleapis.com",
    "iap.googleapis.com",
    "run.googleapis.com",
    "storage.googleapis.com",
];

/// Origins appended to the CORS allowlist for local development.
pub const LOCAL_CORS_ORIGINS: &[&str] = &["http://localhost:8080", "http://0.0.0.0:8080"];

// ============================================================================
// Top-level studio.yaml
// ============================================================================

/// Root configuration — the desired state of the Creative Studio deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Cloud project identifier (required, non-empty)
    pub project_id: String,

    /// Deployment region
    #[serde(default = "default_region")]
    pub region: String,

    /// Name of the container-hosted web service
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Public domain served by the load balancer (required when use_lb)
    #[serde(default)]
    pub domain: String,

    /// First principal granted IAP access through the load balancer
    #[serde(default)]
    pub initial_user: Option<String>,

    /// Front the service with an HTTPS load balancer
    #[serde(default)]
    pub use_lb: bool,

    /// Keep the invoker IAM check even without a load balancer
    #[serde(default)]
    pub enable_invoker_iam: bool,

    /// Generative model ids exposed to the service as environment variables
    #[serde(default)]
    pub models: IndexMap<String, String>,

    /// Settle delay (seconds) after platform API enablement
    #[serde(default = "default_sleep_time")]
    pub sleep_time: u64,

    /// Allow destroying the database and bucket contents
    #[serde(default)]
    pub enable_data_deletion: bool,

    /// Append localhost origins to the CORS allowlist
    #[serde(default)]
    pub allow_local_domain_cors_requests: bool,
}

fn default_region() -> String {
    "us-central1".to_string()
}

fn default_service_name() -> String {
    "creative-studio".to_string()
}

fn default_sleep_time() -> u64 {
    45
}

// ============================================================================
// Derived topology
// ============================================================================

/// Network ingress policy for the app service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IngressMode {
    #[serde(rename = "INGRESS_TRAFFIC_INTERNAL_LOAD_BALANCER")]
    InternalLb,
    #[serde(rename = "INGRESS_TRAFFIC_ALL")]
    All,
}

impl IngressMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InternalLb => "INGRESS_TRAFFIC_INTERNAL_LOAD_BALANCER",
            Self::All => "INGRESS_TRAFFIC_ALL",
        }
    }
}

impl fmt::Display for IngressMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Platform maturity tag for the app service. IAP at the service tier is a
/// BETA feature, so the no-load-balancer topology pins BETA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaunchStage {
    #[serde(rename = "GA")]
    Ga,
    #[serde(rename = "BETA")]
    Beta,
}

impl LaunchStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ga => "GA",
            Self::Beta => "BETA",
        }
    }
}

impl fmt::Display for LaunchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Topology derived from a `ProjectConfig` — fully determined by its inputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedTopology {
    /// Which network paths may reach the service
    pub ingress: IngressMode,

    /// IAP applied at the service tier (only when no load balancer)
    pub iap_enabled: bool,

    /// Invoker IAM check waived on the service
    pub invoker_iam_disabled: bool,

    /// Maturity tag required by the enabled feature set
    pub launch_stage: LaunchStage,

    /// Public URLs the deployment answers on
    pub deployed_domain: Vec<String>,

    /// CORS allowlist handed to the service
    pub cors_origins: Vec<String>,
}

// ============================================================================
// Resource declarations
// ============================================================================

/// One declared infrastructure unit. Conditional resources are absent from
/// the graph when their guard is false, never present with empty fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResourceKind {
    /// Platform API enablement for the whole stack
    ApiServices { services: Vec<String> },

    /// Fixed settle delay after API enablement
    SettleGate { duration_seconds: u64 },

    /// A service account identity
    ServiceAccount {
        account_id: String,
        display_name: String,
    },

    /// A single role grant on a target resource or the project
    IamBinding {
        role: String,
        member: String,
        target: String,
    },

    /// The container-hosted web service
    AppService {
        name: String,
        region: String,
        ingress: IngressMode,
        launch_stage: LaunchStage,
        iap_enabled: bool,
        invoker_iam_disabled: bool,
        service_account: String,
        env: IndexMap<String, String>,
        cors_origins: Vec<String>,
    },

    /// The document database backing the service
    DocumentDatabase {
        name: String,
        location: String,
        delete_protection: bool,
    },

    /// Object storage for generated media
    StorageBucket {
        name: String,
        location: String,
        force_destroy: bool,
    },

    /// Container image registry for the build pipeline
    ArtifactRegistry {
        repository: String,
        location: String,
        format: String,
    },

    /// Platform-managed TLS certificate (load-balancer tier)
    ManagedCertificate { domains: Vec<String> },

    /// Serverless network endpoint group pointing at the service
    EndpointGroup { service: String, region: String },

    /// Load-balancer backend with IAP enabled at the balancer tier
    BackendService {
        endpoint_group: String,
        iap_enabled: bool,
    },

    /// HTTPS frontend: forwarding rule, URL map, certificate attachment
    LoadBalancerFrontend {
        name: String,
        certificate: String,
        backend: String,
    },
}

impl ResourceKind {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::ApiServices { .. } => "api_services",
            Self::SettleGate { .. } => "settle_gate",
            Self::ServiceAccount { .. } => "service_account",
            Self::IamBinding { .. } => "iam_binding",
            Self::AppService { .. } => "app_service",
            Self::DocumentDatabase { .. } => "document_database",
            Self::StorageBucket { .. } => "storage_bucket",
            Self::ArtifactRegistry { .. } => "artifact_registry",
            Self::ManagedCertificate { .. } => "managed_certificate",
            Self::EndpointGroup { .. } => "endpoint_group",
            Self::BackendService { .. } => "backend_service",
            Self::LoadBalancerFrontend { .. } => "load_balancer_frontend",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind_name())
    }
}

/// A declaration plus its prerequisite edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDecl {
    #[serde(flatten)]
    pub kind: ResourceKind,

    /// Resource ids that must be ready before this one
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
}

impl ResourceDecl {
    /// Human-readable one-liner for plan output.
    pub fn describe(&self, id: &str) -> String {
        match &self.kind {
            ResourceKind::ApiServices { services } => {
                format!("{}: enable {} platform APIs", id, services.len())
            }
            ResourceKind::SettleGate { duration_seconds } => {
                format!("{}: wait {}s for API propagation", id, duration_seconds)
            }
            ResourceKind::ServiceAccount { account_id, .. } => {
                format!("{}: service account {}", id, account_id)
            }
            ResourceKind::IamBinding {
                role,
                member,
                target,
            } => {
                format!("{}: grant {} to {} on {}", id, role, member, target)
            }
            ResourceKind::AppService {
                name,
                ingress,
                launch_stage,
                ..
            } => format!("{}: service {} [{}, {}]", id, name, launch_stage, ingress),
            ResourceKind::DocumentDatabase { name, location, .. } => {
                format!("{}: database {} in {}", id, name, location)
            }
            ResourceKind::StorageBucket { name, .. } => format!("{}: bucket {}", id, name),
            ResourceKind::ArtifactRegistry { repository, .. } => {
                format!("{}: registry {}", id, repository)
            }
            ResourceKind::ManagedCertificate { domains } => {
                format!("{}: certificate for {}", id, domains.join(", "))
            }
            ResourceKind::EndpointGroup { service, .. } => {
                format!("{}: endpoint group for {}", id, service)
            }
            ResourceKind::BackendService { endpoint_group, .. } => {
                format!("{}: backend over {}", id, endpoint_group)
            }
            ResourceKind::LoadBalancerFrontend { name, .. } => {
                format!("{}: https frontend {}", id, name)
            }
        }
    }
}

// ============================================================================
// Resource graph
// ============================================================================

/// The assembled desired-state graph for one evaluation pass.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceGraph {
    /// Graph name (the service name)
    pub name: String,

    /// Declarations in insertion order
    pub resources: IndexMap<String, ResourceDecl>,
}

impl ResourceGraph {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            resources: IndexMap::new(),
        }
    }

    pub fn insert(&mut self, id: &str, decl: ResourceDecl) {
        self.resources.insert(id.to_string(), decl);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.resources.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&ResourceDecl> {
        self.resources.get(id)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

/// Export wrapper handed to the provisioning engine: declarations plus the
/// order they must be applied in.
#[derive(Debug, Clone, Serialize)]
pub struct ExportDocument {
    pub name: String,
    pub execution_order: Vec<String>,
    pub resources: IndexMap<String, ResourceDecl>,
}

// ============================================================================
// Tests
// ============================================================================
