//! Resource declaration builders — one module per infrastructure family.
//!
//! Each builder produces the typed declarations for its family, with
//! `depends_on` edges pointing at the ids other families publish. Guarded
//! families return an empty set when their guard is false.

pub mod build;
pub mod database;
pub mod loadbalancer;
pub mod service;
pub mod storage;

use crate::core::types::ProjectConfig;

/// Account id of the service account the app service runs as.
pub fn runtime_account_id(config: &ProjectConfig) -> String {
    format!("{}-runtime", config.service_name)
}

/// Account id of the service account the build pipeline deploys with.
pub fn build_account_id(config: &ProjectConfig) -> String {
    format!("{}-build", config.service_name)
}

/// IAM member string for a project-local service account.
pub fn account_member(account_id: &str, project_id: &str) -> String {
    format!(
        "serviceAccount:{}@{}.iam.gserviceaccount.com",
        account_id, project_id
    )
}
