//! App service declarations — the container-hosted web tier.

use crate::core::types::*;
use crate::resources;
use indexmap::IndexMap;

/// URLs the platform generates for the service. Used as the deployed domain
/// when no load balancer fronts the deployment.
pub fn generated_urls(config: &ProjectConfig) -> Vec<String> {
    vec![format!(
        "https://{}-{}.{}.run.app",
        config.service_name, config.project_id, config.region
    )]
}

/// Environment handed to the service container.
pub fn service_env(config: &ProjectConfig) -> IndexMap<String, String> {
    let mut env = IndexMap::new();
    env.insert("PROJECT_ID".to_string(), config.project_id.clone());
    env.insert("LOCATION".to_string(), config.region.clone());
    env.insert(
        "GENMEDIA_BUCKET".to_string(),
        resources::storage::bucket_name(config),
    );
    for (name, model_id) in &config.models {
        let key = format!("{}_MODEL_ID", name.to_uppercase().replace('-', "_"));
        env.insert(key, model_id.clone());
    }
    env
}

/// Runtime identity, its project-level grants, and the service itself.
pub fn declarations(
    config: &ProjectConfig,
    topology: &DerivedTopology,
) -> Vec<(String, ResourceDecl)> {
    let account_id = resources::runtime_account_id(config);
    let member = resources::account_member(&account_id, &config.project_id);

    let mut decls = vec![(
        "runtime-sa".to_string(),
        ResourceDecl {
            kind: ResourceKind::ServiceAccount {
                account_id: account_id.clone(),
                display_name: format!("{} runtime", config.service_name),
            },
            depends_on: vec!["api-settle".to_string()],
        },
    )];

    for (suffix, role) in [
        ("datastore", ROLE_DATASTORE_USER),
        ("aiplatform", ROLE_AIPLATFORM_USER),
        ("logging", ROLE_LOG_WRITER),
    ] {
        decls.push((
            format!("runtime-sa-{}", suffix),
            ResourceDecl {
                kind: ResourceKind::IamBinding {
                    role: role.to_string(),
                    member: member.clone(),
                    target: "project".to_string(),
                },
                depends_on: vec!["runtime-sa".to_string()],
            },
        ));
    }

    decls.push((
        "app".to_string(),
        ResourceDecl {
            kind: ResourceKind::AppService {
                name: config.service_name.clone(),
                region: config.region.clone(),
                ingress: topology.ingress,
                launch_stage: topology.launch_stage,
                iap_enabled: topology.iap_enabled,
                invoker_iam_disabled: topology.invoker_iam_disabled,
                service_account: member,
                env: service_env(config),
                cors_origins: topology.cors_origins.clone(),
            },
            depends_on: vec![
                "runtime-sa".to_string(),
                "database".to_string(),
                "media-bucket".to_string(),
            ],
        },
    ));

    decls
}
