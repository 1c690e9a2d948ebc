//! Object storage declarations — the generated-media bucket and its grants.

use crate::core::types::*;
use crate::resources;

/// Bucket names are globally unique, so the project id is the prefix.
pub fn bucket_name(config: &ProjectConfig) -> String {
    format!("{}-studio-assets", config.project_id)
}

pub fn declarations(config: &ProjectConfig) -> Vec<(String, ResourceDecl)> {
    let runtime_member = resources::account_member(
        &resources::runtime_account_id(config),
        &config.project_id,
    );

    vec![
        (
            "media-bucket".to_string(),
            ResourceDecl {
                kind: ResourceKind::StorageBucket {
                    name: bucket_name(config),
                    location: config.region.clone(),
                    force_destroy: config.enable_data_deletion,
                },
                depends_on: vec!["api-settle".to_string()],
            },
        ),
        (
            "media-bucket-object-admin".to_string(),
            ResourceDecl {
                kind: ResourceKind::IamBinding {
                    role: ROLE_STORAGE_OBJECT_ADMIN.to_string(),
                    member: runtime_member,
                    target: "media-bucket".to_string(),
                },
                depends_on: vec!["media-bucket".to_string(), "runtime-sa".to_string()],
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(yaml: &str) -> ProjectConfig {
        serde_yaml_ng::from_str(yaml).unwrap()
    }

    #[test]
    fn test_bucket_name_prefixed_by_project() {
        let cfg = config("project_id: studio-prod\n");
        assert_eq!(bucket_name(&cfg), "studio-prod-studio-assets");
    }

    #[test]
    fn test_bucket_kept_by_default() {
        let decls = declarations(&config("project_id: p\n"));
        match &decls[0].1.kind {
            ResourceKind::StorageBucket { force_destroy, .. } => assert!(!force_destroy),
            other => panic!("unexpected kind: {}", other),
        }
    }

    #[test]
    fn test_data_deletion_enables_force_destroy() {
        let decls = declarations(&config("project_id: p\nenable_data_deletion: true\n"));
        match &decls[0].1.kind {
            ResourceKind::StorageBucket { force_destroy, .. } => assert!(*force_destroy),
            other => panic!("unexpected kind: {}", other),
        }
    }

    #[test]
    fn test_object_admin_grant_targets_bucket() {
        let decls = declarations(&config("project_id: p\n"));
        let (id, decl) = &decls[1];
        assert_eq!(id, "media-bucket-object-admin");
        match &decl.kind {
            ResourceKind::IamBinding { role, member, target } => {
                assert_eq!(role, ROLE_STORAGE_OBJECT_ADMIN);
                assert_eq!(target, "media-bucket");
                assert!(member.starts_with("serviceAccount:creative-studio-runtime@"));
            }
            other => panic!("unexpected kind: {}", other),
        }
        assert!(decl.depends_on.contains(&"runtime-sa".to_string()));
    }
}
