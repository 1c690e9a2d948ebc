//! Build pipeline declarations — image registry, deploy identity, grants.

use crate::core::types::*;
use crate::resources;

pub fn declarations(config: &ProjectConfig) -> Vec<(String, ResourceDecl)> {
    let build_id = resources::build_account_id(config);
    let build_member = resources::account_member(&build_id, &config.project_id);

    vec![
        (
            "image-registry".to_string(),
            ResourceDecl {
                kind: ResourceKind::ArtifactRegistry {
                    repository: config.service_name.clone(),
                    location: config.region.clone(),
                    format: "DOCKER".to_string(),
                },
                depends_on: vec!["api-settle".to_string()],
            },
        ),
        (
            "build-sa".to_string(),
            ResourceDecl {
                kind: ResourceKind::ServiceAccount {
                    account_id: build_id,
                    display_name: format!("{} build", config.service_name),
                },
                depends_on: vec!["api-settle".to_string()],
            },
        ),
        (
            "build-sa-registry-writer".to_string(),
            ResourceDecl {
                kind: ResourceKind::IamBinding {
                    role: ROLE_ARTIFACT_WRITER.to_string(),
                    member: build_member.clone(),
                    target: "image-registry".to_string(),
                },
                depends_on: vec!["build-sa".to_string(), "image-registry".to_string()],
            },
        ),
        (
            "build-sa-run-developer".to_string(),
            ResourceDecl {
                kind: ResourceKind::IamBinding {
                    role: ROLE_RUN_DEVELOPER.to_string(),
                    member: build_member.clone(),
                    target: "project".to_string(),
                },
                depends_on: vec!["build-sa".to_string()],
            },
        ),
        // The deployer must be able to act as the runtime identity to roll
        // out new revisions.
        (
            "build-sa-actas-runtime".to_string(),
            ResourceDecl {
                kind: ResourceKind::IamBinding {
                    role: ROLE_SERVICE_ACCOUNT_USER.to_string(),
                    member: build_member,
                    target: "runtime-sa".to_string(),
                },
                depends_on: vec!["build-sa".to_string(), "runtime-sa".to_string()],
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ProjectConfig {
        serde_yaml_ng::from_str("project_id: p\n").unwrap()
    }

    #[test]
    fn test_registry_is_docker_format() {
        let decls = declarations(&config());
        match &decls[0].1.kind {
            ResourceKind::ArtifactRegistry {
                repository, format, ..
            } => {
                assert_eq!(repository, "creative-studio");
                assert_eq!(format, "DOCKER");
            }
            other => panic!("unexpected kind: {}", other),
        }
    }

    #[test]
    fn test_build_grants() {
        let decls = declarations(&config());
        let roles: Vec<_> = decls
            .iter()
            .filter_map(|(_, d)| match &d.kind {
                ResourceKind::IamBinding { role, .. } => Some(role.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            roles,
            vec![
                ROLE_ARTIFACT_WRITER,
                ROLE_RUN_DEVELOPER,
                ROLE_SERVICE_ACCOUNT_USER
            ]
        );
    }

    #[test]
    fn test_actas_targets_runtime_account() {
        let decls = declarations(&config());
        let (_, decl) = decls
            .iter()
            .find(|(id, _)| id == "build-sa-actas-runtime")
            .unwrap();
        match &decl.kind {
            ResourceKind::IamBinding { target, .. } => assert_eq!(target, "runtime-sa"),
            other => panic!("unexpected kind: {}", other),
        }
        assert!(decl.depends_on.contains(&"runtime-sa".to_string()));
    }
}
