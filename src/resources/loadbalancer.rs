//! Load-balancer tier declarations — present iff `use_lb`.
//!
//! Managed certificate, serverless endpoint group, IAP-enabled backend, and
//! the HTTPS frontend. The initial-user IAP grant additionally requires
//! `initial_user` to be set; both guards must hold for it to exist.

use crate::core::types::*;

pub fn declarations(config: &ProjectConfig) -> Vec<(String, ResourceDecl)> {
    if !config.use_lb {
        return Vec::new();
    }

    let mut decls = vec![
        (
            "lb-certificate".to_string(),
            ResourceDecl {
                kind: ResourceKind::ManagedCertificate {
                    domains: vec![config.domain.clone()],
                },
                depends_on: vec!["api-settle".to_string()],
            },
        ),
        (
            "lb-endpoint-group".to_string(),
            ResourceDecl {
                kind: ResourceKind::EndpointGroup {
                    service: config.service_name.clone(),
                    region: config.region.clone(),
                },
                depends_on: vec!["app".to_string()],
            },
        ),
        (
            "lb-backend".to_string(),
            ResourceDecl {
                kind: ResourceKind::BackendService {
                    endpoint_group: "lb-endpoint-group".to_string(),
                    // IAP runs at the balancer tier on this path
                    iap_enabled: true,
                },
                depends_on: vec!["lb-endpoint-group".to_string()],
            },
        ),
        (
            "lb-frontend".to_string(),
            ResourceDecl {
                kind: ResourceKind::LoadBalancerFrontend {
                    name: format!("{}-lb", config.service_name),
                    certificate: "lb-certificate".to_string(),
                    backend: "lb-backend".to_string(),
                },
                depends_on: vec!["lb-certificate".to_string(), "lb-backend".to_string()],
            },
        ),
    ];

    if let Some(user) = &config.initial_user {
        decls.push((
            "iap-initial-user".to_string(),
            ResourceDecl {
                kind: ResourceKind::IamBinding {
                    role: ROLE_IAP_ACCESSOR.to_string(),
                    member: format!("user:{}", user),
                    target: "lb-backend".to_string(),
                },
                depends_on: vec!["lb-backend".to_string()],
            },
        ));
    }

    decls
}
