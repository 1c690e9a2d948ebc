//! Topology selection — the one decision function in the system.
//!
//! Maps a `ProjectConfig` to the derived flags that shape the resource graph.
//! Pure: no side effects, no hidden state. `service_urls` are the platform-
//! generated URLs of the app service, used as the deployed domain when no
//! load balancer fronts it.

use super::types::{DerivedTopology, IngressMode, LaunchStage, ProjectConfig, LOCAL_CORS_ORIGINS};

/// Derive the deployment topology from the configuration.
pub fn select(config: &ProjectConfig, service_urls: &[String]) -> DerivedTopology {
    let ingress = if config.use_lb {
        IngressMode::InternalLb
    } else {
        IngressMode::All
    };

    // With a load balancer, IAP runs at the balancer tier; without one the
    // service itself enables IAP, which is why the launch stage drops to BETA.
    let iap_enabled = !config.use_lb;
    let launch_stage = if config.use_lb {
        LaunchStage::Ga
    } else {
        LaunchStage::Beta
    };

    // Invoker IAM is waived only when there is no load balancer and the
    // operator has not explicitly asked to keep it.
    let invoker_iam_disabled = !config.use_lb && !config.enable_invoker_iam;

    let deployed_domain = if config.use_lb {
        vec![format!("https://{}", config.domain)]
    } else {
        service_urls.to_vec()
    };

    let mut cors_origins = deployed_domain.clone();
    if config.allow_local_domain_cors_requests {
        cors_origins.extend(LOCAL_CORS_ORIGINS.iter().map(|s| s.to_string()));
    }

    DerivedTopology {
        ingress,
        iap_enabled,
        invoker_iam_disabled,
        launch_stage,
        deployed_domain,
        cors_origins,
    }
}
