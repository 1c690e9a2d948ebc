//! Atelier — declarative topology planner for the Creative Studio stack.
//!
//! Evaluates a studio.yaml desired-state record into the resource graph an
//! external provisioning engine applies: container-hosted web service,
//! document database, object storage, build pipeline, and an optional
//! identity-aware HTTPS load-balancer tier.

pub mod cli;
pub mod core;
pub mod resources;
