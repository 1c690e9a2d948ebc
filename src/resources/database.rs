//! Document database declaration.

use crate::core::types::*;

// The platform only allows one default database per project.
const DEFAULT_DATABASE: &str = "(default)";

pub fn declarations(config: &ProjectConfig) -> Vec<(String, ResourceDecl)> {
    vec![(
        "database".to_string(),
        ResourceDecl {
            kind: ResourceKind::DocumentDatabase {
                name: DEFAULT_DATABASE.to_string(),
                location: config.region.clone(),
                delete_protection: !config.enable_data_deletion,
            },
            depends_on: vec!["api-settle".to_string()],
        },
    )]
}
