//! Resource graph assembly and dependency ordering.
//!
//! `assemble` stitches the per-family declarations into one graph behind the
//! platform-API settle gate. `build_execution_order` computes a topological
//! order using Kahn's algorithm with deterministic (alphabetical)
//! tie-breaking; a resource never precedes its declared prerequisites.

use super::types::*;
use crate::resources;
use std::collections::{HashMap, HashSet, VecDeque};

/// Assemble the full desired-state graph for one evaluation pass.
pub fn assemble(config: &ProjectConfig, topology: &DerivedTopology) -> ResourceGraph {
    let mut graph = ResourceGraph::new(&config.service_name);

    graph.insert(
        "platform-apis",
        ResourceDecl {
            kind: ResourceKind::ApiServices {
                services: REQUIRED_APIS.iter().map(|s| s.to_string()).collect(),
            },
            depends_on: vec![],
        },
    );

    // Control-plane propagation after API enablement is eventually
    // consistent; everything downstream waits behind this gate.
    graph.insert(
        "api-settle",
        ResourceDecl {
            kind: ResourceKind::SettleGate {
                duration_seconds: config.sleep_time,
            },
            depends_on: vec!["platform-apis".to_string()],
        },
    );

    let families = [
        resources::database::declarations(config),
        resources::storage::declarations(config),
        resources::build::declarations(config),
        resources::service::declarations(config, topology),
        resources::loadbalancer::declarations(config),
    ];
    for family in families {
        for (id, decl) in family {
            graph.insert(&id, decl);
        }
    }

    graph
}

/// Build a topological execution order from declaration dependencies.
pub fn build_execution_order(graph: &ResourceGraph) -> Result<Vec<String>, String> {
    let resource_ids: Vec<String> = graph.resources.keys().cloned().collect();
    let mut in_degree: HashMap<String, usize> = HashMap::new();
    let mut adjacency: HashMap<String, Vec<String>> = HashMap::new();

    for id in &resource_ids {
        in_degree.insert(id.clone(), 0);
        adjacency.insert(id.clone(), Vec::new());
    }

    for (id, decl) in &graph.resources {
        for dep in &decl.depends_on {
            if !graph.contains(dep) {
                return Err(format!("resource '{}' depends on unknown '{}'", id, dep));
            }
            adjacency.get_mut(dep).expect("initialized above").push(id.clone());
            *in_degree.get_mut(id).expect("initialized above") += 1;
        }
    }

    let mut queue: VecDeque<String> = VecDeque::new();
    let mut zero_degree: Vec<String> = in_degree
        .iter()
        .filter(|(_, &d)| d == 0)
        .map(|(id, _)| id.clone())
        .collect();
    zero_degree.sort();
    for id in zero_degree {
        queue.push_back(id);
    }

    let mut order = Vec::new();
    while let Some(current) = queue.pop_front() {
        order.push(current.clone());

        let mut next_ready: Vec<String> = Vec::new();
        if let Some(neighbors) = adjacency.get(&current) {
            for neighbor in neighbors {
                let degree = in_degree.get_mut(neighbor).expect("initialized above");
                *degree -= 1;
                if *degree == 0 {
                    next_ready.push(neighbor.clone());
                }
            }
        }
        next_ready.sort();
        for id in next_ready {
            queue.push_back(id);
        }
    }

    if order.len() != resource_ids.len() {
        let remaining: HashSet<_> = resource_ids.iter().collect();
        let ordered: HashSet<_> = order.iter().collect();
        let cycle_members: Vec<_> = remaining.difference(&ordered).collect();
        return Err(format!(
            "dependency cycle detected involving: {}",
            cycle_members
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }

    Ok(order)
}
