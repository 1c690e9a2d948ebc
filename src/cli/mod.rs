//! CLI subcommands — init, validate, topology, plan, export.

use crate::core::{graph, parser, topology, types};
use crate::resources;
use clap::{Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new studio project
    Init {
        /// Directory to initialize (default: current)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Validate studio.yaml without evaluating the graph
    Validate {
        /// Path to studio.yaml
        #[arg(short, long, default_value = "studio.yaml")]
        file: PathBuf,
    },

    /// Show the topology derived from the configuration
    Topology {
        /// Path to studio.yaml
        #[arg(short, long, default_value = "studio.yaml")]
        file: PathBuf,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show the resource graph in execution order
    Plan {
        /// Path to studio.yaml
        #[arg(short, long, default_value = "studio.yaml")]
        file: PathBuf,
    },

    /// Serialize the ordered graph for the provisioning engine
    Export {
        /// Path to studio.yaml
        #[arg(short, long, default_value = "studio.yaml")]
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = ExportFormat::Yaml)]
        format: ExportFormat,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ExportFormat {
    Yaml,
    Json,
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yaml => write!(f, "yaml"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Dispatch a CLI command.
pub fn dispatch(cmd: Commands) -> Result<(), String> {
    match cmd {
        Commands::Init { path } => cmd_init(&path),
        Commands::Validate { file } => cmd_validate(&file),
        Commands::Topology { file, json } => cmd_topology(&file, json),
        Commands::Plan { file } => cmd_plan(&file),
        Commands::Export {
            file,
            format,
            output,
        } => cmd_export(&file, format, output.as_deref()),
    }
}

fn cmd_init(path: &Path) -> Result<(), String> {
    let config_path = path.join("studio.yaml");
    if config_path.exists() {
        return Err(format!("{} already exists", config_path.display()));
    }

    let template = r#"# Creative Studio desired-state configuration
project_id: my-project
region: us-central1
service_name: creative-studio

# Public HTTPS load balancer with identity-aware access control.
# Requires a domain when enabled.
use_lb: false
domain: ""
initial_user: null
enable_invoker_iam: false

models:
  image: imagen-3.0-generate-002
  video: veo-2.0-generate-001

sleep_time: 45
enable_data_deletion: false
allow_local_domain_cors_requests: true
"#;
    std::fs::write(&config_path, template)
        .map_err(|e| format!("cannot write {}: {}", config_path.display(), e))?;

    println!("Initialized studio project at {}", path.display());
    println!("  Created: {}", config_path.display());
    Ok(())
}

fn cmd_validate(file: &Path) -> Result<(), String> {
    let config = parser::parse_config_file(file)?;
    let errors = parser::validate_config(&config);

    if errors.is_empty() {
        println!(
            "OK: {} in {} ({})",
            config.service_name,
            config.region,
            if config.use_lb {
                "load-balanced"
            } else {
                "direct ingress"
            }
        );
        Ok(())
    } else {
        for e in &errors {
            eprintln!("  ERROR: {}", e);
        }
        Err(format!("{} validation error(s)", errors.len()))
    }
}

/// Parse and validate a studio config file, returning errors if invalid.
fn parse_and_validate(file: &Path) -> Result<types::ProjectConfig, String> {
    let config = parser::parse_config_file(file)?;
    let errors = parser::validate_config(&config);
    if errors.is_empty() {
        return Ok(config);
    }
    for e in &errors {
        eprintln!("  ERROR: {}", e);
    }
    Err("validation failed".to_string())
}

fn derive_topology(config: &types::ProjectConfig) -> types::DerivedTopology {
    topology::select(config, &resources::service::generated_urls(config))
}

fn cmd_topology(file: &Path, json: bool) -> Result<(), String> {
    let config = parse_and_validate(file)?;
    let topo = derive_topology(&config);

    if json {
        let rendered =
            serde_json::to_string_pretty(&topo).map_err(|e| format!("serialize error: {}", e))?;
        println!("{}", rendered);
        return Ok(());
    }

    println!("Topology for {}:", config.project_id);
    println!("  ingress:              {}", topo.ingress);
    println!("  launch stage:         {}", topo.launch_stage);
    println!("  iap enabled:          {}", topo.iap_enabled);
    println!("  invoker iam disabled: {}", topo.invoker_iam_disabled);
    println!("  deployed domain:      {}", topo.deployed_domain.join(", "));
    println!("  cors origins:         {}", topo.cors_origins.join(", "));
    Ok(())
}

fn cmd_plan(file: &Path) -> Result<(), String> {
    let config = parse_and_validate(file)?;
    let topo = derive_topology(&config);
    let graph = graph::assemble(&config, &topo);
    let order = graph::build_execution_order(&graph)?;

    println!("Planning: {} ({} resources)", graph.name, graph.len());
    println!();
    for id in &order {
        if let Some(decl) = graph.get(id) {
            println!("  + {}", decl.describe(id));
        }
    }
    println!();
    println!(
        "Plan: {} resources to create ({}).",
        graph.len(),
        if config.use_lb {
            "load-balancer tier included"
        } else {
            "no load-balancer tier"
        }
    );
    Ok(())
}

fn cmd_export(file: &Path, format: ExportFormat, output: Option<&Path>) -> Result<(), String> {
    let config = parse_and_validate(file)?;
    let topo = derive_topology(&config);
    let graph = graph::assemble(&config, &topo);
    let order = graph::build_execution_order(&graph)?;

    let doc = types::ExportDocument {
        name: graph.name.clone(),
        execution_order: order,
        resources: graph.resources,
    };

    let rendered = match format {
        ExportFormat::Yaml => {
            serde_yaml_ng::to_string(&doc).map_err(|e| format!("serialize error: {}", e))?
        }
        ExportFormat::Json => {
            serde_json::to_string_pretty(&doc).map_err(|e| format!("serialize error: {}", e))?
        }
    };

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .map_err(|e| format!("cannot write {}: {}", path.display(), e))?;
            println!("Exported {} resources to {}", doc.resources.len(), path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}
