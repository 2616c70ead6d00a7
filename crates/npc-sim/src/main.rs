//! npc-sim - headless behavior tree driver.
//!
//! - `npc-sim run --config sim.yaml` - tick a zone of agents and print results
//! - `npc-sim check tree.yaml...` - load tree documents and print their outline
//! - `npc-sim types` - list registered node, condition and filter types

mod config;
mod demo;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use npc_bt::{Agent, BehaviorCache, Loader, Registry, YamlLoader, Zone, ZoneId};

use crate::config::SimConfig;

#[derive(Parser)]
#[command(name = "npc-sim")]
#[command(about = "Headless NPC behavior tree driver", version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tick a zone of agents
    Run {
        /// Simulation config file
        #[arg(short, long)]
        config: PathBuf,

        /// Override the configured number of ticks
        #[arg(long)]
        ticks: Option<u64>,
    },

    /// Load tree documents and print their outline
    Check {
        #[arg(required = true)]
        trees: Vec<PathBuf>,
    },

    /// List registered types
    Types,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    fmt().with_env_filter(filter).with_target(false).init();

    let mut registry = Registry::with_builtins();
    demo::register(&mut registry);

    match cli.command {
        Commands::Run { config, ticks } => run(&registry, &config, ticks),
        Commands::Check { trees } => check(&registry, &trees),
        Commands::Types => {
            show_types(&registry);
            Ok(())
        }
    }
}

fn run(registry: &Registry, path: &Path, ticks: Option<u64>) -> Result<()> {
    let mut config = SimConfig::load(path)?;
    config.resolve_paths(path.parent().unwrap_or_else(|| Path::new(".")));
    let ticks = ticks.unwrap_or(config.ticks);

    let loader = YamlLoader::new(registry);
    let mut cache = BehaviorCache::new();
    for tree in &config.trees {
        cache
            .load_file(&loader, tree)
            .with_context(|| format!("Failed to load tree {}", tree.display()))?;
    }

    let mut zone = Zone::new(ZoneId(0));
    for entry in &config.agents {
        let behavior: Arc<_> = cache.get(&entry.behavior).with_context(|| {
            format!(
                "Entity {} uses unknown behavior {:?}",
                entry.entity, entry.behavior
            )
        })?;
        let mut agent = Agent::new(entry.entity);
        agent.set_behavior(behavior);
        agent.set_selection(entry.selection.clone());
        agent.set_paused(entry.paused);
        if config.trace {
            agent.enable_trace();
        }
        zone.add_agent(agent);
    }

    tracing::info!(
        agents = zone.len(),
        trees = cache.len(),
        ticks,
        tick_ms = config.tick_ms,
        "Starting simulation"
    );
    let elapsed = Duration::from_millis(config.tick_ms);
    for _ in 0..ticks {
        zone.update(elapsed);
    }

    println!("entity\tbehavior\tstatus\tticks");
    for agent in zone.agents() {
        let behavior = agent.behavior().map_or("-", |b| b.name());
        println!(
            "{}\t{}\t{:?}\t{}",
            agent.entity(),
            behavior,
            agent.status(),
            agent.ticks()
        );
    }

    if config.trace {
        for agent in zone.agents() {
            if let Some(trace) = agent.trace() {
                let json = serde_json::to_string(trace)?;
                println!("{}\t{}", agent.entity(), json);
            }
        }
    }
    Ok(())
}

fn check(registry: &Registry, trees: &[PathBuf]) -> Result<()> {
    let loader = YamlLoader::new(registry);
    for path in trees {
        let root = loader
            .load_file(path)
            .with_context(|| format!("Failed to load tree {}", path.display()))?;
        println!("{} ({} nodes)", path.display(), root.node_count());
        print!("{}", root.render());
    }
    Ok(())
}

fn show_types(registry: &Registry) {
    println!("nodes:      {}", registry.node_types().join(", "));
    println!("conditions: {}", registry.condition_types().join(", "));
    println!("filters:    {}", registry.filter_types().join(", "));
}
