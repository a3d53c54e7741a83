//! CLI entry point for GraphLens.
//!
//! Graphs come in as JSON on stdin and results go out as JSON on stdout.
//! Logs are written to stderr.

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use graphlens_cli::{filter_report, serve, ToolServer};
use graphlens_core::{Graph, LensConfig, VisualizationType};
use graphlens_filter::{FilterState, Preset};
use graphlens_store::queries::run_query;
use graphlens_store::records::graph_from_value;
use graphlens_store::{GraphQuery, MemoryGraphStore, QueryStats};

#[derive(Parser)]
#[command(name = "graphlens")]
#[command(about = "Filter, query and store entity-relationship graphs")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file prefix (default: graphlens).
    #[arg(short, long, default_value = "graphlens", global = true)]
    config: String,
}

#[derive(Subcommand)]
enum Command {
    /// Serve graph tools over line-delimited JSON on stdin/stdout.
    Serve,
    /// Run a single query against a graph (reads JSON from stdin).
    Query {
        #[arg(long)]
        entity_id: Option<String>,
        #[arg(long)]
        entity_type: Option<String>,
        #[arg(long)]
        relationship_type: Option<String>,
        /// Restrict to these nodes (repeatable).
        #[arg(long = "node-id")]
        node_ids: Vec<String>,
    },
    /// Filter a graph with a saved filter state (reads JSON from stdin).
    Filter {
        /// Saved filter state file.
        #[arg(long)]
        state: Option<std::path::PathBuf>,
        /// Quick view applied after the state: processes, teams, pain-solutions, all.
        #[arg(long)]
        preset: Option<Preset>,
    },
    /// List the visualization types.
    Types,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve => {
            let config = LensConfig::load(&cli.config)?;
            tracing::info!(base_url = %config.base_url, "GraphLens tool server running on stdio");

            let server = ToolServer::new(MemoryGraphStore::new(), config);
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            serve(&server, stdin, tokio::io::stdout()).await?;
        }
        Command::Query {
            entity_id,
            entity_type,
            relationship_type,
            node_ids,
        } => {
            let graph = read_graph()?;
            let query = GraphQuery {
                entity_id,
                entity_type,
                relationship_type,
                node_ids: (!node_ids.is_empty()).then_some(node_ids),
            };
            let result = run_query(&graph, &query);
            let output = serde_json::json!({
                "query": query,
                "resultStats": QueryStats::of(&result),
                "result": result,
            });
            println!("{}", serde_json::to_string(&output)?);
        }
        Command::Filter { state, preset } => {
            let graph = read_graph()?;
            let state = match state {
                Some(path) => serde_json::from_str::<FilterState>(&std::fs::read_to_string(path)?)?,
                None => FilterState::default(),
            };
            let report = filter_report(graph, state, preset)
                .ok_or_else(|| anyhow::anyhow!("no filtered graph produced"))?;
            println!("{}", serde_json::to_string(&report)?);
        }
        Command::Types => {
            let output = serde_json::json!({ "visualizations": VisualizationType::catalogue() });
            println!("{}", serde_json::to_string(&output)?);
        }
    }

    Ok(())
}

fn read_graph() -> anyhow::Result<Graph> {
    let input = std::io::read_to_string(std::io::stdin())?;
    Ok(graph_from_value(serde_json::from_str(&input)?)?)
}
