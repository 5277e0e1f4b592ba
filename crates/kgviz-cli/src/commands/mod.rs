//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use kgviz_graph::GraphConfig;

pub mod analyze;
pub mod init;
pub mod load;
pub mod query;
pub mod serve;
pub mod status;

/// Knowledge Graph Visualization - build and explore a research-projects graph
#[derive(Parser)]
#[command(name = "kgviz")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Graph database connection settings, shared by every command.
#[derive(Args, Clone)]
pub struct ConnectionArgs {
    /// Bolt endpoint of the graph database
    #[arg(long, global = true, env = "NEO4J_URI", default_value = "bolt://localhost:7687")]
    pub uri: String,

    /// HTTP transactional endpoint of the graph database
    #[arg(long, global = true, env = "NEO4J_HTTP_URI", default_value = "http://localhost:7474")]
    pub http_uri: String,

    /// Database user
    #[arg(long, global = true, env = "NEO4J_USER", default_value = "neo4j")]
    pub user: String,

    /// Database password
    #[arg(long, global = true, env = "NEO4J_PASSWORD", default_value = "kgviz_dev_2026")]
    pub password: String,

    /// Database name
    #[arg(long, global = true, env = "NEO4J_DATABASE", default_value = "neo4j")]
    pub database: String,
}

impl ConnectionArgs {
    pub fn graph_config(&self) -> GraphConfig {
        GraphConfig {
            uri: self.uri.clone(),
            http_uri: self.http_uri.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
            database: self.database.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create uniqueness constraints on the graph schema
    Init,

    /// Load the prepared CSV exports into the graph
    Load(load::LoadArgs),

    /// Run similarity, pagerank and community detection
    Analyze(analyze::AnalyzeArgs),

    /// Start the visualization web server
    Serve(serve::ServeArgs),

    /// Show node and relationship counts
    Status,

    /// Run an ad-hoc Cypher query and print the subgraph it touches
    Query {
        /// Cypher query string
        cypher: String,
    },
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = self.connection.graph_config();

        match self.command {
            Commands::Init => init::execute(&config).await,
            Commands::Load(args) => load::execute(args, &config).await,
            Commands::Analyze(args) => analyze::execute(args, &config).await,
            Commands::Serve(args) => serve::execute(args, &config).await,
            Commands::Status => status::execute(&config).await,
            Commands::Query { cypher } => query::execute(&cypher, &config).await,
        }
    }
}
