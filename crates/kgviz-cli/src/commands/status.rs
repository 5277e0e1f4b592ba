//! Graph status command.

use anyhow::Result;
use colored::Colorize;

use kgviz_graph::{GraphClient, GraphConfig};

pub async fn execute(config: &GraphConfig) -> Result<()> {
    let client = GraphClient::connect(config).await?;

    println!("{}", "Knowledge Graph Status".bold());
    println!("{}", "─".repeat(40));

    let counts = client.get_counts().await?;
    println!("  Nodes:         {}", counts.nodes.to_string().cyan());
    println!("  Relationships: {}", counts.relationships.to_string().cyan());

    println!("{}", "─".repeat(40));

    Ok(())
}
