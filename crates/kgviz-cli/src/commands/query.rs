//! Ad-hoc query command.

use anyhow::Result;
use colored::Colorize;

use kgviz_graph::{GraphConfig, SubgraphFetcher};

pub async fn execute(cypher: &str, config: &GraphConfig) -> Result<()> {
    let fetcher = SubgraphFetcher::new(config.clone());
    let graph = fetcher.fetch(cypher).await?;

    if graph.nodes.is_empty() && graph.edges.is_empty() {
        println!("{}", "No results.".dimmed());
        return Ok(());
    }

    println!(
        "{} nodes, {} edges",
        graph.nodes.len().to_string().cyan().bold(),
        graph.edges.len().to_string().cyan().bold()
    );

    for node in &graph.nodes {
        println!(
            "  {} [{}] {}",
            "•".dimmed(),
            node.labels.join(":").cyan(),
            serde_json::to_string(&node.properties)?
        );
    }
    for edge in &graph.edges {
        println!(
            "  {} ({})-[:{}]->({})",
            "→".dimmed(),
            edge.from,
            edge.rel_type.yellow(),
            edge.to
        );
    }

    Ok(())
}
