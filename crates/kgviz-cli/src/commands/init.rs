//! Schema initialization command.

use anyhow::Result;
use colored::Colorize;

use kgviz_graph::{schema, GraphClient, GraphConfig};

pub async fn execute(config: &GraphConfig) -> Result<()> {
    let client = GraphClient::connect(config).await?;

    schema::initialize_schema(&client).await?;

    println!("{}", "Schema constraints in place.".green().bold());
    Ok(())
}
