//! Web server command.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use kgviz_core::ViewSettings;
use kgviz_graph::GraphConfig;
use kgviz_web::AppState;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, default_value = "3030")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path (implies --log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

pub async fn execute(args: ServeArgs, config: &GraphConfig) -> Result<()> {
    let settings = ViewSettings {
        endpoint_url: config.uri.clone(),
        username: config.user.clone(),
        password: config.password.clone(),
        ..ViewSettings::default()
    };

    let state = AppState::new(settings, config.clone());

    println!();
    println!("  {} {}", "KGViz".cyan().bold(), "Web Server".bold());
    println!();
    println!(
        "  {}  http://{}:{}",
        "View".green(),
        args.host,
        args.port
    );
    println!(
        "  {}   http://{}:{}/api",
        "API".green(),
        args.host,
        args.port
    );
    println!(
        "  {}    ws://{}:{}/ws",
        "WS".green(),
        args.host,
        args.port
    );
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    kgviz_web::run_server(state, &args.host, args.port).await?;

    Ok(())
}
