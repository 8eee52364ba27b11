//! CLI entrypoint for the launch dashboard.

#[path = "launch-dash/cli.rs"]
mod cli;
#[path = "launch-dash/style.rs"]
mod style;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use cli::{Cli, Command};
use launch_dash::config::{ConfigOverrides, DashConfig};
use launch_dash::summary::DatasetSummary;
use launch_dash::web::start_web_server;
use launch_dash::{DashContext, LaunchTable};

fn main() -> anyhow::Result<()> {
    if let Err(err) = run() {
        eprintln!("{}", style::error(&format!("Error: {err:#}")));
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let overrides = ConfigOverrides {
        dataset: cli.data.clone(),
        listen: cli.listen.clone(),
        log_level: cli.verbose.then(|| "debug".to_string()),
    };
    let config = DashConfig::resolve(cli.config.as_deref(), overrides)?;
    init_tracing(&config.log_level)?;

    let table = LaunchTable::load(&config.dataset)
        .with_context(|| format!("failed to load dataset {}", config.dataset.display()))?;
    let summary = DatasetSummary::from_table(&table);
    print!("{}", summary.render_site_counts());

    match cli.command.unwrap_or(Command::Serve) {
        Command::Summary => {
            println!();
            print!("{}", summary.render_class_site_counts());
            Ok(())
        }
        Command::Serve => serve(&config, table, &summary),
    }
}

fn serve(config: &DashConfig, table: LaunchTable, summary: &DatasetSummary) -> anyhow::Result<()> {
    let ctx = Arc::new(DashContext::new(table)?);
    println!();
    print!("{}", summary.render_class_site_counts());
    let server = start_web_server(&config.web, Arc::clone(&ctx))?;
    println!();
    println!(
        "{} {}",
        style::banner("Dashboard running on"),
        style::url(&format_web_url(&server.listen))
    );
    info!(records = ctx.table().len(), "serving launch dashboard");
    server.join()?;
    Ok(())
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let level = level
        .parse::<tracing::Level>()
        .with_context(|| format!("invalid log level '{level}'"))?;
    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn format_web_url(listen: &str) -> String {
    let (host, port) = listen.rsplit_once(':').unwrap_or((listen, "8050"));
    let host = if host == "0.0.0.0" { "localhost" } else { host };
    format!("http://{host}:{port}/")
}
