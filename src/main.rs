use anyhow::Result;
use clap::Parser;
use jenkins_scm::cli::{run, Cli};

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays a clean XML/YAML document.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    tracing::info!("CLI application startup: tracing initialised");

    let cli = Cli::parse();
    tracing::info!("CLI arguments parsed, invoking run");
    let result = run(cli);
    match &result {
        Ok(_) => tracing::info!("CLI completed successfully"),
        Err(e) => tracing::error!(error = %e, "CLI exited with error"),
    }
    result
}
