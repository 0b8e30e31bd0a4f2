//! CLI glue for jenkins-scm: command parsing and the two user-visible commands.
//!
//! All codec logic (element tree, trust tables, source codecs) lives in
//! `jenkins-scm-core`; this module only wires files to it.
//!
//! ## Features
//! - [`Cli`] defines the subcommands: `encode --config <yaml>` and `decode --file <xml>`.
//! - [`execute`] runs a command and returns its output, so tests can drive it without the binary.
//! - [`run`] prints that output; `main` installs the tracing subscriber first.
//!
//! ## Extending
//! Add new subcommands to [`Commands`] and keep the translation itself in `jenkins-scm-core`.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use jenkins_scm_core::{trust, ScmSource};

use crate::load_config::load_config;

/// CLI for jenkins-scm: translate SCM source definitions to and from Jenkins XML.
#[derive(Parser)]
#[clap(
    name = "jenkins-scm",
    version,
    about = "Translate Git/GitHub/GitLab source definitions to and from Jenkins multibranch source XML"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the Jenkins <source> XML for every source in a config file
    Encode {
        /// Path to the YAML config file
        #[clap(long)]
        config: PathBuf,
    },
    /// Print a Jenkins <source> XML fragment as a YAML source definition
    Decode {
        /// Path to the XML fragment
        #[clap(long)]
        file: PathBuf,
    },
}

/// Extracted CLI logic entrypoint for integration tests and main()
pub fn run(cli: Cli) -> Result<()> {
    let output = execute(&cli.command)?;
    print!("{output}");
    Ok(())
}

/// Runs a command and returns what it would print.
pub fn execute(command: &Commands) -> Result<String> {
    // Emit a top-level 'trace_initialised' event at the very start
    tracing::info!("trace_initialised");
    trust::verify_tables();

    match command {
        Commands::Encode { config } => {
            let config = load_config(config)?;
            let mut output = String::new();
            for source in &config.sources {
                tracing::debug!(kind = %source.kind(), scm_id = source.scm_id(), "Encoding source");
                output.push_str(&source.encode().to_string());
            }
            tracing::info!(sources_count = config.sources.len(), "Encoded sources");
            Ok(output)
        }
        Commands::Decode { file } => {
            let fragment = fs::read_to_string(file)
                .with_context(|| format!("Failed to read XML fragment {:?}", file))?;
            let source = ScmSource::from_xml(&fragment)
                .with_context(|| format!("Failed to decode SCM source from {:?}", file))?;
            tracing::info!(kind = %source.kind(), scm_id = source.scm_id(), "Decoded source");
            serde_yaml::to_string(&source).context("Failed to render source as YAML")
        }
    }
}
