//! `load_config` module: reads a YAML file of SCM source definitions into a [`Config`].
//!
//! This is the only place where untrusted YAML is parsed into the typed sources of
//! `jenkins-scm-core`.
//!
//! # Responsibilities
//! - Parse the YAML file into `Config`, with each entry tagged by `type` (`git`, `github`, `gitlab`)
//! - Reject sources the codec would encode into unusable Jenkins configuration:
//!   a missing url, owner or repo, a regex filter that does not compile, or a fork
//!   trust ordinal outside the table of the source kind
//! - Name the offending source by kind and position in every error
//!
//! # Extension Guidance
//! - To add a new source kind:
//!   1. Add the codec and its `ScmSource` variant in `jenkins-scm-core`
//!   2. Add a match arm to [`validate_source`] with the kind's required fields
//!
//! # Errors
//! All errors use `anyhow::Error` with context and are surfaced at the CLI boundary.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::{error, info};

use jenkins_scm_core::{
    DiscoverPrFromForks, GitHubForkTrust, GitLabForkTrust, ScmSource, TrustTable,
};

use crate::config::Config;

/// Loads a YAML file of source definitions and checks each one before it reaches the codec.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!("Failed to read config file {:?}: {}", path_ref, e));
        }
    };

    let config: Config = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    for (index, source) in config.sources.iter().enumerate() {
        validate_source(source).with_context(|| {
            format!(
                "Invalid {} source #{} ({:?}) in {:?}",
                source.kind(),
                index + 1,
                source.scm_id(),
                path_ref
            )
        })?;
    }

    config.trace_loaded();
    Ok(config)
}

/// Rejects definitions the codec would encode into a configuration Jenkins cannot use.
pub fn validate_source(source: &ScmSource) -> Result<()> {
    match source {
        ScmSource::Git(git) => {
            require("url", &git.url)?;
            validate_regex(git.regex_filter.as_deref())
        }
        ScmSource::Github(github) => {
            require("owner", &github.owner)?;
            require("repo", &github.repo)?;
            validate_trust::<GitHubForkTrust>(github.discover_pr_from_forks.as_ref())?;
            validate_regex(github.regex_filter.as_deref())
        }
        ScmSource::Gitlab(gitlab) => {
            require("owner", &gitlab.owner)?;
            require("repo", &gitlab.repo)?;
            validate_trust::<GitLabForkTrust>(gitlab.discover_pr_from_forks.as_ref())?;
            validate_regex(gitlab.regex_filter.as_deref())
        }
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        error!(field, "Required source field is empty");
        anyhow::bail!("`{field}` must not be empty");
    }
    Ok(())
}

fn validate_regex(filter: Option<&str>) -> Result<()> {
    match filter.filter(|f| !f.is_empty()) {
        Some(filter) => Regex::new(filter)
            .map(|_| ())
            .with_context(|| format!("`regex_filter` {filter:?} is not a valid regular expression")),
        None => Ok(()),
    }
}

fn validate_trust<T: TrustTable>(forks: Option<&DiscoverPrFromForks>) -> Result<()> {
    match forks {
        Some(forks) if !T::is_valid(forks.trust) => {
            error!(table = T::TABLE, trust = forks.trust, "Unknown fork trust value");
            anyhow::bail!(
                "`discover_pr_from_forks.trust` {} is not a valid {} trust value (expected 1-4)",
                forks.trust,
                T::TABLE
            );
        }
        _ => Ok(()),
    }
}
