// jenkins-scm/src/config.rs

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use jenkins_scm_core::ScmSource;

/// Source definitions read from a YAML file.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sources: Vec<ScmSource>,
}

impl Config {
    pub fn trace_loaded(&self) {
        info!(sources_count = self.sources.len(), "Loaded Config");
        for source in &self.sources {
            info!(kind = %source.kind(), scm_id = source.scm_id(), "Loaded source");
        }
        debug!(?self, "Config loaded (full debug)");
    }
}
