//! jenkins-scm: command-line front end for `jenkins-scm-core`.
//!
//! Loads YAML source definitions, validates them and prints the Jenkins
//! `<source>` XML the branch-source plugins expect; or reads such a fragment
//! and prints it back as YAML.

pub mod cli;
pub mod config;
pub mod load_config;
