#![doc = "jenkins-scm-core: codec between typed SCM sources and Jenkins source XML."]

//! This crate translates Git, GitHub and GitLab source settings into the
//! `<source>` element that the Jenkins branch-source plugins persist in a
//! multibranch job's `config.xml`, and reads that element back.
//!
//! It does not talk to Jenkins. Callers assemble the surrounding job document
//! and transport it; this crate only owns the `<source>` sub-tree.
//!
//! # Usage
//! - Build a [`GitSource`], [`GithubSource`] or [`GitlabSource`] and call
//!   [`SourceCodec::encode`], or wrap it in [`ScmSource`].
//! - Decode with [`SourceCodec::decode`] when the kind is known, or
//!   [`ScmSource::decode`] / [`ScmSource::from_xml`] to dispatch on the root
//!   `class` attribute.

pub mod clone_option;
pub mod error;
pub mod git;
pub mod github;
pub mod gitlab;
pub mod source;
pub mod traits;
pub mod trust;
pub mod xml;

pub use clone_option::CloneOption;
pub use error::DecodeError;
pub use git::GitSource;
pub use github::GithubSource;
pub use gitlab::GitlabSource;
pub use source::{append_source, ScmSource, SourceCodec, SourceKind};
pub use traits::DiscoverPrFromForks;
pub use trust::{GitHubForkTrust, GitLabForkTrust, TrustLookup, TrustTable};
pub use xml::Element;
