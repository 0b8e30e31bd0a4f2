//! Source kinds and the codec seam shared by all of them.
//!
//! # Major Types
//! - [`SourceCodec`]: implemented by [`GitSource`], [`GithubSource`] and [`GitlabSource`]
//! - [`ScmSource`]: tagged union used by configuration and by decoders that do
//!   not know the source kind up front
//!
//! # Dispatch
//! Decoding an unknown fragment reads the root `class` attribute and picks the
//! codec whose `CLASS` matches. Encoding is always kind-directed.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::DecodeError;
use crate::git::{GitSource, GIT_SOURCE_CLASS};
use crate::github::{GithubSource, GITHUB_SOURCE_CLASS};
use crate::gitlab::{GitlabSource, GITLAB_SOURCE_CLASS};
use crate::xml::Element;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Git,
    Github,
    Gitlab,
}

impl SourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceKind::Git => "git",
            SourceKind::Github => "github",
            SourceKind::Gitlab => "gitlab",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encode/decode pair for one source kind.
pub trait SourceCodec: Sized {
    /// Implementation class written to the root `class` attribute.
    const CLASS: &'static str;
    /// Plugin name written to the root `plugin` attribute.
    const PLUGIN: &'static str;
    const KIND: SourceKind;

    /// Writes discriminator attributes, identity fields and `<traits>` into `source`.
    fn encode_into(&self, source: &mut Element);

    /// Reads a source back. Missing optional elements decode to zero values.
    fn decode(source: &Element) -> Result<Self, DecodeError>;

    /// Encodes into a fresh `<source>` element.
    fn encode(&self) -> Element {
        let mut source = Element::new("source");
        self.encode_into(&mut source);
        source
    }
}

/// Encodes `source` into `element`, or logs and leaves `element` untouched if there is none.
///
/// Callers are expected to invoke this only when a source of kind `S` is configured.
pub fn append_source<S: SourceCodec>(source: Option<&S>, element: &mut Element) {
    match source {
        Some(source) => source.encode_into(element),
        None => warn!(
            kind = %S::KIND,
            "Please provide a {} source when the source type is {}",
            S::KIND,
            S::KIND
        ),
    }
}

/// Any supported source, tagged by `type` in configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ScmSource {
    Git(GitSource),
    Github(GithubSource),
    Gitlab(GitlabSource),
}

impl ScmSource {
    pub fn kind(&self) -> SourceKind {
        match self {
            ScmSource::Git(_) => SourceKind::Git,
            ScmSource::Github(_) => SourceKind::Github,
            ScmSource::Gitlab(_) => SourceKind::Gitlab,
        }
    }

    pub fn scm_id(&self) -> &str {
        match self {
            ScmSource::Git(s) => &s.scm_id,
            ScmSource::Github(s) => &s.scm_id,
            ScmSource::Gitlab(s) => &s.scm_id,
        }
    }

    pub fn encode(&self) -> Element {
        match self {
            ScmSource::Git(s) => s.encode(),
            ScmSource::Github(s) => s.encode(),
            ScmSource::Gitlab(s) => s.encode(),
        }
    }

    /// Decodes a `<source>` element, choosing the codec from its `class` attribute.
    pub fn decode(source: &Element) -> Result<Self, DecodeError> {
        let class = source.select_attr("class").unwrap_or_default();
        let decoded = match class {
            GIT_SOURCE_CLASS => ScmSource::Git(GitSource::decode(source)?),
            GITHUB_SOURCE_CLASS => ScmSource::Github(GithubSource::decode(source)?),
            GITLAB_SOURCE_CLASS => ScmSource::Gitlab(GitlabSource::decode(source)?),
            other => return Err(DecodeError::UnknownSourceClass(other.to_string())),
        };
        debug!(kind = %decoded.kind(), scm_id = decoded.scm_id(), "Decoded SCM source");
        Ok(decoded)
    }

    /// Parses an XML fragment and decodes its root element.
    pub fn from_xml(fragment: &str) -> Result<Self, DecodeError> {
        Self::decode(&Element::parse(fragment)?)
    }
}

impl From<GitSource> for ScmSource {
    fn from(source: GitSource) -> Self {
        ScmSource::Git(source)
    }
}

impl From<GithubSource> for ScmSource {
    fn from(source: GithubSource) -> Self {
        ScmSource::Github(source)
    }
}

impl From<GitlabSource> for ScmSource {
    fn from(source: GitlabSource) -> Self {
        ScmSource::Gitlab(source)
    }
}

pub(crate) fn child_text(parent: &Element, name: &str) -> Option<String> {
    parent.select_element(name).map(|e| e.text().to_string())
}
