//! Plain Git source (`jenkins.plugins.git.GitSCMSource`).

use serde::{Deserialize, Serialize};

use crate::clone_option::{self, CloneOption, CLONE_OPTION_TRAIT};
use crate::error::DecodeError;
use crate::source::{child_text, SourceCodec, SourceKind};
use crate::traits::{self, TraitBuild, TraitDescriptor, REGEX_FILTER_TRAIT};
use crate::xml::Element;

pub const GIT_SOURCE_CLASS: &str = "jenkins.plugins.git.GitSCMSource";
pub const GIT_PLUGIN: &str = "git";

pub const BRANCH_DISCOVERY_TRAIT: &str = "jenkins.plugins.git.traits.BranchDiscoveryTrait";
pub const TAG_DISCOVERY_TRAIT: &str = "jenkins.plugins.git.traits.TagDiscoveryTrait";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitSource {
    #[serde(default)]
    pub scm_id: String,
    pub url: String,
    #[serde(default)]
    pub credential_id: Option<String>,
    #[serde(default)]
    pub discover_branches: bool,
    #[serde(default)]
    pub discover_tags: bool,
    #[serde(default)]
    pub clone_option: Option<CloneOption>,
    #[serde(default)]
    pub regex_filter: Option<String>,
}

const GIT_TRAITS: &[TraitDescriptor<GitSource>] = &[
    TraitDescriptor {
        element: BRANCH_DISCOVERY_TRAIT,
        applies: |s| s.discover_branches,
        build: TraitBuild::Fill(traits::empty),
    },
    TraitDescriptor {
        element: TAG_DISCOVERY_TRAIT,
        applies: |s| s.discover_tags,
        build: TraitBuild::Fill(traits::empty),
    },
    TraitDescriptor {
        element: CLONE_OPTION_TRAIT,
        applies: |s| traits::has_clone_option(&s.clone_option),
        build: TraitBuild::Append(|s, t| {
            clone_option::append_clone_option(s.clone_option.as_ref(), t)
        }),
    },
    TraitDescriptor {
        element: REGEX_FILTER_TRAIT,
        applies: |s| traits::has_regex_filter(&s.regex_filter),
        build: TraitBuild::Fill(|s, e| traits::write_regex_filter(&s.regex_filter, e)),
    },
];

impl SourceCodec for GitSource {
    const CLASS: &'static str = GIT_SOURCE_CLASS;
    const PLUGIN: &'static str = GIT_PLUGIN;
    const KIND: SourceKind = SourceKind::Git;

    fn encode_into(&self, source: &mut Element) {
        source.create_attr("class", Self::CLASS);
        source.create_attr("plugin", Self::PLUGIN);
        source.create_element("id").set_text(&self.scm_id);
        source.create_element("remote").set_text(&self.url);
        if let Some(credential) = self.credential_id.as_deref().filter(|c| !c.is_empty()) {
            source.create_element("credentialsId").set_text(credential);
        }
        traits::append_traits(self, GIT_TRAITS, source);
    }

    fn decode(source: &Element) -> Result<Self, DecodeError> {
        let list = source.select_element("traits");
        Ok(GitSource {
            scm_id: child_text(source, "id").unwrap_or_default(),
            url: child_text(source, "remote").unwrap_or_default(),
            credential_id: child_text(source, "credentialsId"),
            discover_branches: traits::has_trait(list, BRANCH_DISCOVERY_TRAIT),
            discover_tags: traits::has_trait(list, TAG_DISCOVERY_TRAIT),
            clone_option: clone_option::parse_clone_option(list)?,
            regex_filter: traits::parse_regex_filter(list),
        })
    }
}
