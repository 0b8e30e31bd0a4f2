//! GitHub branch source (`org.jenkinsci.plugins.github_branch_source.GitHubSCMSource`).
//!
//! Trait element names use the plugin's XStream alias, where `_` in the
//! package is doubled (`github__branch__source`); the trust inner class keeps
//! the real package name.

use serde::{Deserialize, Serialize};

use crate::clone_option::{self, CloneOption, CLONE_OPTION_TRAIT};
use crate::error::DecodeError;
use crate::source::{child_text, SourceCodec, SourceKind};
use crate::traits::{self, TraitBuild, DiscoverPrFromForks, TraitDescriptor, REGEX_FILTER_TRAIT};
use crate::trust::GitHubForkTrust;
use crate::xml::Element;

pub const GITHUB_SOURCE_CLASS: &str = "org.jenkinsci.plugins.github_branch_source.GitHubSCMSource";
pub const GITHUB_PLUGIN: &str = "github-branch-source";

pub const BRANCH_DISCOVERY_TRAIT: &str =
    "org.jenkinsci.plugins.github__branch__source.BranchDiscoveryTrait";
pub const ORIGIN_PR_DISCOVERY_TRAIT: &str =
    "org.jenkinsci.plugins.github__branch__source.OriginPullRequestDiscoveryTrait";
pub const FORK_PR_DISCOVERY_TRAIT: &str =
    "org.jenkinsci.plugins.github__branch__source.ForkPullRequestDiscoveryTrait";
pub const TAG_DISCOVERY_TRAIT: &str =
    "org.jenkinsci.plugins.github__branch__source.TagDiscoveryTrait";
pub const SKIP_NOTIFICATIONS_TRAIT: &str =
    "org.jenkinsci.plugins.github.notifications.NotificationsSkipTrait";
const SKIP_NOTIFICATIONS_PLUGIN: &str = "skip-notifications-trait";

pub const FORK_TRUST_CLASS_PREFIX: &str =
    "org.jenkinsci.plugins.github_branch_source.ForkPullRequestDiscoveryTrait";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubSource {
    #[serde(default)]
    pub scm_id: String,
    #[serde(default)]
    pub credential_id: String,
    pub owner: String,
    pub repo: String,
    #[serde(default)]
    pub api_uri: Option<String>,
    /// Branch discovery strategy; 0 disables the trait.
    #[serde(default)]
    pub discover_branches: u32,
    /// Origin pull request discovery strategy; 0 disables the trait.
    #[serde(default)]
    pub discover_pr_from_origin: u32,
    #[serde(default)]
    pub discover_pr_from_forks: Option<DiscoverPrFromForks>,
    #[serde(default)]
    pub discover_tags: bool,
    #[serde(default)]
    pub clone_option: Option<CloneOption>,
    #[serde(default)]
    pub regex_filter: Option<String>,
    #[serde(default)]
    pub accept_jenkins_notification: bool,
}

const GITHUB_TRAITS: &[TraitDescriptor<GithubSource>] = &[
    TraitDescriptor {
        element: BRANCH_DISCOVERY_TRAIT,
        applies: |s| s.discover_branches != 0,
        build: TraitBuild::Fill(|s, e| traits::write_strategy_id(e, s.discover_branches)),
    },
    TraitDescriptor {
        element: ORIGIN_PR_DISCOVERY_TRAIT,
        applies: |s| s.discover_pr_from_origin != 0,
        build: TraitBuild::Fill(|s, e| traits::write_strategy_id(e, s.discover_pr_from_origin)),
    },
    TraitDescriptor {
        element: FORK_PR_DISCOVERY_TRAIT,
        applies: |s| s.discover_pr_from_forks.is_some(),
        build: TraitBuild::Fill(|s, e| {
            if let Some(forks) = &s.discover_pr_from_forks {
                traits::write_fork_discovery::<GitHubForkTrust>(forks, FORK_TRUST_CLASS_PREFIX, e);
            }
        }),
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
    TraitDescriptor {
        element: SKIP_NOTIFICATIONS_TRAIT,
        applies: |s| !s.accept_jenkins_notification,
        build: TraitBuild::Fill(|_, e| {
            e.create_attr("plugin", SKIP_NOTIFICATIONS_PLUGIN);
        }),
    },
];

impl SourceCodec for GithubSource {
    const CLASS: &'static str = GITHUB_SOURCE_CLASS;
    const PLUGIN: &'static str = GITHUB_PLUGIN;
    const KIND: SourceKind = SourceKind::Github;

    fn encode_into(&self, source: &mut Element) {
        source.create_attr("class", Self::CLASS);
        source.create_attr("plugin", Self::PLUGIN);
        source.create_element("id").set_text(&self.scm_id);
        source.create_element("credentialsId").set_text(&self.credential_id);
        source.create_element("repoOwner").set_text(&self.owner);
        source.create_element("repository").set_text(&self.repo);
        if let Some(api_uri) = self.api_uri.as_deref().filter(|u| !u.is_empty()) {
            source.create_element("apiUri").set_text(api_uri);
        }
        traits::append_traits(self, GITHUB_TRAITS, source);
    }

    fn decode(source: &Element) -> Result<Self, DecodeError> {
        let list = source.select_element("traits");
        Ok(GithubSource {
            scm_id: child_text(source, "id").unwrap_or_default(),
            credential_id: child_text(source, "credentialsId").unwrap_or_default(),
            owner: child_text(source, "repoOwner").unwrap_or_default(),
            repo: child_text(source, "repository").unwrap_or_default(),
            api_uri: child_text(source, "apiUri"),
            discover_branches: traits::parse_strategy(list, BRANCH_DISCOVERY_TRAIT)?,
            discover_pr_from_origin: traits::parse_strategy(list, ORIGIN_PR_DISCOVERY_TRAIT)?,
            discover_pr_from_forks: traits::parse_fork_discovery::<GitHubForkTrust>(
                list,
                FORK_PR_DISCOVERY_TRAIT,
            )?,
            discover_tags: traits::has_trait(list, TAG_DISCOVERY_TRAIT),
            clone_option: clone_option::parse_clone_option(list)?,
            regex_filter: traits::parse_regex_filter(list),
            accept_jenkins_notification: !traits::has_trait(list, SKIP_NOTIFICATIONS_TRAIT),
        })
    }
}
