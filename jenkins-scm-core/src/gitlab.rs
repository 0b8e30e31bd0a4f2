//! GitLab branch source (`io.jenkins.plugins.gitlabbranchsource.GitLabSCMSource`).

use serde::{Deserialize, Serialize};

use crate::clone_option::{self, CloneOption, CLONE_OPTION_TRAIT};
use crate::error::DecodeError;
use crate::source::{child_text, SourceCodec, SourceKind};
use crate::traits::{self, TraitBuild, DiscoverPrFromForks, TraitDescriptor, REGEX_FILTER_TRAIT};
use crate::trust::GitLabForkTrust;
use crate::xml::Element;

pub const GITLAB_SOURCE_CLASS: &str = "io.jenkins.plugins.gitlabbranchsource.GitLabSCMSource";
pub const GITLAB_PLUGIN: &str = "gitlab-branch-source";

pub const BRANCH_DISCOVERY_TRAIT: &str = "io.jenkins.plugins.gitlabbranchsource.BranchDiscoveryTrait";
pub const TAG_DISCOVERY_TRAIT: &str = "io.jenkins.plugins.gitlabbranchsource.TagDiscoveryTrait";
pub const ORIGIN_MR_DISCOVERY_TRAIT: &str =
    "io.jenkins.plugins.gitlabbranchsource.OriginMergeRequestDiscoveryTrait";
pub const FORK_MR_DISCOVERY_TRAIT: &str =
    "io.jenkins.plugins.gitlabbranchsource.ForkMergeRequestDiscoveryTrait";
pub const SKIP_NOTIFICATIONS_TRAIT: &str =
    "io.jenkins.plugins.gitlabbranchsource.GitLabSkipNotificationsTrait";

/// GitLab aliases need no `__` escaping, so the trust class shares the trait name.
pub const FORK_TRUST_CLASS_PREFIX: &str = FORK_MR_DISCOVERY_TRAIT;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitlabSource {
    #[serde(default)]
    pub scm_id: String,
    /// Name of the GitLab server as configured in Jenkins.
    #[serde(default)]
    pub server_name: String,
    #[serde(default)]
    pub credential_id: String,
    pub owner: String,
    /// Project path, e.g. `group/project`.
    pub repo: String,
    #[serde(default)]
    pub discover_branches: u32,
    #[serde(default)]
    pub discover_tags: bool,
    #[serde(default)]
    pub discover_pr_from_origin: u32,
    #[serde(default)]
    pub discover_pr_from_forks: Option<DiscoverPrFromForks>,
    #[serde(default)]
    pub clone_option: Option<CloneOption>,
    #[serde(default)]
    pub regex_filter: Option<String>,
    #[serde(default)]
    pub accept_jenkins_notification: bool,
}

const GITLAB_TRAITS: &[TraitDescriptor<GitlabSource>] = &[
    TraitDescriptor {
        element: BRANCH_DISCOVERY_TRAIT,
        applies: |s| s.discover_branches != 0,
        build: TraitBuild::Fill(|s, e| traits::write_strategy_id(e, s.discover_branches)),
    },
    TraitDescriptor {
        element: TAG_DISCOVERY_TRAIT,
        applies: |s| s.discover_tags,
        build: TraitBuild::Fill(traits::empty),
    },
    TraitDescriptor {
        element: ORIGIN_MR_DISCOVERY_TRAIT,
        applies: |s| s.discover_pr_from_origin != 0,
        build: TraitBuild::Fill(|s, e| traits::write_strategy_id(e, s.discover_pr_from_origin)),
    },
    TraitDescriptor {
        element: FORK_MR_DISCOVERY_TRAIT,
        applies: |s| s.discover_pr_from_forks.is_some(),
        build: TraitBuild::Fill(|s, e| {
            if let Some(forks) = &s.discover_pr_from_forks {
                traits::write_fork_discovery::<GitLabForkTrust>(forks, FORK_TRUST_CLASS_PREFIX, e);
            }
        }),
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
        build: TraitBuild::Fill(traits::empty),
    },
];

impl SourceCodec for GitlabSource {
    const CLASS: &'static str = GITLAB_SOURCE_CLASS;
    const PLUGIN: &'static str = GITLAB_PLUGIN;
    const KIND: SourceKind = SourceKind::Gitlab;

    fn encode_into(&self, source: &mut Element) {
        source.create_attr("class", Self::CLASS);
        source.create_attr("plugin", Self::PLUGIN);
        source.create_element("id").set_text(&self.scm_id);
        source.create_element("serverName").set_text(&self.server_name);
        source.create_element("credentialsId").set_text(&self.credential_id);
        source.create_element("projectOwner").set_text(&self.owner);
        source.create_element("projectPath").set_text(&self.repo);
        traits::append_traits(self, GITLAB_TRAITS, source);
    }

    fn decode(source: &Element) -> Result<Self, DecodeError> {
        let list = source.select_element("traits");
        Ok(GitlabSource {
            scm_id: child_text(source, "id").unwrap_or_default(),
            server_name: child_text(source, "serverName").unwrap_or_default(),
            credential_id: child_text(source, "credentialsId").unwrap_or_default(),
            owner: child_text(source, "projectOwner").unwrap_or_default(),
            repo: child_text(source, "projectPath").unwrap_or_default(),
            discover_branches: traits::parse_strategy(list, BRANCH_DISCOVERY_TRAIT)?,
            discover_tags: traits::has_trait(list, TAG_DISCOVERY_TRAIT),
            discover_pr_from_origin: traits::parse_strategy(list, ORIGIN_MR_DISCOVERY_TRAIT)?,
            discover_pr_from_forks: traits::parse_fork_discovery::<GitLabForkTrust>(
                list,
                FORK_MR_DISCOVERY_TRAIT,
            )?,
            clone_option: clone_option::parse_clone_option(list)?,
            regex_filter: traits::parse_regex_filter(list),
            accept_jenkins_notification: !traits::has_trait(list, SKIP_NOTIFICATIONS_TRAIT),
        })
    }
}
