//! Fork pull/merge-request trust levels.
//!
//! Both branch-source plugins serialise the trust policy of a fork discovery
//! trait as an inner class of the trait, e.g.
//! `...ForkPullRequestDiscoveryTrait$TrustContributors`. The suffix after `$`
//! is what these tables map to and from. GitHub and GitLab use different
//! suffixes for ordinal 1, so callers must pick the table that matches the
//! source kind they are processing.

use std::collections::HashSet;
use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::error;

/// Result of looking a class suffix up in a trust table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrustLookup<T> {
    Known(T),
    Unknown(String),
}

impl<T: Copy> TrustLookup<T> {
    pub fn known(&self) -> Option<T> {
        match self {
            TrustLookup::Known(t) => Some(*t),
            TrustLookup::Unknown(_) => None,
        }
    }
}

/// A closed trust table: ordinal, display name and class suffix per entry.
pub trait TrustTable: Copy + Eq + fmt::Debug + 'static {
    /// `(value, ordinal, display name, class suffix)` rows.
    const ROWS: &'static [(Self, u32, &'static str, &'static str)];

    /// Name used in diagnostics.
    const TABLE: &'static str;

    fn from_ordinal(ordinal: u32) -> Option<Self> {
        Self::ROWS
            .iter()
            .find(|row| row.1 == ordinal)
            .map(|row| row.0)
    }

    fn is_valid(ordinal: u32) -> bool {
        Self::from_ordinal(ordinal).is_some()
    }

    fn ordinal(self) -> u32 {
        self.row().1
    }

    fn display_name(self) -> &'static str {
        self.row().2
    }

    fn class_suffix(self) -> &'static str {
        self.row().3
    }

    /// Exact, case-sensitive reverse lookup of a class suffix.
    fn parse_suffix(suffix: &str) -> TrustLookup<Self> {
        match Self::ROWS.iter().find(|row| row.3 == suffix) {
            Some(row) => TrustLookup::Known(row.0),
            None => TrustLookup::Unknown(suffix.to_string()),
        }
    }

    #[doc(hidden)]
    fn row(self) -> &'static (Self, u32, &'static str, &'static str) {
        // Every variant has exactly one row; `table_is_consistent` checks it.
        Self::ROWS
            .iter()
            .find(|row| row.0 == self)
            .unwrap_or(&Self::ROWS[0])
    }
}

/// Checks that ordinals and suffixes in a table are unique.
pub fn table_is_consistent<T: TrustTable>() -> bool {
    let mut ordinals = HashSet::new();
    let mut suffixes = HashSet::new();
    let mut values = Vec::new();
    for (value, ordinal, _, suffix) in T::ROWS {
        if !ordinals.insert(*ordinal) || !suffixes.insert(*suffix) || values.contains(value) {
            return false;
        }
        values.push(*value);
    }
    true
}

static TABLES_CHECKED: OnceLock<bool> = OnceLock::new();

/// Verifies both trust tables once per process and logs if either is broken.
pub fn verify_tables() -> bool {
    *TABLES_CHECKED.get_or_init(|| {
        let github = table_is_consistent::<GitHubForkTrust>();
        let gitlab = table_is_consistent::<GitLabForkTrust>();
        if !github {
            error!(table = GitHubForkTrust::TABLE, "Trust table has duplicate entries");
        }
        if !gitlab {
            error!(table = GitLabForkTrust::TABLE, "Trust table has duplicate entries");
        }
        github && gitlab
    })
}

/// Who may have fork pull requests built with trusted Jenkinsfile and credentials (GitHub).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GitHubForkTrust {
    Contributors,
    Everyone,
    Permission,
    Nobody,
}

impl TrustTable for GitHubForkTrust {
    const ROWS: &'static [(Self, u32, &'static str, &'static str)] = &[
        (GitHubForkTrust::Contributors, 1, "Collaborators", "TrustContributors"),
        (GitHubForkTrust::Everyone, 2, "Everyone", "TrustEveryone"),
        (GitHubForkTrust::Permission, 3, "From users with Admin or Write permission", "TrustPermission"),
        (GitHubForkTrust::Nobody, 4, "Nobody", "TrustNobody"),
    ];
    const TABLE: &'static str = "github";
}

impl fmt::Display for GitHubForkTrust {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Who may have fork merge requests built with trusted Jenkinsfile and credentials (GitLab).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GitLabForkTrust {
    Members,
    Everyone,
    Permission,
    Nobody,
}

impl TrustTable for GitLabForkTrust {
    const ROWS: &'static [(Self, u32, &'static str, &'static str)] = &[
        (GitLabForkTrust::Members, 1, "Members", "TrustMembers"),
        (GitLabForkTrust::Everyone, 2, "Everyone", "TrustEveryone"),
        (GitLabForkTrust::Permission, 3, "Trusted Members", "TrustPermission"),
        (GitLabForkTrust::Nobody, 4, "Nobody", "TrustNobody"),
    ];
    const TABLE: &'static str = "gitlab";
}

impl fmt::Display for GitLabForkTrust {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
