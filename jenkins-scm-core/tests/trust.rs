use jenkins_scm_core::trust::{table_is_consistent, verify_tables};
use jenkins_scm_core::{GitHubForkTrust, GitLabForkTrust, TrustLookup, TrustTable};

#[test]
fn every_valid_ordinal_round_trips_through_its_suffix() {
    for ordinal in 1..=4 {
        let github = GitHubForkTrust::from_ordinal(ordinal).expect("valid GitHub ordinal");
        assert_eq!(
            GitHubForkTrust::parse_suffix(github.class_suffix()),
            TrustLookup::Known(github)
        );
        assert_eq!(github.ordinal(), ordinal);

        let gitlab = GitLabForkTrust::from_ordinal(ordinal).expect("valid GitLab ordinal");
        assert_eq!(
            GitLabForkTrust::parse_suffix(gitlab.class_suffix()),
            TrustLookup::Known(gitlab)
        );
        assert_eq!(gitlab.ordinal(), ordinal);
    }
}

#[test]
fn suffix_tables_match_the_plugins() {
    let github: Vec<_> = (1..=4)
        .filter_map(GitHubForkTrust::from_ordinal)
        .map(|t| t.class_suffix())
        .collect();
    assert_eq!(
        github,
        vec!["TrustContributors", "TrustEveryone", "TrustPermission", "TrustNobody"]
    );

    let gitlab: Vec<_> = (1..=4)
        .filter_map(GitLabForkTrust::from_ordinal)
        .map(|t| t.class_suffix())
        .collect();
    assert_eq!(
        gitlab,
        vec!["TrustMembers", "TrustEveryone", "TrustPermission", "TrustNobody"]
    );
}

#[test]
fn out_of_range_ordinals_are_invalid() {
    for ordinal in [0, 5, 99, u32::MAX] {
        assert!(!GitHubForkTrust::is_valid(ordinal), "github {ordinal}");
        assert!(!GitLabForkTrust::is_valid(ordinal), "gitlab {ordinal}");
        assert_eq!(GitHubForkTrust::from_ordinal(ordinal), None);
    }
}

#[test]
fn reverse_lookup_is_exact_and_per_table() {
    assert_eq!(
        GitLabForkTrust::parse_suffix("trustmembers"),
        TrustLookup::Unknown("trustmembers".to_string())
    );
    assert_eq!(
        GitHubForkTrust::parse_suffix("TrustMembers"),
        TrustLookup::Unknown("TrustMembers".to_string())
    );
    assert_eq!(
        GitLabForkTrust::parse_suffix("TrustContributors").known(),
        None
    );
    assert_eq!(GitLabForkTrust::parse_suffix("").known(), None);
}

#[test]
fn display_uses_the_human_readable_name() {
    assert_eq!(GitHubForkTrust::Contributors.to_string(), "Collaborators");
    assert_eq!(GitLabForkTrust::Members.to_string(), "Members");
    assert_eq!(GitLabForkTrust::Nobody.display_name(), "Nobody");
}

#[test]
fn tables_are_consistent() {
    assert!(table_is_consistent::<GitHubForkTrust>());
    assert!(table_is_consistent::<GitLabForkTrust>());
    assert!(verify_tables());
}
