use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::write;
use tempfile::NamedTempFile;

/// Creates a minimal config file with a single GitHub source.
fn create_minimal_config() -> NamedTempFile {
    let config = NamedTempFile::new().expect("Creating temp config file failed");
    write(
        config.path(),
        b"sources:\n  - type: github\n    scm_id: widgets\n    owner: acme\n    repo: widgets\n    discover_branches: 1\n    discover_tags: true\n    accept_jenkins_notification: false\n",
    )
    .expect("Writing temp config failed");
    config
}

#[test]
fn encode_prints_source_xml() {
    let config = create_minimal_config();
    let mut cmd = Command::cargo_bin("jenkins-scm").expect("Binary exists");

    cmd.arg("encode").arg("--config").arg(config.path());

    cmd.assert()
        .success()
        .stdout(
            predicate::str::contains(
                r#"<source class="org.jenkinsci.plugins.github_branch_source.GitHubSCMSource" plugin="github-branch-source">"#,
            )
            .and(predicate::str::contains("<repoOwner>acme</repoOwner>"))
            .and(predicate::str::contains(
                "<org.jenkinsci.plugins.github__branch__source.TagDiscoveryTrait/>",
            ))
            .and(predicate::str::contains(
                r#"<org.jenkinsci.plugins.github.notifications.NotificationsSkipTrait plugin="skip-notifications-trait"/>"#,
            )),
        );
}

#[test]
fn decode_prints_yaml() {
    let fragment = NamedTempFile::new().expect("temp file");
    write(
        fragment.path(),
        r#"<source class="jenkins.plugins.git.GitSCMSource" plugin="git">
  <id>tools</id>
  <remote>https://git.example.com/acme/tools.git</remote>
  <traits>
    <jenkins.plugins.git.traits.TagDiscoveryTrait/>
  </traits>
</source>"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("jenkins-scm").expect("Binary exists");
    cmd.arg("decode").arg("--file").arg(fragment.path());

    cmd.assert()
        .success()
        .stdout(
            predicate::str::contains("type: git")
                .and(predicate::str::contains("https://git.example.com/acme/tools.git"))
                .and(predicate::str::contains("discover_tags: true")),
        );
}

#[test]
fn encode_fails_on_invalid_config() {
    let config = NamedTempFile::new().expect("temp file");
    write(config.path(), b"sources:\n  - type: git\n    url: \"\"\n").unwrap();

    let mut cmd = Command::cargo_bin("jenkins-scm").expect("Binary exists");
    cmd.arg("encode").arg("--config").arg(config.path());

    cmd.assert().failure().stderr(predicate::str::contains("url"));
}

use std::sync::{Arc, Mutex};
use tracing_subscriber::prelude::*; // needed for .with()
use tracing_subscriber::{layer::Context, Layer, Registry};

/// Custom Layer to collect emitted event messages.
struct EventCollector {
    events: Arc<Mutex<Vec<String>>>,
}

impl<S> Layer<S> for EventCollector
where
    S: tracing::Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        self.events.lock().unwrap().push(format!("{:?}", event));
    }
}

#[test]
fn emits_trace_initialised_event() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let collector = EventCollector {
        events: events.clone(),
    };
    let subscriber = Registry::default().with(collector);
    let _guard = tracing::subscriber::set_default(subscriber);

    use jenkins_scm::cli::{execute, Commands};

    // A missing config still passes through the initial trace event.
    let result = execute(&Commands::Encode {
        config: std::path::PathBuf::from("dummy.yaml"),
    });
    assert!(result.is_err());

    let event_msgs = events.lock().unwrap();
    assert!(
        event_msgs.iter().any(|msg| msg.contains("trace_initialised")),
        "Expected a 'trace_initialised' trace event, got: {:?}",
        event_msgs
    );
}
