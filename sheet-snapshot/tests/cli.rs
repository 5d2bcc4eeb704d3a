use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::write;
use tempfile::{tempdir, NamedTempFile};

#[test]
fn help_lists_the_run_command() {
    let mut cmd = Command::cargo_bin("sheet-snapshot").expect("Binary exists");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"));
}

#[test]
fn run_fails_for_a_missing_config_file() {
    let mut cmd = Command::cargo_bin("sheet-snapshot").expect("Binary exists");
    cmd.arg("run")
        .arg("--config")
        .arg("definitely/not/here.yaml")
        .env("GOOGLE_API_KEY", "unused")
        .assert()
        .failure();
}

/// An empty spreadsheet list runs without touching any API and prints the summary.
#[test]
fn run_with_no_spreadsheets_prints_summary() {
    let dir = tempdir().unwrap();
    let config = NamedTempFile::new().expect("Creating temp config file failed");
    write(config.path(), b"spreadsheets: []\n").expect("Writing temp config failed");

    let mut cmd = Command::cargo_bin("sheet-snapshot").expect("Binary exists");
    cmd.current_dir(dir.path())
        .arg("run")
        .arg("--config")
        .arg(config.path())
        .env("GOOGLE_API_KEY", "unused")
        .env_remove("GITHUB_TOKEN")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Snapshot complete: 0 entries, 0 destinations, 0 failed",
        ));
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
        use std::fmt::Write as FmtWrite;
        let mut msg = String::new();
        let _ = write!(&mut msg, "{:?}", event);
        self.events.lock().unwrap().push(msg);
    }
}

#[tokio::test]
async fn emits_trace_initialised_event() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let collector = EventCollector {
        events: events.clone(),
    };
    let subscriber = Registry::default().with(collector);
    let _guard = tracing::subscriber::set_default(subscriber);

    use sheet_snapshot::cli::{run, Cli, Commands};

    // A dummy path: the run fails on loading, after tracing has started.
    let cli = Cli {
        command: Commands::Run {
            config: std::path::PathBuf::from("dummy.yaml"),
        },
    };

    let _ = run(cli).await;

    let event_msgs = events.lock().unwrap();
    assert!(
        event_msgs.iter().any(|msg| msg.contains("trace_initialised")),
        "Expected a 'trace_initialised' trace event, got: {:?}",
        event_msgs
    );
}
