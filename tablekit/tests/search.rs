//! Tests for the debounced search channel.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::sleep;

use tablekit::events::{Callback, callback};
use tablekit::search::{DebouncedSearch, SearchPhase};

fn recorder() -> (Callback<String>, Arc<Mutex<Vec<String>>>) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    (callback(move |v| sink.lock().unwrap().push(v)), log)
}

fn channel(on_commit: Callback<String>) -> DebouncedSearch {
    DebouncedSearch::new("", Duration::from_millis(400), on_commit)
}

#[tokio::test(start_paused = true)]
async fn test_rapid_keystrokes_commit_once() {
    let (on_commit, log) = recorder();
    let mut search = channel(on_commit);

    search.input("a");
    sleep(Duration::from_millis(100)).await;
    search.input("ab");
    sleep(Duration::from_millis(100)).await;
    search.input("abc");

    assert_eq!(search.value(), "abc");
    assert_eq!(search.phase(), SearchPhase::Typing);

    sleep(Duration::from_millis(399)).await;
    assert!(log.lock().unwrap().is_empty());

    sleep(Duration::from_millis(2)).await;
    assert_eq!(*log.lock().unwrap(), vec!["abc"]);
    assert_eq!(search.phase(), SearchPhase::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_pause_between_keystrokes_commits_each() {
    let (on_commit, log) = recorder();
    let mut search = channel(on_commit);

    search.input("a");
    sleep(Duration::from_millis(500)).await;
    search.input("ab");
    sleep(Duration::from_millis(500)).await;

    assert_eq!(*log.lock().unwrap(), vec!["a", "ab"]);
}

#[tokio::test(start_paused = true)]
async fn test_external_override_cancels_pending_commit() {
    let (on_commit, log) = recorder();
    let mut search = channel(on_commit);

    search.input("eur");
    sleep(Duration::from_millis(200)).await;
    search.sync_external("usd");

    assert_eq!(search.value(), "usd");
    assert_eq!(search.phase(), SearchPhase::Idle);
    sleep(Duration::from_millis(1000)).await;
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_host_echo_of_commit_keeps_typing() {
    let (on_commit, log) = recorder();
    let mut search = channel(on_commit);

    search.input("a");
    sleep(Duration::from_millis(500)).await;
    search.input("ab");

    // The host catches up with the earlier commit while "ab" is pending.
    search.sync_external("a");
    assert_eq!(search.value(), "ab");
    assert_eq!(search.phase(), SearchPhase::Typing);

    sleep(Duration::from_millis(500)).await;
    assert_eq!(*log.lock().unwrap(), vec!["a", "ab"]);
}

#[tokio::test(start_paused = true)]
async fn test_host_returning_to_committed_value_resyncs() {
    let (on_commit, log) = recorder();
    let mut search = channel(on_commit);

    search.input("a");
    sleep(Duration::from_millis(500)).await;
    search.sync_external("a");
    search.sync_external("");
    assert_eq!(search.value(), "");

    search.sync_external("a");
    assert_eq!(search.value(), "a");
    assert_eq!(*log.lock().unwrap(), vec!["a"]);
}

#[tokio::test(start_paused = true)]
async fn test_unchanged_external_value_is_ignored() {
    let (on_commit, log) = recorder();
    let mut search = channel(on_commit);

    search.input("x");
    search.sync_external("");
    assert_eq!(search.phase(), SearchPhase::Typing);

    sleep(Duration::from_millis(500)).await;
    assert_eq!(*log.lock().unwrap(), vec!["x"]);
}

#[tokio::test(start_paused = true)]
async fn test_drop_cancels_timer() {
    let (on_commit, log) = recorder();
    let mut search = channel(on_commit);

    search.input("gone");
    drop(search);

    sleep(Duration::from_millis(1000)).await;
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_explicit_cancel() {
    let (on_commit, log) = recorder();
    let mut search = channel(on_commit);

    search.input("abc");
    search.cancel();
    assert_eq!(search.value(), "abc");

    sleep(Duration::from_millis(1000)).await;
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn test_without_runtime_commits_immediately() {
    let (on_commit, log) = recorder();
    let mut search = channel(on_commit);

    search.input("now");
    assert_eq!(*log.lock().unwrap(), vec!["now"]);
    assert_eq!(search.phase(), SearchPhase::Idle);
}
