//! Live-browser scenario flows
//!
//! These require a local Chromium and are ignored by default. Run with:
//! cargo test --test browser_flows -- --ignored

use std::time::Duration;

use tempfile::TempDir;

use zeno_verify::assertions::assert_contains;
use zeno_verify::interact::{click, fill};
use zeno_verify::nav::{await_ready, goto, ReadyCondition};
use zeno_verify::runner::{RunnerConfig, ScenarioRunner};
use zeno_verify::scenario::{Scenario, Target};
use zeno_verify::session::{BrowserSession, SessionConfig};
use zeno_verify::VerifyError;

/// A self-contained stand-in for the playground demo: a counter and a todo
/// list wired up with plain DOM scripting, injectable without any server.
fn demo_markup() -> &'static str {
    r#"<html>
  <body>
    <div class="box">
      <p id="count">Count is: 0</p>
      <button id="increment">+</button>
      <input id="new-todo" type="text">
      <button id="add-todo">Add</button>
      <ul id="todos"><li>Learn ZenoJS</li></ul>
    </div>
    <script>
      let n = 0;
      const count = document.getElementById('count');
      document.getElementById('increment').addEventListener('click', () => {
        n += 1;
        count.textContent = 'Count is: ' + n;
      });
      document.getElementById('add-todo').addEventListener('click', () => {
        const input = document.getElementById('new-todo');
        if (!input.value) return;
        const item = document.createElement('li');
        item.textContent = input.value;
        document.getElementById('todos').appendChild(item);
        input.value = '';
      });
    </script>
  </body>
</html>"#
}

fn runner_with_tempdir(dir: &TempDir) -> ScenarioRunner {
    ScenarioRunner::with_config(RunnerConfig {
        session: SessionConfig::default(),
        screenshot_dir: dir.path().to_path_buf(),
        output_dir: dir.path().to_path_buf(),
    })
}

#[tokio::test]
#[ignore = "requires a local Chromium installation"]
async fn counter_increments_after_click() {
    let dir = TempDir::new().unwrap();
    let scenario = Scenario::from_yaml(&format!(
        r#"
name: counter-increment
target:
  content: |
{}
steps:
  - action: wait_for
    selector: '.box'
  - action: assert_text
    text: 'Count is: 0'
  - action: assert_text
    text: 'Learn ZenoJS'
  - action: click
    selector: '#increment'
  - action: wait_for
    text: 'Count is: 1'
    timeout_ms: 2000
  - action: assert_text
    text: 'Count is: 1'
"#,
        indent(demo_markup(), 4)
    ))
    .unwrap();

    let result = runner_with_tempdir(&dir).run(&scenario).await.unwrap();
    assert!(result.passed, "failures: {:?}", result.failures);

    let evidence = result.evidence.expect("evidence captured on pass");
    assert!(evidence.exists());
}

#[tokio::test]
#[ignore = "requires a local Chromium installation"]
async fn filled_todo_appears_after_add() {
    let session = BrowserSession::acquire(&SessionConfig::default())
        .await
        .unwrap();

    goto(&session, &Target::Content(demo_markup().to_string()))
        .await
        .unwrap();
    await_ready(
        &session,
        &ReadyCondition::SelectorAttached(".box".to_string()),
        Duration::from_secs(2),
    )
    .await
    .unwrap();

    fill(&session, "#new-todo", "Verify Frontend").await.unwrap();
    click(&session, "#add-todo").await.unwrap();
    await_ready(
        &session,
        &ReadyCondition::TextPresent("Verify Frontend".to_string()),
        Duration::from_secs(2),
    )
    .await
    .unwrap();

    assert_contains(&session, "Verify Frontend").await.unwrap();
    session.release().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a local Chromium installation"]
async fn click_before_fill_does_not_add_a_todo() {
    let session = BrowserSession::acquire(&SessionConfig::default())
        .await
        .unwrap();

    goto(&session, &Target::Content(demo_markup().to_string()))
        .await
        .unwrap();
    await_ready(
        &session,
        &ReadyCondition::SelectorAttached(".box".to_string()),
        Duration::from_secs(2),
    )
    .await
    .unwrap();

    // Reversed order: the click fires while the input is still empty, so
    // the later fill must not be reflected in the list.
    click(&session, "#add-todo").await.unwrap();
    fill(&session, "#new-todo", "Verify Frontend").await.unwrap();

    let err = await_ready(
        &session,
        &ReadyCondition::TextPresent(
            "<li>Verify Frontend</li>".to_string(),
        ),
        Duration::from_millis(500),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, VerifyError::Timeout { .. }));

    session.release().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a local Chromium installation"]
async fn unreachable_target_fails_before_assertions_with_no_evidence() {
    let dir = TempDir::new().unwrap();
    let scenario = Scenario::from_yaml(
        r#"
name: server-down
target:
  url: http://127.0.0.1:9/
steps:
  - action: assert_text
    text: 'Count is: 0'
"#,
    )
    .unwrap();

    let result = runner_with_tempdir(&dir).run(&scenario).await.unwrap();
    assert!(!result.passed);
    assert!(result.failures[0].contains("Navigation"));
    assert!(result.evidence.is_none());
}

#[tokio::test]
#[ignore = "requires a local Chromium installation"]
async fn readiness_wait_terminates_within_its_budget() {
    let session = BrowserSession::acquire(&SessionConfig::default())
        .await
        .unwrap();

    goto(&session, &Target::Content("<p>static</p>".to_string()))
        .await
        .unwrap();

    let start = std::time::Instant::now();
    let err = await_ready(
        &session,
        &ReadyCondition::SelectorAttached("#never-appears".to_string()),
        Duration::from_millis(500),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, VerifyError::Timeout { .. }));
    assert!(start.elapsed() < Duration::from_secs(5));

    session.release().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a local Chromium installation"]
async fn interacting_with_a_missing_element_reports_element_not_found() {
    let session = BrowserSession::acquire(&SessionConfig::default())
        .await
        .unwrap();

    goto(&session, &Target::Content("<p>nothing here</p>".to_string()))
        .await
        .unwrap();

    let err = click(&session, "#increment").await.unwrap_err();
    assert!(matches!(err, VerifyError::ElementNotFound { .. }));

    session.release().await.unwrap();
}

fn indent(text: &str, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    text.lines()
        .map(|line| format!("{}{}", pad, line))
        .collect::<Vec<_>>()
        .join("\n")
}
