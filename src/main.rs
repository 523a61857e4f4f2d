//! Verification harness entry point
//!
//! Loads YAML scenarios, runs them sequentially against a headless browser
//! and the filesystem, and sets the process exit status: 0 when every
//! scenario passed, 1 when any expectation was unmet, 2 on a harness error.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use zeno_verify::runner::{RunnerConfig, ScenarioRunner, SuiteResult};
use zeno_verify::scenario::Scenario;
use zeno_verify::session::SessionConfig;
use zeno_verify::VerifyResult;

#[derive(Parser, Debug)]
#[command(name = "zeno-verify")]
#[command(about = "Acceptance verification harness for ZenoJS")]
struct Args {
    /// Path to the scenario directory
    #[arg(short, long, default_value = "scenarios")]
    scenarios: PathBuf,

    /// Run only the scenario with this name
    #[arg(short, long)]
    name: Option<String>,

    /// Directory for evidence screenshots
    #[arg(long, default_value = "verification")]
    screenshot_dir: PathBuf,

    /// Directory for the JSON results report
    #[arg(short, long, default_value = "verification")]
    output: PathBuf,

    /// Run the browser with a visible window
    #[arg(long)]
    headed: bool,

    /// Viewport width
    #[arg(long, default_value = "1280")]
    viewport_width: u32,

    /// Viewport height
    #[arg(long, default_value = "720")]
    viewport_height: u32,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("info".parse().unwrap()),
        )
        .init();

    let args = Args::parse();

    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    let result = rt.block_on(async_main(args));

    match result {
        Ok(success) => {
            if success {
                std::process::exit(0);
            } else {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}

async fn async_main(args: Args) -> VerifyResult<bool> {
    let config = RunnerConfig {
        session: SessionConfig {
            headless: !args.headed,
            window_width: args.viewport_width,
            window_height: args.viewport_height,
        },
        screenshot_dir: args.screenshot_dir,
        output_dir: args.output,
    };

    let scenarios = Scenario::load_all(&args.scenarios)?;
    let selected: Vec<Scenario> = match &args.name {
        Some(name) => scenarios
            .into_iter()
            .filter(|s| &s.name == name)
            .collect(),
        None => scenarios,
    };

    if selected.is_empty() {
        eprintln!("No scenarios found under {}", args.scenarios.display());
        return Ok(false);
    }

    let runner = ScenarioRunner::with_config(config);
    let results: SuiteResult = runner.run_all(&selected).await;

    // Unmet expectations, missing artifact paths included, go to stderr so a
    // caller sees exactly what failed before the nonzero exit.
    for result in &results.results {
        for failure in &result.failures {
            eprintln!("{}: {}", result.name, failure);
        }
    }

    runner.write_results(&results)?;

    Ok(results.failed == 0)
}
