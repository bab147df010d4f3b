//! Sequential test execution with colored pass/fail reporting.

use colored::Colorize;
use std::time::Instant;

use crate::types::{SharedBackendState, TestResult};

pub type TestFuture =
    std::pin::Pin<Box<dyn std::future::Future<Output = anyhow::Result<()>> + Send>>;

/// A registered test: name, one-line description, and the entry function.
pub struct TestCase {
    pub name: &'static str,
    pub description: &'static str,
    pub run: fn(TestContext) -> TestFuture,
}

/// Handed to every test: where the proxy listens plus a handle on the mock
/// backend's queue and request log.
#[derive(Clone)]
pub struct TestContext {
    pub proxy_addr: String,
    pub backend_state: SharedBackendState,
    pub http_client: reqwest::Client,
}

impl TestContext {
    /// Clear queued responses and the request log between tests.
    fn reset_backend(&self) {
        let mut state = self.backend_state.lock().unwrap();
        state.response_queue.clear();
        state.received_requests.clear();
    }
}

/// Run the selected tests one at a time against a fresh backend state each.
pub async fn run_tests(
    cases: &[TestCase],
    ctx: TestContext,
    filter: Option<&str>,
) -> Vec<TestResult> {
    let selected: Vec<&TestCase> = cases
        .iter()
        .filter(|c| filter.map_or(true, |f| c.name.contains(f)))
        .collect();

    println!();
    println!(
        "{}",
        format!("Running {} test(s) against {}", selected.len(), ctx.proxy_addr).bold()
    );

    let mut results = Vec::with_capacity(selected.len());
    for case in selected {
        ctx.reset_backend();

        let started = Instant::now();
        let outcome = (case.run)(ctx.clone()).await;
        let duration_ms = started.elapsed().as_millis() as u64;

        match &outcome {
            Ok(()) => println!("  {} {} ({duration_ms}ms)", "ok".green().bold(), case.name),
            Err(e) => {
                println!("  {} {} ({duration_ms}ms)", "FAILED".red().bold(), case.name);
                println!("      {}", case.description.dimmed());
                for line in format!("{e:#}").lines() {
                    println!("      {}", line.red());
                }
            }
        }

        results.push(TestResult {
            name: case.name.to_string(),
            passed: outcome.is_ok(),
            error: outcome.err().map(|e| e.to_string()),
            duration_ms,
        });
    }

    let failed = results.iter().filter(|r| !r.passed).count();
    let passed = results.len() - failed;
    println!();
    let summary = format!("{} passed, {} failed", passed, failed);
    if failed == 0 {
        println!("{}", summary.green().bold());
    } else {
        println!("{}", summary.red().bold());
    }

    results
}
