//! End-to-end harness for langgraph-proxy.
//!
//! Starts a mock LangGraph backend, spawns the real proxy binary pointed at
//! it, and drives the passthrough contract over the wire:
//!
//!   cargo run                                    # all tests
//!   cargo run -- --filter flow/                  # subset by name
//!   cargo run -- --proxy-bin ../target/debug/langgraph-proxy

mod backend;
mod client;
mod runner;
mod tests;
mod types;

use clap::Parser;
use colored::Colorize;
use runner::{run_tests, TestContext};
use tests::all_tests;

/// Proxy binary candidates, release build first
const PROXY_BIN_CANDIDATES: &[&str] = &[
    "../target/release/langgraph-proxy",
    "../target/debug/langgraph-proxy",
];

/// API key the proxy config carries; the mock backend must see exactly this
pub const TEST_API_KEY: &str = "lsv2-e2e-secret";

#[derive(Parser)]
#[command(name = "e2e", about = "End-to-end tests for langgraph-proxy")]
struct Cli {
    /// Path to the langgraph-proxy binary (default: newest target/ build)
    #[arg(long)]
    proxy_bin: Option<String>,

    /// Proxy config YAML; its backend URL must point at the mock port
    #[arg(long, default_value = "test_configs/proxy.yaml")]
    proxy_config: String,

    /// Mock backend listen port - must match the config's backend URL
    #[arg(long, default_value_t = 18024)]
    backend_port: u16,

    /// Proxy listen port - must match the config's server section
    #[arg(long, default_value_t = 18123)]
    proxy_port: u16,

    /// Only run tests whose name contains this string
    #[arg(long, short)]
    filter: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let proxy_bin = match cli.proxy_bin {
        Some(path) => path,
        None => find_proxy_bin()?,
    };

    println!("Mock backend on 127.0.0.1:{}", cli.backend_port);
    let backend_state = backend::start(cli.backend_port).await?;

    println!(
        "Spawning {} run --config {}",
        proxy_bin.bright_cyan(),
        cli.proxy_config
    );
    let mut proxy = tokio::process::Command::new(&proxy_bin)
        .arg("run")
        .arg("--config")
        .arg(&cli.proxy_config)
        // The config file is the single source of truth for these runs
        .env_remove("LANGGRAPH_API_URL")
        .env_remove("LANGCHAIN_API_KEY")
        .env_remove("LANGGRAPH_ASSISTANT_ID")
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| anyhow::anyhow!("failed to spawn '{}': {}", proxy_bin, e))?;

    let proxy_addr = format!("127.0.0.1:{}", cli.proxy_port);
    wait_until_healthy(&proxy_addr).await?;

    let ctx = TestContext {
        proxy_addr,
        backend_state,
        http_client: client::build_client(),
    };
    let results = run_tests(&all_tests(), ctx, cli.filter.as_deref()).await;

    proxy.kill().await.ok();

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }
    Ok(())
}

fn find_proxy_bin() -> anyhow::Result<String> {
    PROXY_BIN_CANDIDATES
        .iter()
        .find(|p| std::path::Path::new(p).exists())
        .map(|p| p.to_string())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "no proxy binary found (tried {}); build with: cargo build --release",
                PROXY_BIN_CANDIDATES.join(", ")
            )
        })
}

/// Poll /health until the proxy accepts connections
async fn wait_until_healthy(addr: &str) -> anyhow::Result<()> {
    let client = client::build_client();
    let url = format!("http://{addr}/health");
    for _ in 0..50 {
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;
        if client.get(&url).send().await.is_ok() {
            return Ok(());
        }
    }
    anyhow::bail!("proxy at {} did not become healthy within 10s", addr)
}
