//! Example: wrapping flaky backend calls in the retry executor
//!
//! This example demonstrates:
//! 1. A transient failure that clears after two retries
//! 2. A terminal failure that surfaces immediately
//! 3. Cancelling a call while it waits between attempts
//!
//! Run with:
//! ```bash
//! RUST_LOG=lexi_core=debug cargo run -p lexi-core --example retry_example
//! ```

use lexi_core::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// A simulated `chatWithLexi` backend that fails a fixed number of times
struct FlakyBackend {
    calls: AtomicU32,
    failures: u32,
    code: &'static str,
}

impl FlakyBackend {
    fn new(failures: u32, code: &'static str) -> Self {
        Self {
            calls: AtomicU32::new(0),
            failures,
            code,
        }
    }

    async fn chat(&self, message: &str) -> Result<String, RawFailure> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call <= self.failures {
            println!("  Call {call}: FAILED ({})", self.code);
            Err(RawFailure::with_code(format!("functions/{}", self.code))
                .message(format!("backend rejected call {call}")))
        } else {
            println!("  Call {call}: SUCCESS");
            Ok(format!("Lexi: you said \"{message}\""))
        }
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let policy = RetryPolicy::builder()
        .max_retries(2)
        .initial_delay(Duration::from_millis(100))
        .max_delay(Duration::from_millis(1000))
        .build()?;
    let executor = RetryExecutor::new(policy);

    println!("=== Example 1: transient failure clears ===\n");
    let backend = FlakyBackend::new(2, "unavailable");
    let start = Instant::now();
    let reply = executor.execute(|| backend.chat("xin chào")).await?;
    println!(
        "\n  Reply: {reply}\n  Calls: {}\n  Elapsed: {:?}\n",
        backend.calls(),
        start.elapsed()
    );

    println!("=== Example 2: terminal failure ===\n");
    let backend = FlakyBackend::new(u32::MAX, "unauthenticated");
    match executor.execute(|| backend.chat("hello")).await {
        Ok(reply) => println!("  Unexpected reply: {reply}"),
        Err(err) => {
            println!("\n  Code: {}", err.code());
            println!("  Retryable: {}", err.is_retryable());
            println!("  Sign in again: {}", err.requires_reauthentication());
            println!("  Message: {}", err.localized_message());
            println!("  Calls: {}\n", backend.calls());
        }
    }

    println!("=== Example 3: cancelled during backoff (Vietnamese) ===\n");
    let executor = RetryExecutor::new(RetryPolicy::default())
        .with_locale(Locale::Vietnamese)
        .with_observer(Arc::new(TracingObserver));
    let backend = FlakyBackend::new(u32::MAX, "deadline-exceeded");
    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(300)).await;
        canceller.cancel();
    });

    if let Err(err) = executor
        .execute_with_cancellation(&token, || backend.chat("tạm biệt"))
        .await
    {
        println!("\n  Code: {}", err.code());
        println!("  Message: {}", err.localized_message());
        println!("  Calls: {}", err.attempts());
    }

    Ok(())
}
