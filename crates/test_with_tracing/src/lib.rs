// Copyright (C) Microsoft Corporation. All rights reserved.

//! Test attribute with `tracing` output.
//!
//! `use test_with_tracing::test;` replaces the built-in `#[test]` attribute
//! with one that installs a process-wide `tracing` subscriber before the test
//! body runs. Output goes through the libtest capture writer, so it only
//! shows up for failing tests or with `--nocapture`.
//!
//! The filter comes from `RUST_LOG` when it is set (`Targets` syntax, e.g.
//! `corecrypto=trace`). Otherwise everything at DEBUG and above is shown.

// Test-only support crate; `expect` is allowed here (but not `unwrap`).
#![allow(clippy::expect_used)]

#[cfg(test)]
extern crate self as test_with_tracing;

pub use test_with_tracing_macro::test;
use tracing::metadata::LevelFilter;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::prelude::*;

/// Default level when `RUST_LOG` is not set.
const DEFAULT_LEVEL: LevelFilter = LevelFilter::DEBUG;

fn targets_from_env() -> Targets {
    match std::env::var("RUST_LOG") {
        Ok(var) if !var.trim().is_empty() => var
            .parse()
            .expect("RUST_LOG is not a valid target filter"),
        _ => Targets::new().with_default(DEFAULT_LEVEL),
    }
}

#[doc(hidden)]
/// Installs the test subscriber. Safe to call from every test; only the
/// first call has an effect.
pub fn init() {
    static ONCE: std::sync::Once = std::sync::Once::new();

    ONCE.call_once(|| {
        tracing_subscriber::fmt()
            .compact()
            .with_ansi(false)
            .with_test_writer()
            .with_max_level(LevelFilter::TRACE)
            .with_target(true)
            .finish()
            .with(targets_from_env())
            .init();
    });
}

#[cfg(test)]
mod tests {
    use super::test;

    #[test]
    fn test_tracing_event_is_captured() {
        tracing::debug!(block_size = 64, "tracing event from a test");
    }

    #[test]
    fn test_log_event_is_bridged() {
        log::info!("log record from a test");
    }

    #[test]
    fn test_result_return_is_supported() -> Result<(), Box<dyn std::error::Error>> {
        let value: u32 = "16".parse()?;
        assert_eq!(value, 16);
        Ok(())
    }

    #[test]
    fn test_init_is_idempotent() {
        super::init();
        super::init();
    }
}
