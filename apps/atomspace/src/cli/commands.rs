//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::api;
use crate::config::Config;
use atomspace_core::{AtomSpaceError, InferenceRule, TruthValue};

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(config: &Config) -> Result<(), AtomSpaceError> {
    println!("AtomSpace Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:               {}", config.server.host);
    println!("  Port:               {}", config.server.port);
    println!("  Scheduler interval: {} ms", config.scheduler.interval_ms);
    println!("  Scheduler autostart: {}", config.scheduler.autostart);
    println!("  History capacity:   {}", config.inference.history_capacity);
    println!();
    println!("Endpoints:");
    println!("  POST /api/v1/atoms        - Create an atom");
    println!("  POST /api/v1/links        - Create a link");
    println!("  POST /api/v1/query        - Pattern query");
    println!("  POST /api/v1/infer/{{rule}} - Apply an inference rule");
    println!("  GET  /health              - Health check");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    api::run_server(config).await
}

// =============================================================================
// INFER COMMAND
// =============================================================================

/// Parse `STRENGTH,CONFIDENCE` into a clamped truth value.
pub fn parse_truth_value(text: &str) -> Result<TruthValue, AtomSpaceError> {
    let invalid = || {
        AtomSpaceError::InvalidInput(format!(
            "premise '{}' must be STRENGTH,CONFIDENCE (e.g. 0.9,0.8)",
            text
        ))
    };

    let (strength, confidence) = text.split_once(',').ok_or_else(invalid)?;
    let strength: f64 = strength.trim().parse().map_err(|_| invalid())?;
    let confidence: f64 = confidence.trim().parse().map_err(|_| invalid())?;
    Ok(TruthValue::new(strength, confidence))
}

/// Apply one rule without starting a server.
pub fn cmd_infer(rule: &str, premises: &[String], json_mode: bool) -> Result<(), AtomSpaceError> {
    let rule: InferenceRule = rule.parse()?;
    let premises = premises
        .iter()
        .map(|p| parse_truth_value(p))
        .collect::<Result<Vec<_>, _>>()?;
    let result = rule.apply(&premises)?;

    if json_mode {
        let output = serde_json::json!({
            "rule": rule,
            "premises": premises,
            "result": result,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Rule: {}", rule);
    for (i, premise) in premises.iter().enumerate() {
        println!(
            "  Premise {}: strength={:.4} confidence={:.4}",
            i + 1,
            premise.strength(),
            premise.confidence()
        );
    }
    println!(
        "  Result:    strength={:.4} confidence={:.4}",
        result.strength(),
        result.confidence()
    );

    Ok(())
}

// =============================================================================
// CONFIG COMMAND
// =============================================================================

/// Print the effective configuration.
pub fn cmd_config(config: &Config, json_mode: bool) -> Result<(), AtomSpaceError> {
    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(config).unwrap_or_default()
        );
    } else {
        print!("{}", config.to_toml()?);
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
