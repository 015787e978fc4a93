// zabbix-smoke - Smoke checks against a Zabbix API
//
// Configured entirely from the environment (TEST_ZABBIX_URL, TEST_ZABBIX_USER,
// TEST_ZABBIX_PASSWORD, TEST_ZABBIX_VERBOSE). Exits 1 before running any
// check when the configuration is incomplete.

use anyhow::{Context, Result};
use std::process::ExitCode;
use tracing::{error, info};
use zabbix_testkit::{checks, Harness, HarnessError};

#[tokio::main]
async fn main() -> ExitCode {
    let harness = Harness::from_env_or_exit();

    info!(
        "zabbix-smoke v{} checking {} as {}",
        env!("CARGO_PKG_VERSION"),
        harness.config().url,
        harness.host()
    );

    match run(&harness).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Run every check; `Ok(false)` when any of them failed
async fn run(harness: &Harness) -> Result<bool> {
    let api = harness
        .api()
        .await
        .context("Failed to initialize API client")?;

    let results: [(&str, Result<(), HarnessError>); 2] = [
        ("bad_calls", checks::check_bad_call(&*api).await),
        ("version", checks::check_version(&*api).await.map(|_| ())),
    ];

    let mut passed = true;
    for (name, result) in &results {
        match result {
            Ok(()) => println!("check {name} ... ok"),
            Err(err) => {
                println!("check {name} ... FAILED: {err}");
                passed = false;
            }
        }
    }

    let failed = results.iter().filter(|(_, r)| r.is_err()).count();
    println!(
        "\nsmoke result: {}. {} passed; {} failed",
        if passed { "ok" } else { "FAILED" },
        results.len() - failed,
        failed
    );

    Ok(passed)
}
