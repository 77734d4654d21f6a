//! # CLI Command Implementations

use crate::api;
use crate::config::Settings;
use crate::error::AppError;
use wardflow_core::{Alert, BalanceOutcome, MoveRecord};

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(settings: &Settings) -> Result<(), AppError> {
    let hospital = settings.build_hospital();

    println!("Wardflow Dashboard Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:            {}", settings.host);
    println!("  Port:            {}", settings.port);
    println!(
        "  Flow mode:       {}",
        if settings.auto { "automatic" } else { "manual" }
    );
    println!("  Crowd threshold: {}", settings.balance.crowd_threshold);
    println!("  Max moves/stage: {}", settings.balance.max_moves_per_stage);
    println!("  Wait threshold:  {} min", settings.wait_threshold);
    match settings.seed {
        Some(seed) => println!("  Seed:            {}", seed),
        None => println!("  Seed:            (entropy)"),
    }
    println!();
    println!("Endpoints:");
    println!("  GET  /api/overview      - Dashboard metrics");
    println!("  GET  /api/patients      - Patient listing");
    println!("  POST /api/advance       - Advance eligible patients");
    println!("  POST /api/move-patient  - Move one patient");
    println!("  GET  /api/check-balance - Auto-balance");
    println!("  GET  /api/alerts        - Alert feed");
    println!("  GET  /health            - Health check");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    api::run_server(&settings.addr(), hospital).await
}

// =============================================================================
// SNAPSHOT COMMAND
// =============================================================================

/// Print the start-up overview and alert feed.
pub fn cmd_snapshot(settings: &Settings, json_mode: bool) -> Result<(), AppError> {
    let hospital = settings.build_hospital();
    let overview = hospital.overview();
    let alerts = hospital.alerts();

    if json_mode {
        let output = serde_json::json!({
            "overview": overview,
            "flow_mode": { "auto": hospital.is_auto() },
            "auto_config": hospital.config(),
            "alerts": alerts,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Wardflow Snapshot");
    println!("=================");
    println!("Total patients: {}", overview.total_patients);
    println!("Avg wait:       {:.1} min", overview.avg_wait_time);
    println!("Active staff:   {}", overview.active_staff);
    println!("Occupancy:      {}%", overview.occupancy);
    println!();
    println!("Distribution:");
    for (stage, count) in overview.patient_distribution.iter() {
        println!("  {:<13} {}", stage.name(), count);
    }
    println!();
    println!("Patients:");
    for patient in hospital.registry().iter() {
        println!(
            "  #{:<3} {:<16} {:<13} {:<6} {} min",
            patient.id.0,
            patient.name,
            patient.stage.name(),
            patient.priority.name(),
            patient.waiting_time
        );
    }
    println!();
    print_alerts(&alerts);

    Ok(())
}

// =============================================================================
// SIMULATE COMMAND
// =============================================================================

/// Run `ticks` rounds of simulate, advance and balance check.
pub fn cmd_simulate(settings: &Settings, ticks: u32, json_mode: bool) -> Result<(), AppError> {
    let mut hospital = settings.build_hospital();
    let mut rounds = Vec::new();

    for tick in 1..=ticks {
        let report = hospital.simulate_tick();
        let advanced = hospital.advance();
        let balanced = match hospital.check_balance() {
            BalanceOutcome::Idle => Vec::new(),
            BalanceOutcome::Balanced(moved) => moved,
        };
        tracing::debug!(
            tick,
            arrivals = report.arrivals.len(),
            advanced = advanced.len(),
            balanced = balanced.len(),
            "Offline tick"
        );

        if json_mode {
            rounds.push(serde_json::json!({
                "tick": tick,
                "arrivals": report.arrivals,
                "advanced": advanced,
                "balanced": balanced,
            }));
        } else {
            println!(
                "Tick {:>3}: {} arrival(s), {} advanced, {} balanced",
                tick,
                report.arrivals.len(),
                advanced.len(),
                balanced.len()
            );
            print_moves("advance", &advanced);
            print_moves("balance", &balanced);
        }
    }

    let overview = hospital.overview();
    let alerts = hospital.alerts();

    if json_mode {
        let output = serde_json::json!({
            "ticks": rounds,
            "overview": overview,
            "alerts": alerts,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!();
    println!(
        "After {} tick(s): {} patients, avg wait {:.1} min, occupancy {}%",
        ticks, overview.total_patients, overview.avg_wait_time, overview.occupancy
    );
    print_alerts(&alerts);

    Ok(())
}

// =============================================================================
// OUTPUT HELPERS
// =============================================================================

fn print_moves(label: &str, moves: &[MoveRecord]) {
    for m in moves {
        println!(
            "    {} #{} {} -> {} ({})",
            label,
            m.id,
            m.from,
            m.to,
            m.priority.name()
        );
    }
}

fn print_alerts(alerts: &[Alert]) {
    println!("Alerts ({}):", alerts.len());
    for alert in alerts {
        println!("  [{:?}] {} ({})", alert.kind, alert.message, alert.time);
    }
}

