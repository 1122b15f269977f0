//! WisdomPath - Main CLI Entry Point

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use colored::Colorize;
use serde::Serialize;
use std::cell::Cell;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;
use wisdompath::{
    classification::{classify_tokens, Classification, QUIZ_QUESTIONS},
    cli::{Args, Commands, Config, Verbosity},
    flow::{ActionResult, FlowController, FlowKind, FlowScript, FlowSnapshot},
    interaction::{Intervention, InteractionMatrix, MatrixCell},
    telemetry::TelemetryDisplay,
    DisplayMode,
};

/// JSON report of a replayed script
#[derive(Serialize)]
struct RunReport<'a> {
    flow_id: Uuid,
    flow: FlowKind,
    completed_at: Option<DateTime<Utc>>,
    classification: Classification,
    final_state: &'a FlowSnapshot,
    actions: &'a [ActionResult],
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        DisplayMode::Text.show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = Config::load(args.config.clone()).context("Failed to load configuration")?;

    let verbosity = if args.quiet || args.verbose > 0 {
        args.verbosity()
    } else {
        Verbosity::from_name(&config.display.default_verbosity).unwrap_or(Verbosity::Normal)
    };
    init_tracing(verbosity);

    let display = DisplayMode::new(args.json, config.display.color_output);

    match args.command {
        Commands::Run { script, flow } => {
            let script = FlowScript::load(&script)
                .with_context(|| format!("Failed to load script {}", script.display()))?;
            run_script(&script, flow, &config, verbosity, display)
        }
        Commands::Quiz => show_quiz(display),
        Commands::Classify { tokens } => {
            let result = classify_tokens(tokens.iter().map(String::as_str));
            if display.is_json() {
                display.emit_json(&result)?;
            } else {
                show_classification(&result);
            }
            Ok(())
        }
        Commands::Matrix { interventions } => {
            let items = Intervention::load_all(&interventions)
                .with_context(|| format!("Failed to load {}", interventions.display()))?;
            show_matrix(&InteractionMatrix::build(&items), display)
        }
        Commands::Config => {
            if display.is_json() {
                display.emit_json(&config)?;
            } else {
                if let Some(path) = Config::default_path() {
                    display.show_info(&format!("# default location: {}", path.display()));
                }
                display.show_info(&toml::to_string_pretty(&config)?);
            }
            Ok(())
        }
    }
}

fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("wisdompath={}", verbosity.log_filter())));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run_script(
    script: &FlowScript,
    flow: Option<FlowKind>,
    config: &Config,
    verbosity: Verbosity,
    display: DisplayMode,
) -> Result<()> {
    let kind = flow.or(script.flow).unwrap_or_default();

    let completed_at: Rc<Cell<Option<DateTime<Utc>>>> = Rc::new(Cell::new(None));
    let stamp = Rc::clone(&completed_at);
    let mut controller = FlowController::new(kind.rules(&config.flow))
        .on_complete(move || stamp.set(Some(Utc::now())));

    let results = script
        .run(&mut controller)
        .context("Script replay failed")?;
    let final_state = controller.snapshot();

    if display.is_json() {
        display.emit_json(RunReport {
            flow_id: controller.id(),
            flow: kind,
            completed_at: completed_at.get(),
            classification: controller.classification(),
            final_state: &final_state,
            actions: &results,
        })?;
        return Ok(());
    }

    if verbosity.show_progress() {
        display.show_info(&format!(
            "{} {} ({})",
            "Flow".bold(),
            kind.as_str().cyan(),
            controller.id().to_string().dimmed()
        ));
    }

    let telemetry_display = TelemetryDisplay::new(controller.telemetry(), verbosity);
    if telemetry_display.should_show_details() {
        for result in &results {
            display.show_info(&DisplayMode::format_action(result));
        }
    }

    display.show_info(&DisplayMode::format_position(&final_state));
    if let Some(report) = controller.report() {
        for check in report.failed_checks() {
            display.show_warning(&format!("missing: {}", check.name));
        }
    }

    if let Some(classification) = &final_state.classification {
        show_classification(classification);
    }

    match completed_at.get() {
        Some(at) => display.show_success(&format!("Flow complete at {}", at.to_rfc3339())),
        None => display.show_warning("Flow not complete"),
    }

    telemetry_display.display_summary();
    Ok(())
}

fn show_classification(result: &Classification) {
    println!(
        "Constitution: {} primary, {} secondary",
        result.primary.display_name().bold(),
        result.secondary.display_name()
    );
    for (dosha, count) in &result.counts {
        println!("  {:<6} {}", dosha.display_name(), count);
    }
}

fn show_quiz(display: DisplayMode) -> Result<()> {
    if display.is_json() {
        display.emit_json(QUIZ_QUESTIONS)?;
        return Ok(());
    }

    for (i, q) in QUIZ_QUESTIONS.iter().enumerate() {
        println!("{}. {} {}", i + 1, q.question.bold(), format!("[{}]", q.id).dimmed());
        for option in &q.options {
            println!("   {:<6} {}", option.dosha.as_str().cyan(), option.label);
        }
    }
    Ok(())
}

fn show_matrix(matrix: &InteractionMatrix, display: DisplayMode) -> Result<()> {
    if display.is_json() {
        display.emit_json(matrix)?;
        return Ok(());
    }

    if matrix.is_empty() {
        display.show_info("No active interventions");
        return Ok(());
    }

    for (r, row) in matrix.rows().iter().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .map(|cell| match cell {
                MatrixCell::SelfPair => "—".dimmed().to_string(),
                MatrixCell::Potential => "!".yellow().bold().to_string(),
                MatrixCell::Clear => "✓".green().to_string(),
            })
            .collect();
        println!("{:>2} {:<28} {}", r + 1, matrix.labels()[r], cells.join(" "));
    }

    let flagged = matrix.flagged_pairs();
    if flagged.is_empty() {
        display.show_success("No known interactions");
    } else {
        for (a, b) in flagged {
            display.show_warning(&format!("potential interaction: {} → {}", a, b));
        }
    }
    Ok(())
}
