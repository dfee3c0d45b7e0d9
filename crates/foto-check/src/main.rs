mod cli;
mod config;
mod prompt;
mod report;

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use photo_policy::{calculate_sensitivity, evaluate, loader, resolve_legal_refs, PolicyConfig};
use tracing::{debug, info, warn};

use crate::cli::{CheckArgs, Cli, Command};
use crate::config::Settings;
use crate::prompt::Prompter;
use crate::report::CheckReport;

fn main() -> Result<()> {
    // 1. Parse CLI args.
    let cli = Cli::parse();

    // 2. Load settings, then merge CLI overrides.
    let loaded = config::load(&cli.config)?;
    let settings_found = loaded.is_some();
    let mut settings = loaded.unwrap_or_default();

    if let Some(ref policy) = cli.policy {
        settings.policy_file = policy.clone();
    }
    if let Some(ref dir) = cli.check.report_dir {
        settings.report.dir = dir.clone();
    }

    // 3. Init tracing-subscriber with JSON format on stderr; stdout carries the result.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.logging.level));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    if !settings_found {
        warn!(path = %cli.config.display(), "settings file not found; using defaults");
    }
    info!(
        settings_file = %cli.config.display(),
        policy_file = %settings.policy_file.display(),
        "foto-check starting"
    );

    // 4. Load the rule configuration once for the whole run.
    let policy = loader::load_policy(&settings.policy_file)
        .context("failed to load rule configuration")?;
    debug!(
        rules = policy.rules_ordered.len(),
        legal_refs = policy.legal_ref_catalog.len(),
        "rule configuration loaded"
    );

    match cli.command {
        Some(Command::Validate) => validate(&settings.policy_file, &policy),
        None => check(&cli.check, &settings, &policy),
    }
}

/// Print lint findings for the loaded configuration.
fn validate(path: &Path, policy: &PolicyConfig) -> Result<()> {
    let findings = loader::lint_policy(policy);
    let mut out = io::stdout().lock();
    writeln!(
        out,
        "{}: {} rule(s), {} legal reference(s)",
        path.display(),
        policy.rules_ordered.len(),
        policy.legal_ref_catalog.len()
    )?;
    if findings.is_empty() {
        writeln!(out, "no problems found")?;
    } else {
        for finding in &findings {
            writeln!(out, "warning: {finding}")?;
        }
    }
    Ok(())
}

/// Ask for the photo's facts, evaluate them and show the result.
fn check(args: &CheckArgs, settings: &Settings, policy: &PolicyConfig) -> Result<()> {
    // Keep stdout parseable in JSON mode.
    let questions: Box<dyn Write> = if args.json {
        Box::new(io::stderr())
    } else {
        Box::new(io::stdout())
    };
    let mut prompter = Prompter::new(io::stdin().lock(), questions);

    if !args.json {
        println!("Foto-Check\n");
    }
    let ctx = prompter.collect_context(args)?;

    let result = evaluate(&ctx, policy);
    let summary = CheckReport {
        context: &ctx,
        result: &result,
        sensitivity: calculate_sensitivity(&ctx),
        legal_refs: resolve_legal_refs(policy, result.legal_ref_keys.as_deref()),
    };
    info!(
        decision = %result.decision,
        rule = result.rule_id.as_deref(),
        sensitivity = %summary.sensitivity.tier,
        "photo evaluated"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("\n{}", report::render_console(&summary));
    }

    let write_html = if args.report {
        true
    } else if args.no_report || !settings.report.prompt {
        false
    } else {
        prompter.yes_no("\nHTML-Report erzeugen?")?
    };

    if write_html {
        let base_dir = settings
            .policy_file
            .parent()
            .unwrap_or_else(|| Path::new("."));
        let logo = report::load_logo_data_uri(base_dir, policy.logo_path.as_deref());
        let now = chrono::Local::now().naive_local();
        let html = report::render_html(&summary, logo.as_deref(), now);
        let path = report::write_report(&settings.report.dir, &html, now)?;
        info!(path = %path.display(), "report written");
        if args.json {
            eprintln!("Report gespeichert: {}", path.display());
        } else {
            println!("Report gespeichert: {}", path.display());
        }
    }

    Ok(())
}
