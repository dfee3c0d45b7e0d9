use std::path::PathBuf;

use clap::{Parser, Subcommand};
use photo_policy::{Channel, ConsentStatus, InputError};

#[derive(Parser, Debug)]
#[command(
    name = "foto-check",
    version,
    about = "Checks whether a photo of people may be published (advisory, not legal advice)"
)]
pub struct Cli {
    /// Path to the settings file
    #[arg(short, long, default_value = "foto-check.yaml")]
    pub config: PathBuf,

    /// Path to the rule configuration (overrides settings file)
    #[arg(short, long)]
    pub policy: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub check: CheckArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load the rule configuration and report problems without evaluating
    Validate,
}

/// Answers that would otherwise be asked interactively.
#[derive(clap::Args, Debug, Default)]
pub struct CheckArgs {
    /// Are minors in the photo? (j/n)
    #[arg(long, value_name = "J/N", value_parser = yes_no)]
    pub minors: Option<bool>,

    /// Are people recognizable? (j/n)
    #[arg(long, value_name = "J/N", value_parser = yes_no)]
    pub identifiable: Option<bool>,

    /// Is it a group photo? (j/n)
    #[arg(long, value_name = "J/N", value_parser = yes_no)]
    pub group_photo: Option<bool>,

    /// Are single people centered, large or portrait-like? (j/n)
    #[arg(long, value_name = "J/N", value_parser = yes_no)]
    pub prominent_subject: Option<bool>,

    /// Publication channel (website/social/print or an alias such as instagram)
    #[arg(long, value_parser = channel)]
    pub channel: Option<Channel>,

    /// Consent on record (alle/teilweise/unbekannt)
    #[arg(long, value_parser = consent)]
    pub consent: Option<ConsentStatus>,

    /// Write the HTML report without asking
    #[arg(long, conflicts_with = "no_report")]
    pub report: bool,

    /// Never write the HTML report
    #[arg(long)]
    pub no_report: bool,

    /// Directory for HTML reports (overrides settings file)
    #[arg(long)]
    pub report_dir: Option<PathBuf>,

    /// Print the result as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

fn yes_no(s: &str) -> Result<bool, InputError> {
    photo_policy::parse_yes_no(s)
}

fn channel(s: &str) -> Result<Channel, InputError> {
    s.parse()
}

fn consent(s: &str) -> Result<ConsentStatus, InputError> {
    s.parse()
}
