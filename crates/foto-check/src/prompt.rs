use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use photo_policy::{parse_yes_no, Channel, ConsentStatus, InputError, PhotoContext};

use crate::cli::CheckArgs;

/// Asks questions on `output` and reads answers from `input`.
///
/// Invalid answers print a short hint and the question is repeated. End of
/// input is an error.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn yes_no(&mut self, question: &str) -> Result<bool> {
        self.ask(
            &format!("{question} (j/n): "),
            "Bitte 'j' oder 'n' eingeben.",
            parse_yes_no,
        )
    }

    pub fn channel(&mut self) -> Result<Channel> {
        self.ask(
            "Kanal (website/social/print): ",
            "Ungültig. Bitte website, social oder print eingeben.",
            Channel::from_str,
        )
    }

    pub fn consent(&mut self) -> Result<ConsentStatus> {
        self.ask(
            "Einwilligung (alle/teilweise/unbekannt): ",
            "Ungültig. Bitte alle, teilweise oder unbekannt eingeben.",
            ConsentStatus::from_str,
        )
    }

    /// Fill every context field not already given on the command line.
    pub fn collect_context(&mut self, given: &CheckArgs) -> Result<PhotoContext> {
        let minors = match given.minors {
            Some(v) => v,
            None => self.yes_no("Sind Minderjährige auf dem Foto?")?,
        };
        let identifiable = match given.identifiable {
            Some(v) => v,
            None => self.yes_no("Sind Personen erkennbar?")?,
        };
        let group_photo = match given.group_photo {
            Some(v) => v,
            None => self.yes_no("Ist es ein Gruppenfoto?")?,
        };
        let prominent_subject = match given.prominent_subject {
            Some(v) => v,
            None => self.yes_no(
                "Sind einzelne Personen deutlich hervorgehoben (zentral/groß/portraitähnlich)?",
            )?,
        };
        let channel = match given.channel {
            Some(v) => v,
            None => self.channel()?,
        };
        let consent_status = match given.consent {
            Some(v) => v,
            None => self.consent()?,
        };

        Ok(PhotoContext {
            minors,
            identifiable,
            group_photo,
            prominent_subject,
            channel,
            consent_status,
        })
    }

    fn ask<T>(
        &mut self,
        prompt: &str,
        hint: &str,
        parse: impl Fn(&str) -> Result<T, InputError>,
    ) -> Result<T> {
        loop {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;

            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .context("failed to read answer")?;
            if read == 0 {
                bail!("input closed before all questions were answered");
            }

            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(_) => writeln!(self.output, "{hint}")?,
            }
        }
    }
}
