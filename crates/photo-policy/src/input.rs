//! Normalization of free-form answers into context values.
//!
//! Accepts the spellings people actually type (`Instagram`, `Flyer`,
//! `weiß nicht`, `j`) and maps them onto the closed value sets.

use std::str::FromStr;

use crate::schema::{Channel, ConsentStatus};

/// An answer that could not be mapped onto a known value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("unknown channel '{0}'; expected website, social or print")]
    UnknownChannel(String),

    #[error("unknown consent status '{0}'; expected alle, teilweise or unbekannt")]
    UnknownConsent(String),

    #[error("expected a yes/no answer (j/n), got '{0}'")]
    NotYesNo(String),
}

impl FromStr for Channel {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "web" | "website" | "homepage" | "site" => Ok(Channel::Website),
            "social" | "instagram" | "facebook" | "tiktok" => Ok(Channel::Social),
            "print" | "flyer" | "plakat" | "broschüre" | "broschuere" => Ok(Channel::Print),
            _ => Err(InputError::UnknownChannel(s.trim().to_string())),
        }
    }
}

impl FromStr for ConsentStatus {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "alle" | "voll" | "ja" => Ok(ConsentStatus::Full),
            "teilweise" | "einige" => Ok(ConsentStatus::Partial),
            "unbekannt" | "?" | "weiß nicht" | "weiss nicht" => Ok(ConsentStatus::Unknown),
            _ => Err(InputError::UnknownConsent(s.trim().to_string())),
        }
    }
}

/// Parse a yes/no answer in German or English.
pub fn parse_yes_no(s: &str) -> Result<bool, InputError> {
    match s.trim().to_lowercase().as_str() {
        "j" | "ja" | "y" | "yes" => Ok(true),
        "n" | "nein" | "no" => Ok(false),
        _ => Err(InputError::NotYesNo(s.trim().to_string())),
    }
}
