//! # photo-policy
//!
//! Decision engine for the foto-check tool.  This crate loads the rule
//! configuration, matches a [`PhotoContext`] against the ordered rule list
//! and scores the photo's sensitivity independently of the decision.
//!
//! The output is advisory; nothing here publishes or blocks anything.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use photo_policy::{loader, Channel, ConsentStatus, PhotoContext};
//!
//! let config = loader::load_policy("config.json").unwrap();
//! let ctx = PhotoContext {
//!     minors: false,
//!     identifiable: true,
//!     group_photo: true,
//!     prominent_subject: false,
//!     channel: Channel::Website,
//!     consent_status: ConsentStatus::Full,
//! };
//! let decision = photo_policy::evaluate(&ctx, &config);
//! let sensitivity = photo_policy::calculate_sensitivity(&ctx);
//! println!("{} ({})", decision.message, sensitivity.tier);
//! ```

mod decision;
mod evaluator;
mod input;
mod legal;
pub mod loader;
pub mod matcher;
mod schema;
mod sensitivity;

// Re-export primary public API at crate root.
pub use decision::{PolicyDecision, DEFAULT_ALLOW_MESSAGE};
pub use evaluator::{apply_rules, base_reasons, evaluate};
pub use input::{parse_yes_no, InputError};
pub use legal::resolve_legal_refs;
pub use schema::{
    Channel, ConsentStatus, Decision, LegalRef, PhotoContext, PolicyConfig, PolicyRule,
    RuleConditions,
};
pub use sensitivity::{calculate_sensitivity, Sensitivity, SensitivityTier};
