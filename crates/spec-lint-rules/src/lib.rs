//! # spec-lint-rules
//!
//! Built-in rule sets for spec-lint.
//!
//! ## Presets
//!
//! | Name | Rules |
//! |------|-------|
//! | `recommended` | primary action, text contrast, 14px text, 44px touch targets, input labels, unique CTA, heading, icon alt text, button alignment |
//! | `basic` | 12px minimum and 72px maximum text, text contrast, image names |
//!
//! ## Usage
//!
//! ```ignore
//! use spec_lint_core::RuleEngine;
//! use spec_lint_rules::Preset;
//!
//! let engine = RuleEngine::builder(&document)
//!     .rules(Preset::Recommended.rules())
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod catalogue;
mod presets;

pub use catalogue::{all_rule_types, find_rule_type};
pub use presets::{basic_rules, recommended_rules, Preset};

/// Re-export core types for convenience.
pub use spec_lint_core::{Condition, Rule, RuleTypeInfo, Severity};
