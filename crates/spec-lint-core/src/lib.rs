//! # spec-lint-core
//!
//! Core engine for linting design canvases against declarative rules.
//!
//! This crate provides:
//!
//! - [`CanvasHost`] trait for reading a canvas tree, and [`Document`], an
//!   in-memory host built from a JSON snapshot
//! - [`Rule`] with a typed [`Condition`] per rule type, loaded from JSON by
//!   [`declarative::load_rules_from_json`]
//! - [`checks`], one checker per rule type
//! - [`RuleEngine`] for evaluating rules into a scored [`LintReport`]
//! - [`contrast`], WCAG 2.1 contrast math and per-node analysis
//!
//! ## Example
//!
//! ```ignore
//! use spec_lint_core::{declarative, Document, RuleEngine};
//!
//! let doc = Document::from_json(&std::fs::read_to_string("screen.json")?)?;
//! let rules = declarative::load_rules_from_json(&std::fs::read_to_string("rules.json")?)?;
//!
//! let engine = RuleEngine::builder(&doc).rules(rules).build()?;
//! let report = engine.scan_selection()?;
//! println!("{}", report.summary());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod engine;
mod node;
mod rule;
mod types;

pub mod checks;
pub mod contrast;
pub mod declarative;
pub mod document;

pub use checks::{rule_types, Check, RuleTypeInfo, ScanContext};
pub use config::{Config, ConfigError, EngineConfig, Proximity, RuleConfig};
pub use document::{Document, DocumentError};
pub use engine::{RuleEngine, RuleEngineBuilder, ScanError};
pub use node::{
    collect_nodes, CanvasHost, Fills, FontSize, Node, NodeId, NodeKind, NormalizedColor, Paint,
    PaintKind,
};
pub use rule::{CheckError, Condition, Rule};
pub use types::{AffectedNode, Finding, LintReport, Severity, Status};
