//! # ScrubLens
//!
//! **Redact first, disclose second.**
//!
//! ScrubLens takes raw captured HTTP request/response text, strips or
//! describes fields that carry credentials or session material, and produces
//! both a sanitized exchange suitable for disclosure to an AI analysis
//! service and a structured account of exactly what was changed, so the
//! operator can audit the disclosure before it happens.
//!
//! ## Architecture
//!
//! - **[`sanitize`]** — line-by-line message sanitizer with cookie analysis,
//!   sensitive-header redaction, and body size ceiling
//! - **[`report`]** — disclosure report builder: audit summary + analysis prompt
//! - **[`provider`]** — outbound AI transport (Claude Messages API)
//! - **[`history`]** — SQLite-backed log of past analyses with JSON/CSV export
//! - **[`config`]** — TOML configuration with env-var substitution
//! - **[`cli`]** — command-line interface (clap)
//! - **[`error`]** — unified error types using `thiserror`
//!
//! ## Quick Start
//!
//! ```bash
//! # Initialize configuration
//! scrublens init
//!
//! # Preview what would be disclosed
//! scrublens analyze --request req.txt --response resp.txt --dry-run
//!
//! # Run the analysis
//! export ANTHROPIC_API_KEY=sk-ant-...
//! scrublens analyze --request req.txt --response resp.txt --mode vulnerability-scan
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod provider;
pub mod report;
pub mod sanitize;
