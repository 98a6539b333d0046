//! Service layer containing business logic and side-effect helpers.
//!
//! ## Service map
//! - `validate.rs` — fence stripping, JSON parsing, strict schema check.
//! - `schema.rs` — compiled policy-rules schema.
//! - `repair.rs` — shape repairs for known model mistakes.
//! - `extract.rs` — extraction pipeline (model -> validate -> repair -> persist).
//! - `model_client.rs` — Ollama-compatible HTTP client.
//! - `storage.rs` — output paths and JSON persistence.
//! - `synth.rs` — synthetic telemetry datasets.
//! - `output.rs` — JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod extract;
pub mod model_client;
pub mod output;
pub mod repair;
pub mod schema;
pub mod storage;
pub mod synth;
pub mod validate;
