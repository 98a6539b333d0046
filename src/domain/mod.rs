//! Shared data model layer (structs only).
//!
//! ## Purpose
//! - Keep report and dataset record structs in one place.
//! - Make `--json` output and CSV column changes explicit and reviewable.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/network side effects.
//!
//! ## Compatibility note
//! Report structs back the `--json` outputs; keep them in sync with
//! `docs/contracts/*`. Record field order is the CSV column order.

pub mod models;
