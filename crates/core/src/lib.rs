//! Core export logic for Tessera.
//!
//! This crate contains pure business logic with ZERO web dependencies.
//! Report handlers, the registry they are registered into, and the export
//! wizard all live here.
//!
//! # Modules
//!
//! - `export` - report registry and the two-step export wizard

pub mod export;
