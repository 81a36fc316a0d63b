//! Symbol model and collaborator interfaces for the tsref reference
//! engine.
//!
//! This crate provides:
//! - Symbols and kind flags (`Symbol`, `SymbolArena`, `symbol_flags`)
//! - Semantic meanings for position/symbol intersection (`meaning`)
//! - The type-checker facade the engine consumes (`Checker`,
//!   `TableChecker`)
//! - The module-graph collaborator interface (`ModuleGraph`,
//!   `ModuleReferences`)
//! - The per-query program snapshot (`Snapshot`)

pub mod symbol;
pub use symbol::{Symbol, SymbolArena, SymbolId, symbol_flags};

pub mod meaning;
pub use meaning::{meaning_at_location, meaning_of_symbol, semantic_meaning};

pub mod checker;
pub use checker::{Checker, TableChecker, TypeId};

pub mod exports;
pub use exports::{ExportKind, ImportExport, ModuleGraph, ModuleReferences, TableModuleGraph};

pub mod snapshot;
pub use snapshot::Snapshot;
