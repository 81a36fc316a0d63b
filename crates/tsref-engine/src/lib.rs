//! Whole-program symbol reference resolution.
//!
//! Given an immutable program snapshot and a byte position, the engine
//! answers Find All References, Rename, and Find Implementations
//! queries. It owns the search orchestration (candidate scanning, scope
//! classification, symbol widening, module-graph tracing, class
//! hierarchy walks) and delegates name resolution to the checker and
//! module-graph collaborators in the snapshot.
//!
//! Results are deterministic: grouped by definition, ordered by file
//! (in snapshot order), then span start, then span length, with no
//! duplicate (symbol, location) pairs.

pub mod api;
pub mod core;
pub mod entry;
pub mod error;
pub mod imports;
pub mod inherit;
pub mod options;
pub mod scanner;
pub mod scope;
pub mod special;
pub mod state;
pub mod widen;

pub use api::{
    DefinitionInfo, DefinitionKind, ImplementationLocation, ReferenceInfo, ReferencedSymbol,
    RenameLocation, find_implementations, find_references, find_rename_locations,
};
pub use core::find_all_references;
pub use entry::{Definition, Entry, NodeEntryKind, SymbolAndEntries};
pub use error::{QueryError, Result};
pub use options::{FindReferencesOptions, ReferenceUse};
pub use scope::SymbolScope;
