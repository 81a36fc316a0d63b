//! Arena-backed AST data model for the tsref reference engine.
//!
//! This crate provides:
//! - Syntax kinds and modifier flags (`SyntaxKind`, `modifier_flags`)
//! - The node arena and typed payload accessors (`NodeArena`)
//! - Source files with per-file name tables (`SourceFile`, `NameTable`)
//! - A host-facing builder for assembling program snapshots
//!   (`AstBuilder`) in place of the external parser collaborator

pub mod syntax;
pub use syntax::{SyntaxKind, char_info, modifier_flags};

pub mod node;
pub use node::{FileId, Node, NodeIndex, Payload};

pub mod arena;
pub use arena::NodeArena;

pub mod source_file;
pub use source_file::{FileReference, NameTable, NameTableValue, SourceFile};

pub mod builder;
pub use builder::AstBuilder;
