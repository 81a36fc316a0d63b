//! Common types and utilities for the tsref reference engine.
//!
//! This crate provides foundational types used across all tsref crates:
//! - Source spans (`Span`) over byte offsets
//! - Position/Range types for line/column source locations (`LineMap`)
//! - Cooperative cancellation (`CancellationToken`)

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Position/Range types for line/column source locations
pub mod position;
pub use position::{LineMap, Location, Position, Range};

// Cooperative cancellation for long-running queries
pub mod cancellation;
pub use cancellation::CancellationToken;
