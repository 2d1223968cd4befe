//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the data containers, grid coordinates, rank utilities
//! and error type used throughout the crate. It has zero internal
//! dependencies within the crate.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Adapters
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Shared error types.
pub mod errors;

/// Gridded field container and grid coordinates.
pub mod field;

/// Argsort and rank-scatter helpers.
pub mod sorting;
