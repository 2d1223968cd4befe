//! Layer 5: Adapters
//!
//! # Purpose
//!
//! This layer lifts the per-series algorithms to whole fields:
//! - Surrogate realizations of a bound field
//! - Phase extraction, conditional statistics and ensembles
//! - Seasonal components and their (re)application
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Adapters ← You are here
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Phase analysis pipeline.
pub mod analysis;

/// Seasonality record and collaborator trait.
pub mod seasonality;

/// Surrogate generator.
pub mod surrogates;
