//! Layer 4: Engine
//!
//! # Purpose
//!
//! This layer orchestrates grid execution:
//! - The executor trait and the sequential executor
//! - Parameter and shape validation
//! - Result tables and the persistence record
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Adapters
//!   ↓
//! Layer 4: Engine ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Grid executor trait and sequential executor.
pub mod executor;

/// Result tables and record.
pub mod output;

/// Validation logic.
pub mod validator;
