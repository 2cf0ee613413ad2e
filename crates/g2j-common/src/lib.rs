//! Common types and utilities for the g2j expression lowering engine.
//!
//! This crate provides foundational types used across all g2j crates:
//! - The Java type model (`JavaType`, `PrimitiveType`)
//! - Well-known Java and Groovy class names, Java keywords
//! - Source spans (`Span`)
//! - Lowering limits and thresholds

// Java type model - written verbatim into generated declarations and casts
pub mod types;
pub use types::{JavaType, PrimitiveType};

// Well-known class names and the Java keyword table
pub mod names;

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Centralized limits and thresholds
pub mod limits;
