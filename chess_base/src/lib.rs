//! # Base types for kingsafe
//!
//! This is an auxiliary crate for `kingsafe`, which contains the value types shared by the
//! whole engine: colors, pieces, squares, cells and board geometry.
//!
//! Normally you don't want to use this crate directly. Use `kingsafe` instead.

pub mod bitboard;
pub mod geometry;
pub mod types;
