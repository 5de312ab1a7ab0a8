//! # Base types for tilechess
//!
//! This is an auxiliary crate for `tilechess`, which contains the board geometry and the piece model.
//!
//! Normally you don't want to use this crate directly. Use `tilechess` instead.

pub mod geometry;
pub mod tileset;
pub mod types;
