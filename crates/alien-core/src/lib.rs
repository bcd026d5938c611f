//! Core types and definitions for the ALIEN platformer simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry, collision math, input, events, the level document and
//! tuning constants. It has no dependency on any rendering or transport.

pub mod collision;
pub mod constants;
pub mod editor;
pub mod enums;
pub mod events;
pub mod input;
pub mod level;
pub mod types;
