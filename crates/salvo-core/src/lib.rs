//! Core types and definitions for the SALVO combat simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! fixed-point geometry, components, weapon rules, commands, events and
//! constants. It has no dependency on the ECS or any random source.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod rules;
pub mod state;
pub mod types;
