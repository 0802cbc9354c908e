//! Manus Core
//!
//! Core types shared by the Manus gateway client and the CLI.
//!
//! This crate contains:
//! - Domain types: task handles, statuses, states and polling outcomes
//! - DTOs: request bodies sent to the gateway
//! - Field resolution helpers for loosely-shaped gateway responses

pub mod domain;
pub mod dto;
pub mod fields;
