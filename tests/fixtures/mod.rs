//! Test fixtures for hybrid-router.
//!
//! Provides:
//! - Real named locations (from OpenStreetMap)
//! - Canned provider response bodies
//! - A loopback HTTP server that replays them

#![allow(dead_code)]

pub mod locations;
pub mod responses;
pub mod server;

pub use locations::*;
pub use server::{FixtureServer, RecordedRequest, Reply};
