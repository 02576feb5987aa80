//! Back-office platform for service-provider relationships.
//!
//! Tracks jobs run at service providers, the orders account managers
//! place for their customers, and produces quarterly statistics reports
//! over both (see [`stats`]).

#![allow(missing_docs)]

pub mod api;
pub mod app;
pub mod boot;
pub mod cli;
pub mod commands;
pub mod config;
pub mod database;
pub mod environment;
pub mod router;
pub mod setup_tracing;
pub mod stats;
