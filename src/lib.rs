//! CareNest: maternal and infant care tracking.
//!
//! REST API over an embedded sled document store: accounts with JWT auth,
//! baby profiles, feeding/sleep logs, vaccination and milestone schedules,
//! a static nutrition guide, cycle/pregnancy dashboards, and AI assistant
//! endpoints proxied to external workflow webhooks.

pub mod auth;
pub mod config;
pub mod cycle;
pub mod models;
pub mod nutrition;
pub mod rest;
pub mod schedule;
pub mod storage;
pub mod webhook;
