//! Seminario - conference seminar schedule service.
//!
//! Loads a static JSON schedule for a two-day seminar, categorizes the
//! entries (talks, workshops, posters, logistical events), and serves
//! rendered day pages plus a small JSON query API.

pub mod cli;
pub mod config;
pub mod models;
pub mod schedule;
pub mod server;
