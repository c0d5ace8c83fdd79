//! The reports REST API routes.
//!
//! # Routes
//!
//! - [`GET /api`](report::get_report) - the campaign report for a date period

pub mod report;
