//! cadence-core — the event-to-timeline engine for kanban flow metrics.
//!
//! The engine consumes a finite, already-fetched stream of work-item
//! lifecycle events (column moves, label changes, assignments) and derives
//! two views:
//!
//! - per-item stage-entry dates plus cumulative blocked time
//!   ([`timeline::IssueTimeline`]), and
//! - a per-day column occupancy matrix over a reporting window
//!   ([`occupancy::OccupancyMatrix`]).
//!
//! [`run::run_issues`] and [`run::run_columns`] orchestrate a full report
//! over a [`source::BoardSource`] implementation.
//!
//! # Conventions
//!
//! - **Errors**: fatal preconditions are typed ([`error::EngineError`]);
//!   source fetches and orchestration seams use `anyhow::Result` and
//!   propagate without retry.
//! - **Logging**: `tracing` macros. Recoverable per-event conditions
//!   (unknown columns, backward moves, unrecognized event kinds) log at
//!   debug/warn and never abort an item.

pub mod board;
pub mod error;
pub mod event;
pub mod label;
pub mod model;
pub mod occupancy;
pub mod report;
pub mod run;
pub mod source;
pub mod timeline;
pub mod window;
