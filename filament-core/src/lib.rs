//! Core library for a generative branching-line ("filament") animation.
//!
//! Lines grow from the border of a rectangular canvas toward its
//! center, pause, retract, and may split into child lines partway
//! through retraction. The crate is pure state: a host supplies frame
//! timestamps and draws the resulting segments.
//!
//! Main components:
//! - [`math`] — rotation helpers and the quartic ease-in-out curve.
//! - [`line`] — a single animated segment and its lifecycle state.
//! - [`config`] — tunable parameters for spawning and branching.
//! - [`engine`] — the animation engine driving spawn, update, branch
//!   and removal.

pub mod config;
pub mod engine;
pub mod line;
pub mod math;
