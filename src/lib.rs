//! Simulation core for a single-screen alien shooter.
//!
//! The library owns every rule of the game: entity movement, collisions,
//! the sweeping alien formation and the score/lives bookkeeping.  The
//! binary is a thin terminal shell that feeds [`input::Input`] events in,
//! calls [`compute::Simulation::tick`] at a fixed rate and draws the
//! [`snapshot::Snapshot`] it gets back.

pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod formation;
pub mod input;
pub mod snapshot;
pub mod state;
