//! The `pseudotop_core` crate reconstructs top-quark-pair candidates from
//! generator-level final states, using only visible, detector-agnostic
//! objects. Each event runs through a fixed pipeline: particle
//! classification, lepton dressing, jet building with ghost b-hadron
//! tagging, W/top mass-minimizing combinatorics, and decay-graph linking.
//!
//! Key components:
//! - **`reconstruct`**: the per-event pipeline and its output collections.
//! - **`cluster`**: generalized-kt sequential recombination shared by the
//!   lepton dresser and the jet builder.
//! - **`combine`**: decay-leg assignment by mass minimization for the
//!   dilepton and semileptonic channels.
//! - **`config`**: validated run configuration (thresholds, cone sizes,
//!   reference masses).

pub mod classify;
pub mod cluster;
pub mod combine;
pub mod config;
pub mod dress;
pub mod graph;
pub mod jets;
pub mod kinematics;
pub mod particle;
pub mod reconstruct;

pub use cluster::{JetAlgorithm, JetDefinition};
pub use config::PseudoTopConfig;
pub use kinematics::{FourMomentum, Point};
pub use particle::{GenJet, GenParticle, Status};
pub use reconstruct::{DecayChannel, PseudoTopEvent, PseudoTopReconstructor};
