//! Particle and jet records.
//!
//! Input records are read-only views of the event supplied by the hosting
//! framework; mother/daughter indices refer to the event's own particle
//! arena. Output records are fresh copies whose link sets are scoped to
//! the output collection they live in.

use particle_id::ParticleID;

use crate::kinematics::{FourMomentum, Point};

/// Generator-level status of a particle record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Stable final-state particle (code 1).
    Stable,
    /// Decayed particle (code 2).
    Decayed,
    /// Intermediate resonance or documentation entry (code 3). Also the
    /// status assigned to reconstructed tops and W bosons.
    Intermediate,
    /// Incident beam particle (code 4).
    Beam,
    /// Any other generator-specific code.
    Other(i32),
}

impl Status {
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => Status::Stable,
            2 => Status::Decayed,
            3 => Status::Intermediate,
            4 => Status::Beam,
            c => Status::Other(c),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Status::Stable => 1,
            Status::Decayed => 2,
            Status::Intermediate => 3,
            Status::Beam => 4,
            Status::Other(c) => *c,
        }
    }

    pub fn is_stable(&self) -> bool {
        matches!(self, Status::Stable)
    }
}

/// A generated-particle record.
///
/// Charges are physical fractional values (a top quark carries ±2/3, a
/// b quark ∓1/3), not truncated integers.
#[derive(Debug, Clone, PartialEq)]
pub struct GenParticle {
    pub p4: FourMomentum,
    pub charge: f64,
    pub pdg_id: ParticleID,
    pub status: Status,
    pub vertex: Point,
    pub mothers: Vec<usize>,
    pub daughters: Vec<usize>,
}

impl GenParticle {
    /// A record with empty mother/daughter link sets.
    pub fn new(
        charge: f64,
        p4: FourMomentum,
        vertex: Point,
        pdg_id: ParticleID,
        status: Status,
    ) -> Self {
        Self {
            p4,
            charge,
            pdg_id,
            status,
            vertex,
            mothers: Vec::new(),
            daughters: Vec::new(),
        }
    }

    pub fn pt(&self) -> f64 {
        self.p4.pt()
    }
}

/// A jet-like record: a dressed lepton or a hadronic jet.
///
/// `constituents` holds the event-universe indices of every input
/// clustered into this object, ghost entries included. b-tagged jets
/// carry species code 5; dressed leptons carry their representative
/// lepton's code and charge.
#[derive(Debug, Clone, PartialEq)]
pub struct GenJet {
    pub p4: FourMomentum,
    pub charge: f64,
    pub pdg_id: ParticleID,
    pub area: f64,
    pub constituents: Vec<usize>,
}

impl GenJet {
    pub fn pt(&self) -> f64 {
        self.p4.pt()
    }
}
