//! Particle classification over the generated and final-state sets.
//!
//! Tags the b-hadrons used for jet flavor tagging, routes stable records
//! into lepton-dressing candidates and output neutrinos, and filters out
//! everything descended from a hadron or the incident beam.

use std::collections::BTreeSet;

use particle_id::sm_elementary_particles::{electron, muon, photon};
use particle_id::ParticleID;
use tracing::{debug, warn};

use crate::particle::{GenParticle, Status};

const ELECTRON_NEUTRINO: ParticleID = ParticleID::new(12);
const MUON_NEUTRINO: ParticleID = ParticleID::new(14);
const TAU_NEUTRINO: ParticleID = ParticleID::new(16);

/// Ancestry walks deeper than this are treated as malformed input.
const MAX_ANCESTRY_DEPTH: usize = 1024;

pub(crate) fn is_light_lepton(id: ParticleID) -> bool {
    id == electron || id == muon
}

pub(crate) fn is_photon(id: ParticleID) -> bool {
    id == photon
}

pub(crate) fn is_neutrino(id: ParticleID) -> bool {
    id == ELECTRON_NEUTRINO || id == MUON_NEUTRINO || id == TAU_NEUTRINO
}

/// Digit test for bottom-flavored hadron species codes.
///
/// Composite codes carry their quark content in digit positions 2-4
/// (counting from the units digit); a code is bottom-flavored when the
/// innermost content digit is set and the leading content digits read
/// "05" (B mesons) or "5" (B baryons). Fundamental particles (<= 100) and
/// nuclear codes (>= 1e9) never qualify.
pub fn is_b_hadron_id(id: ParticleID) -> bool {
    let code = id.id().unsigned_abs();
    if code <= 100 {
        return false;
    }
    if code >= 1_000_000_000 {
        return false;
    }

    let nq3 = (code / 10) % 10;
    let nq2 = (code / 100) % 10;
    let nq1 = (code / 1000) % 10;

    if nq3 == 0 {
        return false; // diquarks
    }
    if nq1 == 0 && nq2 == 5 {
        return true; // B mesons
    }
    if nq1 == 5 {
        return true; // B baryons
    }

    false
}

/// True when the record at `index` passes the digit test and none of its
/// direct daughters does. An excited B* decaying to B0 + photon is
/// rejected here in favor of the B0.
pub fn is_b_hadron(universe: &[GenParticle], index: usize) -> bool {
    let Some(p) = universe.get(index) else {
        return false;
    };
    if !is_b_hadron_id(p.pdg_id) {
        return false;
    }
    !p.daughters
        .iter()
        .any(|&d| universe.get(d).is_some_and(|dau| is_b_hadron_id(dau.pdg_id)))
}

/// True when any ancestor of `particle`, other than an incident-beam
/// record (one with no mothers of its own), carries a composite species
/// code (abs > 100).
pub fn is_from_hadron(universe: &[GenParticle], particle: &GenParticle) -> bool {
    particle
        .mothers
        .iter()
        .any(|&m| has_hadron_ancestor(universe, m, 0))
}

fn has_hadron_ancestor(universe: &[GenParticle], index: usize, depth: usize) -> bool {
    if depth >= MAX_ANCESTRY_DEPTH {
        warn!(index, "ancestry walk exceeded depth cap, treating record as hadron-descended");
        return true;
    }
    let Some(mother) = universe.get(index) else {
        return false;
    };
    if mother.mothers.is_empty() {
        return false; // incident beam
    }
    if mother.pdg_id.id().abs() > 100 {
        return true;
    }
    mother
        .mothers
        .iter()
        .any(|&g| has_hadron_ancestor(universe, g, depth + 1))
}

/// Classifier output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    /// Indices of the lowest-generation b-hadrons in the generated set,
    /// in ascending order.
    pub b_hadron_idxs: BTreeSet<usize>,
    /// Final-state indices of charged leptons and photons eligible for
    /// dressing.
    pub lepton_idxs: Vec<usize>,
    /// Output neutrino records, strictly pt-descending.
    pub neutrinos: Vec<GenParticle>,
}

/// Runs both classification passes.
///
/// `final_states` and `gen_particles` must index into the same
/// event-particle universe; mother/daughter links of either resolve in
/// `gen_particles`.
pub fn classify(final_states: &[GenParticle], gen_particles: &[GenParticle]) -> Classification {
    let mut b_hadron_idxs = BTreeSet::new();
    for (i, p) in gen_particles.iter().enumerate() {
        if p.status.is_stable() {
            continue;
        }
        if is_b_hadron(gen_particles, i) {
            b_hadron_idxs.insert(i);
        }
    }

    let mut lepton_idxs = Vec::new();
    let mut neutrinos = Vec::new();
    for (i, p) in final_states.iter().enumerate() {
        if !p.status.is_stable() {
            continue;
        }
        // Skip orphans, and anything fed directly by the incident beam.
        let Some(&first_mother) = p.mothers.first() else {
            continue;
        };
        if gen_particles
            .get(first_mother)
            .is_some_and(|m| m.status == Status::Beam)
        {
            continue;
        }
        if is_from_hadron(gen_particles, p) {
            continue;
        }

        let abs_id = p.pdg_id.abs();
        if is_light_lepton(abs_id) || is_photon(abs_id) {
            lepton_idxs.push(i);
        } else if is_neutrino(abs_id) {
            neutrinos.push(GenParticle::new(
                p.charge,
                p.p4,
                p.vertex,
                p.pdg_id,
                Status::Stable,
            ));
        }
    }

    neutrinos.sort_by(|a, b| b.pt().total_cmp(&a.pt()));

    debug!(
        b_hadrons = b_hadron_idxs.len(),
        lepton_candidates = lepton_idxs.len(),
        neutrinos = neutrinos.len(),
        "classified event"
    );

    Classification {
        b_hadron_idxs,
        lepton_idxs,
        neutrinos,
    }
}
