//! W-boson and top-quark candidate combinatorics.
//!
//! Given dressed leptons, neutrinos and tagged jets, assigns decay legs
//! by minimizing the summed distance of candidate masses to the W and
//! top reference masses, then emits the ten-record candidate list that
//! the decay-graph builder links. Unsupported lepton multiplicities,
//! same-sign dileptons and failed searches all yield an empty list.

use particle_id::ParticleID;
use tracing::trace;

use crate::config::PseudoTopConfig;
use crate::kinematics::{FourMomentum, Point};
use crate::particle::{GenJet, GenParticle, Status};

/// Initial best-distance sentinel; only combinations strictly below it
/// are ever selected.
const NO_MATCH: f64 = 1e9;

/// Runs the channel-appropriate combination.
///
/// `b_jet_idxs` and `light_jet_idxs` must be valid positions in `jets`.
/// Returns either nothing or exactly ten records, laid out as t1, t2,
/// W1, b1, lepton, neutrino, W2, b2, leg, leg with the leptonic side
/// first.
pub fn combine(
    leptons: &[GenJet],
    neutrinos: &[GenParticle],
    jets: &[GenJet],
    b_jet_idxs: &[usize],
    light_jet_idxs: &[usize],
    config: &PseudoTopConfig,
    vertex: Point,
) -> Vec<GenParticle> {
    if b_jet_idxs.len() < 2 {
        return Vec::new();
    }

    if leptons.len() == 2 && neutrinos.len() >= 2 {
        dilepton(leptons, neutrinos, jets, b_jet_idxs, config, vertex)
    } else if leptons.len() == 1 && !neutrinos.is_empty() {
        semileptonic(
            leptons,
            neutrinos,
            jets,
            b_jet_idxs,
            light_jet_idxs,
            config,
            vertex,
        )
    } else {
        Vec::new()
    }
}

fn dilepton(
    leptons: &[GenJet],
    neutrinos: &[GenParticle],
    jets: &[GenJet],
    b_jet_idxs: &[usize],
    config: &PseudoTopConfig,
    vertex: Point,
) -> Vec<GenParticle> {
    if leptons[0].charge * leptons[1].charge > 0.0 {
        return Vec::new();
    }
    // Positive-charge side first.
    let (lepton1, lepton2) = if leptons[0].charge > 0.0 {
        (&leptons[0], &leptons[1])
    } else {
        (&leptons[1], &leptons[0])
    };
    let q1 = lepton1.charge;
    let q2 = lepton2.charge;

    let mut dm = NO_MATCH;
    let mut sel_nus = None;
    for (i, nu_i) in neutrinos.iter().enumerate() {
        let dm1 = ((lepton1.p4 + nu_i.p4).mass() - config.w_mass).abs();
        for (j, nu_j) in neutrinos.iter().enumerate() {
            if i == j {
                continue;
            }
            let dm2 = ((lepton2.p4 + nu_j.p4).mass() - config.w_mass).abs();
            let new_dm = dm1 + dm2;
            if new_dm < dm {
                dm = new_dm;
                sel_nus = Some((i, j));
            }
        }
    }
    if dm >= NO_MATCH {
        return Vec::new();
    }
    let Some((sel_nu1, sel_nu2)) = sel_nus else {
        return Vec::new();
    };

    let nu1 = &neutrinos[sel_nu1];
    let nu2 = &neutrinos[sel_nu2];
    let w1_p4 = lepton1.p4 + nu1.p4;
    let w2_p4 = lepton2.p4 + nu2.p4;

    let Some((sel_b1, sel_b2)) = best_b_pair(w1_p4, w2_p4, jets, b_jet_idxs, config.t_mass)
    else {
        return Vec::new();
    };
    trace!(sel_nu1, sel_nu2, sel_b1, sel_b2, "dilepton assignment");

    let b_jet1 = &jets[sel_b1];
    let b_jet2 = &jets[sel_b2];
    let t1_p4 = w1_p4 + b_jet1.p4;
    let t2_p4 = w2_p4 + b_jet2.p4;

    let s1 = q1 as i32;
    let s2 = q2 as i32;
    vec![
        GenParticle::new(q1 * 2.0 / 3.0, t1_p4, vertex, ParticleID::new(s1 * 6), Status::Intermediate),
        GenParticle::new(q2 * 2.0 / 3.0, t2_p4, vertex, ParticleID::new(s2 * 6), Status::Intermediate),
        GenParticle::new(q1, w1_p4, vertex, ParticleID::new(s1 * 24), Status::Intermediate),
        GenParticle::new(-q1 / 3.0, b_jet1.p4, vertex, ParticleID::new(s1 * 5), Status::Stable),
        GenParticle::new(q1, lepton1.p4, vertex, lepton1.pdg_id, Status::Stable),
        GenParticle::new(0.0, nu1.p4, vertex, nu1.pdg_id, Status::Stable),
        GenParticle::new(q2, w2_p4, vertex, ParticleID::new(s2 * 24), Status::Intermediate),
        // The second b leg keeps the first side's charge variable.
        GenParticle::new(-q1 / 3.0, b_jet2.p4, vertex, ParticleID::new(s2 * 5), Status::Stable),
        GenParticle::new(q2, lepton2.p4, vertex, lepton2.pdg_id, Status::Stable),
        GenParticle::new(0.0, nu2.p4, vertex, nu2.pdg_id, Status::Stable),
    ]
}

fn semileptonic(
    leptons: &[GenJet],
    neutrinos: &[GenParticle],
    jets: &[GenJet],
    b_jet_idxs: &[usize],
    light_jet_idxs: &[usize],
    config: &PseudoTopConfig,
    vertex: Point,
) -> Vec<GenParticle> {
    let lepton = &leptons[0];

    let mut dm = NO_MATCH;
    let mut sel = None;
    for (i, nu) in neutrinos.iter().enumerate() {
        let dm1 = ((lepton.p4 + nu.p4).mass() - config.w_mass).abs();
        for (a, &j1) in light_jet_idxs.iter().enumerate() {
            for &j2 in &light_jet_idxs[a + 1..] {
                let dm2 = ((jets[j1].p4 + jets[j2].p4).mass() - config.w_mass).abs();
                let new_dm = dm1 + dm2;
                if new_dm < dm {
                    dm = new_dm;
                    sel = Some((i, j1, j2));
                }
            }
        }
    }
    if dm >= NO_MATCH {
        return Vec::new();
    }
    let Some((sel_nu, sel_j1, sel_j2)) = sel else {
        return Vec::new();
    };

    let nu = &neutrinos[sel_nu];
    let w_jet1 = &jets[sel_j1];
    let w_jet2 = &jets[sel_j2];
    let w1_p4 = lepton.p4 + nu.p4;
    let w2_p4 = w_jet1.p4 + w_jet2.p4;

    let Some((sel_b1, sel_b2)) = best_b_pair(w1_p4, w2_p4, jets, b_jet_idxs, config.t_mass)
    else {
        return Vec::new();
    };
    trace!(sel_nu, sel_j1, sel_j2, sel_b1, sel_b2, "semileptonic assignment");

    let b_jet1 = &jets[sel_b1];
    let b_jet2 = &jets[sel_b2];
    let t1_p4 = w1_p4 + b_jet1.p4;
    let t2_p4 = w2_p4 + b_jet2.p4;

    let q = lepton.charge;
    let s = q as i32;
    vec![
        GenParticle::new(q * 2.0 / 3.0, t1_p4, vertex, ParticleID::new(s * 6), Status::Intermediate),
        GenParticle::new(-q * 2.0 / 3.0, t2_p4, vertex, ParticleID::new(-s * 6), Status::Intermediate),
        GenParticle::new(q, w1_p4, vertex, ParticleID::new(s * 24), Status::Intermediate),
        GenParticle::new(-q / 3.0, b_jet1.p4, vertex, ParticleID::new(s * 5), Status::Stable),
        GenParticle::new(q, lepton.p4, vertex, lepton.pdg_id, Status::Stable),
        GenParticle::new(0.0, nu.p4, vertex, nu.pdg_id, Status::Stable),
        GenParticle::new(-q, w2_p4, vertex, ParticleID::new(-s * 24), Status::Intermediate),
        GenParticle::new(0.0, b_jet2.p4, vertex, ParticleID::new(-s * 5), Status::Stable),
        GenParticle::new(0.0, w_jet1.p4, vertex, ParticleID::new(-2 * s), Status::Stable),
        GenParticle::new(0.0, w_jet2.p4, vertex, ParticleID::new(s), Status::Stable),
    ]
}

/// Ordered b-jet assignment minimizing the summed top-mass distance.
fn best_b_pair(
    w1_p4: FourMomentum,
    w2_p4: FourMomentum,
    jets: &[GenJet],
    b_jet_idxs: &[usize],
    t_mass: f64,
) -> Option<(usize, usize)> {
    let mut dm = NO_MATCH;
    let mut sel = None;
    for &i in b_jet_idxs {
        let dm1 = ((w1_p4 + jets[i].p4).mass() - t_mass).abs();
        for &j in b_jet_idxs {
            if i == j {
                continue;
            }
            let dm2 = ((w2_p4 + jets[j].p4).mass() - t_mass).abs();
            let new_dm = dm1 + dm2;
            if new_dm < dm {
                dm = new_dm;
                sel = Some((i, j));
            }
        }
    }
    if dm >= NO_MATCH {
        return None;
    }
    sel
}
