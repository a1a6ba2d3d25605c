//! Particle-level jet building with ghost b-hadron tagging.
//!
//! Every stable final-state record that is neither a neutrino nor already
//! absorbed into a dressed lepton is clustered, together with one ghost
//! per identified b-hadron. A ghost keeps the hadron's direction but its
//! three-momentum is shrunk to a negligible magnitude, so it decides
//! constituent membership without altering jet kinematics.

use std::collections::BTreeSet;

use particle_id::sm_elementary_particles::bottom;
use particle_id::ParticleID;
use tracing::debug;

use crate::classify::is_neutrino;
use crate::cluster::{JetDefinition, PseudoJet};
use crate::particle::{GenJet, GenParticle};

/// Three-momentum magnitude given to b-hadron ghosts.
const GHOST_MOMENTUM: f64 = 1e-20;

/// Jet-builder output.
#[derive(Debug, Clone, Default)]
pub struct BuiltJets {
    /// Accepted jets, pt-descending.
    pub jets: Vec<GenJet>,
    /// Positions in `jets` of the b-tagged members.
    pub b_jet_idxs: Vec<usize>,
    /// Positions in `jets` of the untagged members.
    pub light_jet_idxs: Vec<usize>,
}

/// Clusters the remaining final state and splits the accepted jets by
/// b-hadron ghost content.
///
/// A jet is b-tagged when any of its constituent indices is in
/// `b_hadron_idxs`. Records without a finite positive pt never enter the
/// clustering, which also keeps the ghost rescaling away from a zero
/// momentum.
pub fn build_jets(
    final_states: &[GenParticle],
    gen_particles: &[GenParticle],
    consumed: &BTreeSet<usize>,
    b_hadron_idxs: &BTreeSet<usize>,
    def: JetDefinition,
    max_eta: f64,
) -> BuiltJets {
    let mut inputs = Vec::with_capacity(final_states.len() + b_hadron_idxs.len());
    for (i, p) in final_states.iter().enumerate() {
        if !p.status.is_stable() {
            continue;
        }
        let pt = p.pt();
        if !pt.is_finite() || pt <= 0.0 {
            continue;
        }
        if is_neutrino(p.pdg_id.abs()) {
            continue;
        }
        if consumed.contains(&i) {
            continue;
        }
        inputs.push(PseudoJet::new(p.p4, i));
    }
    for &idx in b_hadron_idxs {
        let Some(p) = gen_particles.get(idx) else {
            continue;
        };
        let pt = p.pt();
        if !pt.is_finite() || pt <= 0.0 {
            continue;
        }
        let scale = GHOST_MOMENTUM / p.p4.p();
        inputs.push(PseudoJet::new(p.p4.scaled(scale), idx));
    }

    let clustered = def.cluster(inputs);

    let mut out = BuiltJets::default();
    for jet in clustered {
        if jet.p4.eta().abs() > max_eta {
            continue;
        }
        let has_b_hadron = jet.constituents.iter().any(|i| b_hadron_idxs.contains(i));
        if has_b_hadron {
            out.b_jet_idxs.push(out.jets.len());
        } else {
            out.light_jet_idxs.push(out.jets.len());
        }
        out.jets.push(GenJet {
            p4: jet.p4,
            charge: 0.0,
            pdg_id: if has_b_hadron { bottom } else { ParticleID::new(0) },
            area: jet.area,
            constituents: jet.constituents,
        });
    }

    debug!(
        jets = out.jets.len(),
        b_tagged = out.b_jet_idxs.len(),
        "built jets"
    );
    out
}

#[cfg(test)]
mod tests {
    use super::build_jets;
    use crate::cluster::{JetAlgorithm, JetDefinition};
    use crate::kinematics::{from_pt_eta_phi_m, FourMomentum, Point};
    use crate::particle::{GenParticle, Status};
    use particle_id::sm_elementary_particles::bottom;
    use particle_id::ParticleID;
    use std::collections::BTreeSet;

    fn jet_def() -> JetDefinition {
        JetDefinition {
            algorithm: JetAlgorithm::AntiKt,
            radius: 0.4,
            min_pt: 30.0,
        }
    }

    fn record(pdg: i32, status: Status, pt: f64, eta: f64, phi: f64) -> GenParticle {
        GenParticle::new(
            0.0,
            from_pt_eta_phi_m(pt, eta, phi, 0.0),
            Point::default(),
            ParticleID::new(pdg),
            status,
        )
    }

    #[test]
    fn ghost_tags_without_shifting_the_jet() {
        let universe = vec![
            record(211, Status::Stable, 50.0, 0.1, 0.1),
            record(511, Status::Decayed, 30.0, 0.12, 0.12),
        ];
        let b_hadrons = BTreeSet::from([1]);
        let out = build_jets(
            &universe,
            &universe,
            &BTreeSet::new(),
            &b_hadrons,
            jet_def(),
            2.4,
        );

        assert_eq!(out.jets.len(), 1);
        assert_eq!(out.b_jet_idxs, vec![0]);
        assert!(out.light_jet_idxs.is_empty());
        let jet = &out.jets[0];
        assert_eq!(jet.pdg_id, bottom);
        assert!((jet.pt() - 50.0).abs() < 1e-9);
        assert!(jet.constituents.contains(&1));
    }

    #[test]
    fn neutrinos_and_consumed_records_stay_out() {
        let universe = vec![
            record(211, Status::Stable, 60.0, 0.0, 0.0),
            record(14, Status::Stable, 40.0, 0.05, 0.05),
            record(11, Status::Stable, 35.0, -0.05, -0.05),
        ];
        let consumed = BTreeSet::from([2]);
        let out = build_jets(
            &universe,
            &universe,
            &consumed,
            &BTreeSet::new(),
            jet_def(),
            2.4,
        );

        assert_eq!(out.jets.len(), 1);
        assert!((out.jets[0].pt() - 60.0).abs() < 1e-9);
        assert_eq!(out.jets[0].constituents, vec![0]);
    }

    #[test]
    fn forward_jets_fail_the_acceptance() {
        let universe = vec![record(211, Status::Stable, 80.0, 3.0, 0.0)];
        let out = build_jets(
            &universe,
            &universe,
            &BTreeSet::new(),
            &BTreeSet::new(),
            jet_def(),
            2.4,
        );

        assert!(out.jets.is_empty());
    }

    #[test]
    fn lone_ghost_never_forms_a_jet() {
        let universe = vec![
            record(211, Status::Stable, 50.0, 0.0, 0.0),
            record(521, Status::Decayed, 25.0, 0.0, 3.0),
        ];
        let b_hadrons = BTreeSet::from([1]);
        let out = build_jets(
            &universe,
            &universe,
            &BTreeSet::new(),
            &b_hadrons,
            jet_def(),
            2.4,
        );

        assert_eq!(out.jets.len(), 1);
        assert_eq!(out.light_jet_idxs, vec![0]);
        assert_eq!(out.jets[0].pdg_id, ParticleID::new(0));
    }

    #[test]
    fn longitudinal_records_are_skipped() {
        let mut along_beam = record(211, Status::Stable, 0.0, 0.0, 0.0);
        along_beam.p4 = FourMomentum::new(0.0, 0.0, 100.0, 100.0);
        let universe = vec![along_beam, record(211, Status::Stable, 45.0, 1.0, 1.0)];
        let out = build_jets(
            &universe,
            &universe,
            &BTreeSet::new(),
            &BTreeSet::new(),
            jet_def(),
            2.4,
        );

        assert_eq!(out.jets.len(), 1);
        assert!((out.jets[0].pt() - 45.0).abs() < 1e-9);
    }

    #[test]
    fn index_lists_agree_with_the_pt_ordering() {
        let universe = vec![
            record(211, Status::Stable, 40.0, -1.0, 1.0),
            record(211, Status::Stable, 90.0, 1.0, -2.0),
            record(511, Status::Decayed, 10.0, -1.0, 1.0),
        ];
        let b_hadrons = BTreeSet::from([2]);
        let out = build_jets(
            &universe,
            &universe,
            &BTreeSet::new(),
            &b_hadrons,
            jet_def(),
            2.4,
        );

        assert_eq!(out.jets.len(), 2);
        assert!(out.jets[0].pt() > out.jets[1].pt());
        assert_eq!(out.b_jet_idxs, vec![1]);
        assert_eq!(out.light_jet_idxs, vec![0]);
        assert_eq!(out.jets[1].pdg_id, bottom);
    }
}
