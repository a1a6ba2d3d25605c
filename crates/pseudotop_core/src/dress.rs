//! Lepton dressing.
//!
//! Prompt charged leptons and prompt photons are clustered together with
//! a small cone; each resulting cluster that contains a charged lepton
//! becomes a dressed lepton, a jet-like record carrying the full cluster
//! momentum and the species and charge of its highest-pt charged-lepton
//! constituent.

use std::collections::BTreeSet;

use tracing::debug;

use crate::classify::is_light_lepton;
use crate::cluster::{ClusterJet, JetDefinition, PseudoJet};
use crate::particle::{GenJet, GenParticle};

/// Dresser output.
#[derive(Debug, Clone, Default)]
pub struct DressedLeptons {
    /// Dressed leptons, pt-descending. Constituent links hold the
    /// consumed final-state indices, also pt-descending.
    pub leptons: Vec<GenJet>,
    /// Union of the final-state indices absorbed into accepted dressed
    /// leptons. These must not be clustered again in the jet pass.
    pub consumed: BTreeSet<usize>,
}

/// Clusters the dressing candidates and keeps every cluster inside the
/// eta acceptance that contains at least one charged lepton.
///
/// A cluster failing the acceptance, or containing photons only, is
/// dropped whole and none of its constituents count as consumed.
pub fn dress_leptons(
    final_states: &[GenParticle],
    lepton_idxs: &[usize],
    def: JetDefinition,
    max_eta: f64,
) -> DressedLeptons {
    let mut candidates = Vec::with_capacity(lepton_idxs.len());
    for &i in lepton_idxs {
        let p = &final_states[i];
        let pt = p.pt();
        if !pt.is_finite() || pt <= 0.0 {
            continue;
        }
        candidates.push(PseudoJet::new(p.p4, i));
    }
    let jets = def.cluster(candidates);

    let mut out = DressedLeptons::default();
    for jet in &jets {
        if jet.p4.eta().abs() > max_eta {
            continue;
        }
        let Some(rep) = representative(final_states, jet) else {
            continue;
        };

        let lepton = &final_states[rep];
        let mut constituents = jet.constituents.clone();
        constituents.sort_by(|&a, &b| final_states[b].pt().total_cmp(&final_states[a].pt()));
        out.consumed.extend(constituents.iter().copied());

        out.leptons.push(GenJet {
            p4: jet.p4,
            charge: lepton.charge,
            pdg_id: lepton.pdg_id,
            area: jet.area,
            constituents,
        });
    }

    debug!(
        dressed = out.leptons.len(),
        consumed = out.consumed.len(),
        "dressed leptons"
    );
    out
}

/// Highest-pt charged-lepton constituent; the first seen wins a pt tie.
fn representative(final_states: &[GenParticle], jet: &ClusterJet) -> Option<usize> {
    let mut best = None;
    let mut max_pt = -1.0;
    for &idx in &jet.constituents {
        let cand = &final_states[idx];
        if !is_light_lepton(cand.pdg_id.abs()) {
            continue;
        }
        if cand.pt() > max_pt {
            max_pt = cand.pt();
            best = Some(idx);
        }
    }
    best
}
