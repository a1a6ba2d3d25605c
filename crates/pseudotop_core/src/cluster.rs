//! Sequential-recombination jet clustering.
//!
//! The pipeline consumes clustering as a capability: given four-momenta
//! and a radius/metric, return jets with constituent membership and area.
//! The implementation here is plain E-scheme generalized-kt recombination;
//! it tracks which inputs were merged into which jet, which is what the
//! lepton dresser and the ghost-based flavor tagging hinge on. No area
//! estimation is performed, so every jet reports area 0.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::kinematics::FourMomentum;

#[derive(Debug, Clone, Error)]
#[error("unknown jet algorithm: {0:?}")]
pub struct UnknownJetAlgorithm(String);

/// Distance families of the generalized-kt sequential recombination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JetAlgorithm {
    /// Distance favoring hard objects; produces cone-like jets.
    AntiKt,
    /// Purely geometric distance.
    CambridgeAachen,
    /// Distance favoring soft objects.
    Kt,
}

impl JetAlgorithm {
    /// Momentum scale kt^(2p) entering both the pairwise and the beam
    /// distance: p = -1 (anti-kt), 0 (Cambridge/Aachen), +1 (kt).
    fn momentum_scale(self, p4: &FourMomentum) -> f64 {
        match self {
            JetAlgorithm::AntiKt => 1.0 / p4.pt2(),
            JetAlgorithm::CambridgeAachen => 1.0,
            JetAlgorithm::Kt => p4.pt2(),
        }
    }
}

impl FromStr for JetAlgorithm {
    type Err = UnknownJetAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "anti-kt" | "anti_kt" | "antikt" => Ok(Self::AntiKt),
            "cambridge-aachen" | "cambridge_aachen" | "cambridge/aachen" => {
                Ok(Self::CambridgeAachen)
            }
            "kt" => Ok(Self::Kt),
            _ => Err(UnknownJetAlgorithm(s.to_owned())),
        }
    }
}

/// A jet definition: distance family, cone radius and the minimum
/// transverse momentum below which clusters are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JetDefinition {
    pub algorithm: JetAlgorithm,
    pub radius: f64,
    pub min_pt: f64,
}

/// A clustering input: a four-momentum tagged with the index of the event
/// record it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PseudoJet {
    pub p4: FourMomentum,
    pub user_index: usize,
}

impl PseudoJet {
    pub fn new(p4: FourMomentum, user_index: usize) -> Self {
        Self { p4, user_index }
    }
}

/// A clustered jet carrying the user indices of every merged input.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterJet {
    pub p4: FourMomentum,
    /// Jet area; 0 when the clustering ran without area estimation.
    pub area: f64,
    pub constituents: Vec<usize>,
}

/// Working entry of the recombination loop: current recombined momentum
/// with cached geometry and the inputs merged so far.
struct Slot {
    p4: FourMomentum,
    rap: f64,
    phi: f64,
    scale: f64,
    constituents: Vec<usize>,
}

impl Slot {
    fn new(input: PseudoJet, algorithm: JetAlgorithm) -> Self {
        Self {
            p4: input.p4,
            rap: input.p4.rapidity(),
            phi: input.p4.phi(),
            scale: algorithm.momentum_scale(&input.p4),
            constituents: vec![input.user_index],
        }
    }

    fn geom2(&self, other: &Slot) -> f64 {
        let dy = self.rap - other.rap;
        let mut dphi = (self.phi - other.phi).abs();
        if dphi > std::f64::consts::PI {
            dphi = 2.0 * std::f64::consts::PI - dphi;
        }
        dy * dy + dphi * dphi
    }
}

impl JetDefinition {
    /// Runs the recombination to completion and returns the jets passing
    /// the minimum-pt cut, ordered by decreasing transverse momentum.
    ///
    /// Each iteration scans every surviving pair for the smallest
    /// `d_ij = min(kti^2p, ktj^2p) * dR_ij^2 / R^2` and every survivor for
    /// the smallest beam distance `d_iB = kti^2p`; the smaller of the two
    /// either merges the pair (E-scheme) or promotes the entry to a
    /// finished jet. Ties resolve to the first candidate in scan order.
    pub fn cluster(&self, inputs: Vec<PseudoJet>) -> Vec<ClusterJet> {
        let r2 = self.radius * self.radius;
        let mut slots: Vec<Option<Slot>> = inputs
            .into_iter()
            .map(|input| Some(Slot::new(input, self.algorithm)))
            .collect();
        let mut remaining = slots.len();
        let mut jets = Vec::new();

        while remaining > 0 {
            let mut best = f64::INFINITY;
            let mut merge: Option<(usize, usize)> = None;
            let mut promote = 0usize;

            for i in 0..slots.len() {
                let Some(si) = slots[i].as_ref() else { continue };
                if si.scale < best {
                    best = si.scale;
                    merge = None;
                    promote = i;
                }
                for j in (i + 1)..slots.len() {
                    let Some(sj) = slots[j].as_ref() else { continue };
                    let dij = si.scale.min(sj.scale) * si.geom2(sj) / r2;
                    if dij < best {
                        best = dij;
                        merge = Some((i, j));
                    }
                }
            }

            match merge {
                Some((i, j)) => {
                    let sj = slots[j].take().expect("slot j live");
                    let si = slots[i].as_mut().expect("slot i live");
                    si.p4 += sj.p4;
                    si.rap = si.p4.rapidity();
                    si.phi = si.p4.phi();
                    si.scale = self.algorithm.momentum_scale(&si.p4);
                    si.constituents.extend(sj.constituents);
                    remaining -= 1;
                }
                None => {
                    let slot = slots[promote].take().expect("promoted slot live");
                    jets.push(ClusterJet {
                        p4: slot.p4,
                        area: 0.0,
                        constituents: slot.constituents,
                    });
                    remaining -= 1;
                }
            }
        }

        jets.retain(|jet| jet.p4.pt() >= self.min_pt);
        jets.sort_by(|a, b| b.p4.pt().total_cmp(&a.p4.pt()));
        jets
    }
}
