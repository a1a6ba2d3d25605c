//! Event-level reconstruction pipeline.
//!
//! Runs classification, lepton dressing, jet building, kinematic
//! combination and decay-graph linking in order, and collects the four
//! per-event output lists. The reconstructor itself is immutable after
//! construction, so one instance can serve any number of events and any
//! number of worker threads.

use anyhow::Result;
use tracing::debug;

use crate::classify::classify;
use crate::cluster::JetDefinition;
use crate::combine::combine;
use crate::config::PseudoTopConfig;
use crate::dress::dress_leptons;
use crate::graph::link_decay_tree;
use crate::jets::build_jets;
use crate::particle::{GenJet, GenParticle};

/// Decay channel of a completed candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecayChannel {
    Dilepton,
    SemiLepton,
}

/// Per-event output collections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PseudoTopEvent {
    /// Prompt neutrinos, pt-descending.
    pub neutrinos: Vec<GenParticle>,
    /// Dressed leptons, pt-descending.
    pub leptons: Vec<GenJet>,
    /// Accepted jets, pt-descending, b-tagged members carrying species
    /// code 5.
    pub jets: Vec<GenJet>,
    /// Zero or exactly ten linked candidate records.
    pub pseudo_top: Vec<GenParticle>,
}

impl PseudoTopEvent {
    pub fn is_reconstructed(&self) -> bool {
        self.pseudo_top.len() == 10
    }

    /// Decay channel, read off the species code of the second W's first
    /// leg.
    pub fn channel(&self) -> Option<DecayChannel> {
        if !self.is_reconstructed() {
            return None;
        }
        match self.pseudo_top[8].pdg_id.id().abs() {
            11 | 13 => Some(DecayChannel::Dilepton),
            _ => Some(DecayChannel::SemiLepton),
        }
    }

    /// The two top candidates of a completed reconstruction.
    pub fn top_pair(&self) -> Option<(&GenParticle, &GenParticle)> {
        if !self.is_reconstructed() {
            return None;
        }
        Some((&self.pseudo_top[0], &self.pseudo_top[1]))
    }
}

/// Stateless pseudo-top reconstructor.
#[derive(Debug, Clone)]
pub struct PseudoTopReconstructor {
    config: PseudoTopConfig,
    lepton_def: JetDefinition,
    jet_def: JetDefinition,
}

impl PseudoTopReconstructor {
    /// Validates the configuration and freezes the two clustering
    /// definitions.
    pub fn new(config: PseudoTopConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            lepton_def: JetDefinition {
                algorithm: config.algorithm,
                radius: config.lepton_cone_size,
                min_pt: config.lepton_min_pt,
            },
            jet_def: JetDefinition {
                algorithm: config.algorithm,
                radius: config.jet_cone_size,
                min_pt: config.jet_min_pt,
            },
            config,
        })
    }

    /// Reconstructs one event.
    ///
    /// Both slices must index into the same event-particle universe;
    /// passing the same slice twice is the common case. Mother and
    /// daughter links of either resolve in `gen_particles`.
    pub fn run(
        &self,
        final_states: &[GenParticle],
        gen_particles: &[GenParticle],
    ) -> PseudoTopEvent {
        // Output records inherit the event production vertex.
        let vertex = gen_particles.first().map(|p| p.vertex).unwrap_or_default();

        let classified = classify(final_states, gen_particles);
        let dressed = dress_leptons(
            final_states,
            &classified.lepton_idxs,
            self.lepton_def,
            self.config.lepton_max_eta,
        );
        let built = build_jets(
            final_states,
            gen_particles,
            &dressed.consumed,
            &classified.b_hadron_idxs,
            self.jet_def,
            self.config.jet_max_eta,
        );

        let mut pseudo_top = combine(
            &dressed.leptons,
            &classified.neutrinos,
            &built.jets,
            &built.b_jet_idxs,
            &built.light_jet_idxs,
            &self.config,
            vertex,
        );
        link_decay_tree(&mut pseudo_top);

        debug!(
            reconstructed = pseudo_top.len() == 10,
            leptons = dressed.leptons.len(),
            jets = built.jets.len(),
            "event pipeline finished"
        );

        PseudoTopEvent {
            neutrinos: classified.neutrinos,
            leptons: dressed.leptons,
            jets: built.jets,
            pseudo_top,
        }
    }
}
