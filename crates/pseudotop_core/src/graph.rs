//! Decay-graph linking for the pseudo-top candidate list.
//!
//! The combinator's ten-record layout is fixed, so the two top decay
//! subtrees are wired up by position: each top feeds its W and b leg,
//! each W feeds its two decay legs.

use crate::particle::GenParticle;

/// Parent-child pairs by position in the candidate list.
const LINKS: [(usize, usize); 8] = [
    (0, 2), // t1 -> W1
    (0, 3), // t1 -> b1
    (2, 4), // W1 -> lepton
    (2, 5), // W1 -> neutrino
    (1, 6), // t2 -> W2
    (1, 7), // t2 -> b2
    (6, 8), // W2 -> leg
    (6, 9), // W2 -> leg
];

/// Installs the bidirectional mother/daughter links. Anything other than
/// a complete ten-record list is left untouched.
pub fn link_decay_tree(records: &mut [GenParticle]) {
    if records.len() != 10 {
        return;
    }
    for (parent, child) in LINKS {
        records[parent].daughters.push(child);
        records[child].mothers.push(parent);
    }
}
