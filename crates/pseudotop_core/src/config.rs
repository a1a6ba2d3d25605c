//! Run configuration for the reconstruction.
//!
//! All thresholds are fixed for a run and validated once at reconstructor
//! construction; nothing here mutates during event processing.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::cluster::JetAlgorithm;

/// Acceptance cuts, reference masses and clustering radii.
///
/// Defaults are the reference working point: 15 GeV dressed leptons inside
/// |eta| < 2.5 with a 0.1 dressing cone, 30 GeV jets inside |eta| < 2.4
/// with a 0.4 cone, and mW = 80.4 GeV, mt = 172.5 GeV.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PseudoTopConfig {
    pub lepton_min_pt: f64,
    pub lepton_max_eta: f64,
    pub jet_min_pt: f64,
    pub jet_max_eta: f64,
    pub w_mass: f64,
    pub t_mass: f64,
    pub lepton_cone_size: f64,
    pub jet_cone_size: f64,
    /// Recombination metric used for both dressing and jet building.
    pub algorithm: JetAlgorithm,
}

impl Default for PseudoTopConfig {
    fn default() -> Self {
        Self {
            lepton_min_pt: 15.0,
            lepton_max_eta: 2.5,
            jet_min_pt: 30.0,
            jet_max_eta: 2.4,
            w_mass: 80.4,
            t_mass: 172.5,
            lepton_cone_size: 0.1,
            jet_cone_size: 0.4,
            algorithm: JetAlgorithm::AntiKt,
        }
    }
}

impl PseudoTopConfig {
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("lepton_min_pt", self.lepton_min_pt),
            ("lepton_max_eta", self.lepton_max_eta),
            ("jet_min_pt", self.jet_min_pt),
            ("jet_max_eta", self.jet_max_eta),
            ("w_mass", self.w_mass),
            ("t_mass", self.t_mass),
            ("lepton_cone_size", self.lepton_cone_size),
            ("jet_cone_size", self.jet_cone_size),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                bail!("{} must be finite, got {}", name, value);
            }
        }
        if self.lepton_min_pt < 0.0 || self.jet_min_pt < 0.0 {
            bail!("pt thresholds must be non-negative.");
        }
        if self.lepton_max_eta <= 0.0 || self.jet_max_eta <= 0.0 {
            bail!("eta acceptance ceilings must be positive.");
        }
        if self.w_mass <= 0.0 || self.t_mass <= 0.0 {
            bail!("reference masses must be positive.");
        }
        if self.lepton_cone_size <= 0.0 || self.jet_cone_size <= 0.0 {
            bail!("cone sizes must be positive.");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::PseudoTopConfig;

    fn assert_err_contains<T: std::fmt::Debug>(result: anyhow::Result<T>, needle: &str) {
        let err = result.expect_err("expected error");
        let message = format!("{err}");
        assert!(
            message.contains(needle),
            "expected error to contain \"{needle}\", got \"{message}\""
        );
    }

    #[test]
    fn default_config_validates() {
        PseudoTopConfig::default()
            .validate()
            .expect("default config should be valid");
    }

    #[test]
    fn rejects_non_finite_fields() {
        let config = PseudoTopConfig {
            w_mass: f64::NAN,
            ..PseudoTopConfig::default()
        };
        assert_err_contains(config.validate(), "w_mass");
    }

    #[test]
    fn rejects_negative_thresholds() {
        let config = PseudoTopConfig {
            jet_min_pt: -1.0,
            ..PseudoTopConfig::default()
        };
        assert_err_contains(config.validate(), "non-negative");
    }

    #[test]
    fn rejects_zero_cone_size() {
        let config = PseudoTopConfig {
            lepton_cone_size: 0.0,
            ..PseudoTopConfig::default()
        };
        assert_err_contains(config.validate(), "cone sizes");
    }

    #[test]
    fn rejects_non_positive_masses() {
        let config = PseudoTopConfig {
            t_mass: 0.0,
            ..PseudoTopConfig::default()
        };
        assert_err_contains(config.validate(), "reference masses");
    }
}
