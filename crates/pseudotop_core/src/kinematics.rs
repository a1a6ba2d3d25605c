//! Kinematic value types shared by the whole pipeline.
//!
//! Four-momenta are plain Cartesian records in natural units (GeV, c = 1);
//! every derived quantity (transverse momentum, rapidity, invariant mass)
//! is computed on demand.

use std::f64::consts::PI;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use num_traits::Zero;
use serde::{Deserialize, Serialize};

/// Rapidity assigned to momenta collinear with the beam axis, where the
/// exact expression diverges.
const MAX_RAP: f64 = 1e5;

/// A four-momentum p = (px, py, pz, E).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FourMomentum {
    pub px: f64,
    pub py: f64,
    pub pz: f64,
    pub e: f64,
}

impl FourMomentum {
    pub fn new(px: f64, py: f64, pz: f64, e: f64) -> Self {
        Self { px, py, pz, e }
    }

    /// Squared transverse momentum.
    pub fn pt2(&self) -> f64 {
        self.px * self.px + self.py * self.py
    }

    /// Transverse momentum.
    pub fn pt(&self) -> f64 {
        self.pt2().sqrt()
    }

    /// Squared three-momentum magnitude.
    pub fn p2(&self) -> f64 {
        self.pt2() + self.pz * self.pz
    }

    /// Three-momentum magnitude.
    pub fn p(&self) -> f64 {
        self.p2().sqrt()
    }

    /// Azimuthal angle in (-pi, pi].
    pub fn phi(&self) -> f64 {
        self.py.atan2(self.px)
    }

    /// Pseudorapidity, computed from the three-momentum.
    pub fn eta(&self) -> f64 {
        let p = self.p();
        if p <= self.pz.abs() {
            return if self.pz >= 0.0 { MAX_RAP } else { -MAX_RAP };
        }
        0.5 * ((p + self.pz) / (p - self.pz)).ln()
    }

    /// Rapidity, computed from energy and longitudinal momentum. This is
    /// the quantity the clustering metric is defined in.
    pub fn rapidity(&self) -> f64 {
        if self.e <= self.pz.abs() {
            return if self.pz >= 0.0 { MAX_RAP } else { -MAX_RAP };
        }
        0.5 * ((self.e + self.pz) / (self.e - self.pz)).ln()
    }

    /// Squared invariant mass E^2 - |p|^2; negative for spacelike momenta.
    pub fn m2(&self) -> f64 {
        self.e * self.e - self.p2()
    }

    /// Invariant mass, with the sign convention -sqrt(-m^2) for spacelike
    /// momenta.
    pub fn mass(&self) -> f64 {
        let m2 = self.m2();
        if m2 < 0.0 {
            -(-m2).sqrt()
        } else {
            m2.sqrt()
        }
    }

    /// Uniform rescale of all four components. Leaves direction, rapidity
    /// and azimuth intact.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            px: self.px * factor,
            py: self.py * factor,
            pz: self.pz * factor,
            e: self.e * factor,
        }
    }

    /// Squared rapidity-azimuth separation, with the azimuth difference
    /// wrapped onto [-pi, pi].
    pub fn delta_r2(&self, other: &FourMomentum) -> f64 {
        let dy = self.rapidity() - other.rapidity();
        let mut dphi = (self.phi() - other.phi()).abs();
        if dphi > PI {
            dphi = 2.0 * PI - dphi;
        }
        dy * dy + dphi * dphi
    }
}

impl Add for FourMomentum {
    type Output = FourMomentum;

    fn add(self, rhs: FourMomentum) -> FourMomentum {
        FourMomentum {
            px: self.px + rhs.px,
            py: self.py + rhs.py,
            pz: self.pz + rhs.pz,
            e: self.e + rhs.e,
        }
    }
}

impl AddAssign for FourMomentum {
    fn add_assign(&mut self, rhs: FourMomentum) {
        *self = *self + rhs;
    }
}

impl Zero for FourMomentum {
    fn zero() -> Self {
        Self::default()
    }

    fn is_zero(&self) -> bool {
        self.px == 0.0 && self.py == 0.0 && self.pz == 0.0 && self.e == 0.0
    }
}

impl Sum for FourMomentum {
    fn sum<I: Iterator<Item = FourMomentum>>(iter: I) -> FourMomentum {
        iter.fold(FourMomentum::zero(), Add::add)
    }
}

/// A production vertex.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Builds a four-momentum of mass `m` from transverse momentum,
/// pseudorapidity and azimuth. Convenience for tests and synthetic event
/// construction.
pub fn from_pt_eta_phi_m(pt: f64, eta: f64, phi: f64, m: f64) -> FourMomentum {
    let px = pt * phi.cos();
    let py = pt * phi.sin();
    let pz = pt * eta.sinh();
    let e = (px * px + py * py + pz * pz + m * m).sqrt();
    FourMomentum::new(px, py, pz, e)
}
