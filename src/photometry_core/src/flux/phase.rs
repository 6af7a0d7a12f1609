//! Phase functions of the HG magnitude system.
//!
//! The HG system approximates the phase darkening of an asteroid as a blend of two
//! empirical curves, weighted by the slope parameter G:
//!
//! `phi_i = exp(-A_i * tan(phase / 2)^B_i)`
//!
//! <https://www.britastro.org/asteroids/dymock4.pdf>
use crate::prelude::{Error, PhotometryResult};

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// One of the two empirical phase functions of the HG system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum PhaseIndex {
    /// First phase function, A = 3.33, B = 0.63.
    One,

    /// Second phase function, A = 1.87, B = 1.22.
    Two,
}

impl PhaseIndex {
    /// The `(A, B)` coefficients of this phase function.
    pub fn coefficients(&self) -> (f64, f64) {
        match self {
            Self::One => (3.33, 0.63),
            Self::Two => (1.87, 1.22),
        }
    }

    /// Evaluate this phase function at the provided phase angle.
    ///
    /// Returns a value in (0, 1], exactly 1 at a phase of 0. Phases very close to pi
    /// may underflow to 0.
    ///
    /// # Arguments
    ///
    /// * `phase_angle` - Phase angle in radians, in the range [0, pi).
    pub fn phi(&self, phase_angle: f64) -> PhotometryResult<f64> {
        check_phase(phase_angle)?;
        let (a, b) = self.coefficients();
        Ok(exp_attenuation(a, b, (0.5 * phase_angle).tan()))
    }
}

/// `exp(-A * tan(phase / 2)^B)`, shared by the approximate and IAU curves.
fn exp_attenuation(a: f64, b: f64, tan_half: f64) -> f64 {
    (-a * tan_half.powf(b)).exp()
}

impl TryFrom<i64> for PhaseIndex {
    type Error = Error;

    fn try_from(index: i64) -> Result<Self, Self::Error> {
        match index {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            other => Err(Error::InvalidIndex(other)),
        }
    }
}

/// Phase angles must be finite and inside [0, pi).
///
/// Negative phases would raise a negative tangent to a fractional power, and pi is the
/// singularity of `tan(phase / 2)`.
fn check_phase(phase_angle: f64) -> PhotometryResult<()> {
    if !(0.0..PI).contains(&phase_angle) {
        Err(Error::DomainError(format!(
            "Phase angle must be in the range [0, pi) radians, got {phase_angle}."
        )))?;
    }
    Ok(())
}

/// Phase function of the HG system, selected by its integer index.
///
/// ```
/// use photometry_core::flux::phase_func;
///
/// let phi1 = phase_func(1, std::f64::consts::PI / 4.0).unwrap();
/// assert!((phi1 - 0.14790968630394927).abs() < 1e-12);
/// ```
///
/// # Arguments
///
/// * `index` - Which phase function to evaluate, 1 or 2.
/// * `phase_angle` - Phase angle in radians, in the range [0, pi).
pub fn phase_func(index: i64, phase_angle: f64) -> PhotometryResult<f64> {
    PhaseIndex::try_from(index)?.phi(phase_angle)
}

///  This computes the phase curve correction using the full IAU standard for the HG
///  model, including the small phase angle smoothing term.
///
/// # Arguments
///
/// * `g_param` - The G parameter, between 0 and 1.
/// * `phase` - The phase angle in radians.
pub fn iau_phase_curve_correction(g_param: f64, phase: f64) -> f64 {
    let tan_half = (0.5 * phase).tan();
    let sin_phase = phase.sin();

    // Blends in the linear opposition term, negligible past a few degrees.
    let w = (-90.56 * tan_half.powi(2)).exp();
    let term = |a: f64, b: f64, c: f64| {
        let linear =
            1.0 - c * sin_phase / (0.119 + 1.341 * sin_phase - 0.754 * sin_phase.powi(2));
        w * linear + (1.0 - w) * exp_attenuation(a, b, tan_half)
    };

    (1.0 - g_param) * term(3.332, 0.631, 0.986) + g_param * term(1.862, 1.218, 0.238)
}

/// Which phase curve is used to turn an absolute magnitude into a reduced magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum PhaseCurve {
    /// The two term exponential approximation, see [`phase_func`].
    #[default]
    Approximate,

    /// The IAU 1985 curve, see [`iau_phase_curve_correction`].
    Iau,
}

impl PhaseCurve {
    /// Fraction of the zero phase brightness which remains at the given phase.
    ///
    /// # Arguments
    ///
    /// * `slope_g` - The G parameter of the HG system.
    /// * `phase_angle` - Phase angle in radians, in the range [0, pi).
    pub fn correction(&self, slope_g: f64, phase_angle: f64) -> PhotometryResult<f64> {
        match self {
            Self::Approximate => {
                let phi1 = PhaseIndex::One.phi(phase_angle)?;
                let phi2 = PhaseIndex::Two.phi(phase_angle)?;
                Ok((1.0 - slope_g) * phi1 + slope_g * phi2)
            }
            Self::Iau => {
                check_phase(phase_angle)?;
                Ok(iau_phase_curve_correction(slope_g, phase_angle))
            }
        }
    }

    /// Reduced magnitude of an object, the magnitude corrected for phase but not for
    /// distance.
    ///
    /// # Arguments
    ///
    /// * `abs_mag` - Absolute magnitude H of the object.
    /// * `phase_angle` - Phase angle in radians, in the range [0, pi).
    /// * `slope_g` - The G parameter of the HG system.
    pub fn reduced_mag(
        &self,
        abs_mag: f64,
        phase_angle: f64,
        slope_g: f64,
    ) -> PhotometryResult<f64> {
        let correction = self.correction(slope_g, phase_angle)?;
        if !(correction.is_finite() && correction > 0.0) {
            Err(Error::DomainError(format!(
                "Phase correction must be positive to take its logarithm, got {correction} \
                 (G = {slope_g}, phase = {phase_angle})."
            )))?;
        }
        Ok(abs_mag - 2.5 * correction.log10())
    }
}

/// Compute the reduced magnitude of an object with the HG phase functions.
///
/// `H - 2.5 log10((1 - G) phi_1 + G phi_2)`
///
/// A G outside of [0, 1] may drive the weighted sum non-positive, which results in a
/// [`Error::DomainError`].
///
/// # Arguments
///
/// * `abs_mag` - Absolute magnitude H of the object.
/// * `phase_angle` - Phase angle in radians, in the range [0, pi).
/// * `slope_g` - Slope parameter G, [`crate::constants::DEFAULT_SLOPE_G`] if unknown.
pub fn reduc_mag(abs_mag: f64, phase_angle: f64, slope_g: f64) -> PhotometryResult<f64> {
    PhaseCurve::Approximate.reduced_mag(abs_mag, phase_angle, slope_g)
}

/// [`reduc_mag`] assuming the default slope parameter of 0.15.
pub fn reduc_mag_default(abs_mag: f64, phase_angle: f64) -> PhotometryResult<f64> {
    reduc_mag(abs_mag, phase_angle, crate::constants::DEFAULT_SLOPE_G)
}
