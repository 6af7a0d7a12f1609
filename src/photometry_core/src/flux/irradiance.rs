//! Conversions between apparent bolometric magnitudes and irradiance.
use crate::constants::APPMAG_IRR_I0;
use crate::prelude::{Error, PhotometryResult};

/// Convert an apparent bolometric magnitude to the corresponding irradiance in W / m^2.
///
/// The zero point is defined by the IAU, see [`APPMAG_IRR_I0`].
///
/// Extreme magnitudes follow IEEE-754, very bright magnitudes overflow to infinity and
/// very faint ones underflow to 0.
///
/// ```
/// use photometry_core::flux::appmag2irr;
///
/// assert!((appmag2irr(8.0) - 1.5887638447672732e-11).abs() < 1e-20);
/// ```
///
/// # Arguments
///
/// * `app_mag` - Apparent bolometric magnitude.
pub fn appmag2irr(app_mag: f64) -> f64 {
    10f64.powf(-0.4 * app_mag + APPMAG_IRR_I0.log10())
}

/// Convert an irradiance in W / m^2 to the corresponding apparent bolometric magnitude.
///
/// This is the inverse of [`appmag2irr`].
///
/// # Arguments
///
/// * `irradiance` - Irradiance in W / m^2, must be positive.
pub fn irr2appmag(irradiance: f64) -> PhotometryResult<f64> {
    if !(irradiance.is_finite() && irradiance > 0.0) {
        Err(Error::DomainError(format!(
            "Irradiance must be positive and finite, got {irradiance}."
        )))?;
    }
    Ok(-2.5 * (irradiance / APPMAG_IRR_I0).log10())
}
