use super::irradiance::appmag2irr;
use super::phase::PhaseCurve;
use crate::{
    constants::{C_V, DEFAULT_SLOPE_G},
    prelude::{Error, PhotometryResult},
};

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Compute the phase angle of an object, the angle at the object between the direction
/// to the observer and the direction to the illumination source.
///
/// The cosine is clamped into [-1, 1] before taking the arc cosine, so nearly parallel
/// or anti-parallel vectors produce 0 or pi instead of failing on rounding error.
///
/// # Arguments
///
/// * `vec_obj2obs` - Vector from the object to the observer.
/// * `vec_obj2ill` - Vector from the object to the illumination source, in the same
///   units as `vec_obj2obs`.
pub fn phase_angle(
    vec_obj2obs: &Vector3<f64>,
    vec_obj2ill: &Vector3<f64>,
) -> PhotometryResult<f64> {
    let (phase, _, _) = geometry(vec_obj2obs, vec_obj2ill)?;
    Ok(phase)
}

/// Split a vector into its largest absolute component and the vector divided by it.
///
/// The largest rescaled component is 1, so the squared norm can neither overflow nor vanish.
fn rescale(name: &str, vec: &Vector3<f64>) -> PhotometryResult<(Vector3<f64>, f64)> {
    if !vec.iter().all(|x| x.is_finite()) {
        Err(Error::DomainError(format!(
            "Object to {name} vector must be finite, got {:?}.",
            vec.as_slice()
        )))?;
    }
    let scale = vec.amax();
    if scale == 0.0 {
        Err(Error::DivisionByZero(format!("Object to {name} vector has zero length.")))?;
    }
    Ok((vec / scale, scale))
}

/// Phase angle and the two distances of the observing geometry.
fn geometry(
    vec_obj2obs: &Vector3<f64>,
    vec_obj2ill: &Vector3<f64>,
) -> PhotometryResult<(f64, f64, f64)> {
    let (obs, obs_scale) = rescale("observer", vec_obj2obs)?;
    let (ill, ill_scale) = rescale("illuminator", vec_obj2ill)?;
    let obs_norm = obs.norm();
    let ill_norm = ill.norm();
    let phase = clamped_acos(obs.dot(&ill) / (obs_norm * ill_norm));
    Ok((phase, obs_scale * obs_norm, ill_scale * ill_norm))
}

/// Arc cosine of a cosine which may have drifted just outside of [-1, 1].
fn clamped_acos(cos_phase: f64) -> f64 {
    if cos_phase.abs() > 1.0 {
        log::debug!("Clamping phase angle cosine {cos_phase} into [-1, 1].");
    }
    cos_phase.clamp(-1.0, 1.0).acos()
}

/// Apparent magnitude with a specific phase curve, see [`hg_app_mag`].
fn app_mag_with_curve(
    curve: PhaseCurve,
    abs_mag: f64,
    vec_obj2obs: &Vector3<f64>,
    vec_obj2ill: &Vector3<f64>,
    slope_g: f64,
) -> PhotometryResult<f64> {
    let (phase, obs_r, ill_r) = geometry(vec_obj2obs, vec_obj2ill)?;
    let red_mag = curve.reduced_mag(abs_mag, phase, slope_g)?;
    Ok(red_mag + 5.0 * (obs_r.log10() + ill_r.log10()))
}

/// Compute the apparent magnitude of an asteroid using the HG system.
///
/// `m = H - 2.5 log10((1 - G) phi_1 + G phi_2) + 5 log10(d_obs * d_ill)`
///
/// Distances are in AU for the usual definition of H.
///
/// ```
/// use photometry_core::flux::hg_app_mag;
///
/// let mag = hg_app_mag(10.0, [-1.0, 0.0, 0.0], [-2.0, 0.0, 0.0], 0.10).unwrap();
/// assert!((mag - 11.505149978319906).abs() < 1e-9);
/// ```
///
/// # Arguments
///
/// * `abs_mag` - Absolute magnitude H.
/// * `vec_obj2obs` - Vector from the object to the observer in AU.
/// * `vec_obj2ill` - Vector from the object to the illumination source in AU.
/// * `slope_g` - Slope parameter G, [`DEFAULT_SLOPE_G`] if unknown.
pub fn hg_app_mag(
    abs_mag: f64,
    vec_obj2obs: impl Into<Vector3<f64>>,
    vec_obj2ill: impl Into<Vector3<f64>>,
    slope_g: f64,
) -> PhotometryResult<f64> {
    app_mag_with_curve(
        PhaseCurve::Approximate,
        abs_mag,
        &vec_obj2obs.into(),
        &vec_obj2ill.into(),
        slope_g,
    )
}

/// [`hg_app_mag`] assuming the default slope parameter of 0.15.
pub fn hg_app_mag_default(
    abs_mag: f64,
    vec_obj2obs: impl Into<Vector3<f64>>,
    vec_obj2ill: impl Into<Vector3<f64>>,
) -> PhotometryResult<f64> {
    hg_app_mag(abs_mag, vec_obj2obs, vec_obj2ill, DEFAULT_SLOPE_G)
}

fn default_g_param() -> f64 {
    DEFAULT_SLOPE_G
}

fn default_c_hg() -> f64 {
    C_V
}

/// Reflected light properties of an asteroid under the H/G magnitude system.
///
/// H, Albedo, and Diameter are all related by the relation:
/// diameter = c_hg / albedo.sqrt() * (10f64).powf(-h_mag / 5.0);
///
/// When deserialized, a missing G defaults to 0.15, a missing `c_hg` to the V band
/// value, and a missing phase curve to [`PhaseCurve::Approximate`].
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct HGParams {
    /// Designation (name) of the object.
    pub desig: String,

    /// The G parameter of the object in the HG system.
    #[serde(default = "default_g_param")]
    pub g_param: f64,

    /// The H parameter of the object in the HG system.
    pub h_mag: f64,

    /// Phase curve used for the magnitude calculations.
    #[serde(default)]
    pub phase_curve: PhaseCurve,

    /// Visible geometric albedo of the object.
    #[serde(default)]
    vis_albedo: Option<f64>,

    /// Diameter of the object in km.
    #[serde(default)]
    diam: Option<f64>,

    /// Relationship constant between H magnitudes/diameters/geometric albedo.
    ///
    /// Unit is km.
    ///
    /// See:
    ///     "Uncertainties on Asteroid Albedos Determined by Thermal Modeling"
    ///     J. R. Masiero, E. L. Wright, A. K. Mainzer - 2021
    ///     <https://iopscience.iop.org/article/10.3847/PSJ/abda4d/pdf>
    #[serde(default = "default_c_hg")]
    c_hg: f64,
}

impl HGParams {
    /// Create a new [`HGParams`] object without albedo or diameter.
    ///
    /// # Arguments
    ///
    /// * `desig` - Designation of the object.
    /// * `g_param` - The G parameter in the HG system.
    /// * `h_mag` - The H parameter of the object in the HG system.
    /// * `c_hg` - The relationship constant of the H-D-pV conversion in km.
    pub fn new(desig: String, g_param: f64, h_mag: f64, c_hg: Option<f64>) -> Self {
        Self {
            desig,
            g_param,
            h_mag,
            phase_curve: PhaseCurve::default(),
            vis_albedo: None,
            diam: None,
            c_hg: c_hg.unwrap_or(C_V),
        }
    }

    /// New [`HGParams`] assuming G param is `0.15` and c_hg is the V band value.
    pub fn default(desig: String, h_mag: f64) -> Self {
        Self::new(desig, DEFAULT_SLOPE_G, h_mag, None)
    }

    /// Create a new [`HGParams`] object, filling in any missing parameters.
    ///
    /// Since H, albedo and diameter are related, any two of them determine the third.
    ///
    /// This will fail if:
    /// - `h_mag` is [`None`] and either the albedo or diameter is missing.
    /// - All 3 are provided, but are not self consistent.
    /// - The albedo or diameter is not positive.
    ///
    /// # Arguments
    ///
    /// * `desig` - Designation of the object.
    /// * `g_param` - The G parameter in the HG system.
    /// * `h_mag` - The H parameter of the object in the HG system.
    /// * `c_hg` - The relationship constant of the H-D-pV conversion in km.
    /// * `vis_albedo` - Visible geometric albedo of the object.
    /// * `diam` - Diameter of the object in km.
    pub fn try_fill(
        desig: String,
        g_param: f64,
        h_mag: Option<f64>,
        c_hg: Option<f64>,
        vis_albedo: Option<f64>,
        diam: Option<f64>,
    ) -> PhotometryResult<Self> {
        let c_hg = c_hg.unwrap_or(C_V);
        let (h_mag, vis_albedo, diam) = Self::fill(h_mag, vis_albedo, diam, c_hg)?;
        Ok(Self {
            desig,
            g_param,
            h_mag,
            phase_curve: PhaseCurve::default(),
            vis_albedo,
            diam,
            c_hg,
        })
    }

    /// Use a different phase curve for the magnitude calculations.
    pub fn with_phase_curve(mut self, phase_curve: PhaseCurve) -> Self {
        self.phase_curve = phase_curve;
        self
    }

    /// Diameter of the object in km.
    pub fn diam(&self) -> Option<f64> {
        self.diam
    }

    /// Visible geometric albedo of the object.
    pub fn vis_albedo(&self) -> Option<f64> {
        self.vis_albedo
    }

    /// Relationship constant between H, diameter and albedo in km.
    pub fn c_hg(&self) -> f64 {
        self.c_hg
    }

    fn fill(
        h_mag: Option<f64>,
        vis_albedo: Option<f64>,
        diam: Option<f64>,
        c_hg: f64,
    ) -> PhotometryResult<(f64, Option<f64>, Option<f64>)> {
        if vis_albedo.is_some_and(|a| a <= 0.0) {
            Err(Error::ValueError(format!(
                "vis_albedo must be positive, got {vis_albedo:?}."
            )))?;
        }
        if diam.is_some_and(|d| d <= 0.0) {
            Err(Error::ValueError(format!(
                "diam must be positive, got {diam:?}."
            )))?;
        }

        match (h_mag, vis_albedo, diam) {
            (None, Some(albedo), Some(diam)) => {
                let h_mag = -5.0 * (diam * albedo.sqrt() / c_hg).log10();
                Ok((h_mag, Some(albedo), Some(diam)))
            }
            (None, _, _) => Err(Error::ValueError(
                "h_mag must be defined unless both vis_albedo and diam are provided.".into(),
            )),
            (Some(h_mag), None, None) => Ok((h_mag, None, None)),
            (Some(h_mag), Some(albedo), diam) => {
                let expected_diam = c_hg / albedo.sqrt() * 10f64.powf(-0.2 * h_mag);
                if let Some(diam) = diam {
                    if (expected_diam - diam).abs() > 1e-8 {
                        Err(Error::ValueError(format!(
                            "Provided diameter doesn't match with computed diameter. \
                             {expected_diam} != {diam}"
                        )))?;
                    }
                }
                Ok((h_mag, Some(albedo), Some(expected_diam)))
            }
            (Some(h_mag), None, Some(diam)) => {
                let albedo = (c_hg * 10f64.powf(-0.2 * h_mag) / diam).powi(2);
                if albedo > 1.0 {
                    log::debug!("Computed albedo {albedo} is above 1, clamping.");
                }
                Ok((h_mag, Some(albedo.min(1.0)), Some(diam)))
            }
        }
    }

    /// Compute the apparent magnitude of the object as seen by the observer.
    ///
    /// Note that this typically assumes that H/G have been fit in the V band, thus this
    /// will return a V band apparent magnitude.
    ///
    /// # Arguments
    ///
    /// * `obj2obs` - Vector from the object to the observer in AU.
    /// * `obj2ill` - Vector from the object to the illumination source in AU.
    pub fn apparent_mag(
        &self,
        obj2obs: &Vector3<f64>,
        obj2ill: &Vector3<f64>,
    ) -> PhotometryResult<f64> {
        app_mag_with_curve(self.phase_curve, self.h_mag, obj2obs, obj2ill, self.g_param)
    }

    /// Compute the apparent magnitude from heliocentric positions, with the Sun as the
    /// illumination source.
    ///
    /// # Arguments
    ///
    /// * `sun2obj` - Vector from the sun to the object in AU.
    /// * `sun2obs` - Vector from the sun to the observer in AU.
    pub fn apparent_mag_from_sun(
        &self,
        sun2obj: &Vector3<f64>,
        sun2obs: &Vector3<f64>,
    ) -> PhotometryResult<f64> {
        self.apparent_mag(&(sun2obs - sun2obj), &-sun2obj)
    }

    /// Irradiance in W / m^2 delivered to the observer, treating the apparent magnitude
    /// as bolometric.
    ///
    /// # Arguments
    ///
    /// * `obj2obs` - Vector from the object to the observer in AU.
    /// * `obj2ill` - Vector from the object to the illumination source in AU.
    pub fn apparent_irradiance(
        &self,
        obj2obs: &Vector3<f64>,
        obj2ill: &Vector3<f64>,
    ) -> PhotometryResult<f64> {
        Ok(appmag2irr(self.apparent_mag(obj2obs, obj2ill)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    #[test]
    fn test_hg_app_mag_reference() {
        let mag = hg_app_mag(10.0, [-1.0, 0.0, 0.0], [-2.0, 0.0, 0.0], 0.10).unwrap();
        assert!((mag - 11.505149978319906).abs() < 1e-9);

        let mag = hg_app_mag(
            10.0,
            Vector3::new(-1.0, 0.0, 0.0),
            Vector3::new(-2.0, 0.0, 0.0),
            0.10,
        )
        .unwrap();
        assert!((mag - 11.505149978319906).abs() < 1e-9);
    }

    #[test]
    fn test_hg_app_mag_matches_reduced() {
        // Unit distances leave only the reduced magnitude.
        let obs = [1.0, 0.0, 0.0];
        let ill = [FRAC_PI_2.cos(), FRAC_PI_2.sin(), 0.0];
        let mag = hg_app_mag_default(10.0, obs, ill).unwrap();
        let red = crate::flux::reduc_mag_default(10.0, FRAC_PI_2).unwrap();
        assert!((mag - red).abs() < 1e-12);
    }

    #[test]
    fn test_hg_app_mag_zero_vector() {
        assert!(matches!(
            hg_app_mag(10.0, [0.0, 0.0, 0.0], [1.0, 0.0, 0.0], 0.15),
            Err(Error::DivisionByZero(_))
        ));
        assert!(matches!(
            hg_app_mag(10.0, [1.0, 0.0, 0.0], [0.0, 0.0, 0.0], 0.15),
            Err(Error::DivisionByZero(_))
        ));
        assert!(matches!(
            hg_app_mag(10.0, [f64::NAN, 0.0, 0.0], [1.0, 0.0, 0.0], 0.15),
            Err(Error::DomainError(_))
        ));
    }

    #[test]
    fn test_hg_app_mag_swap_symmetry() {
        let obs = [0.3, -1.2, 0.1];
        let ill = [-2.1, 0.4, 0.05];
        let a = hg_app_mag(15.2, obs, ill, 0.25).unwrap();
        let b = hg_app_mag(15.2, ill, obs, 0.25).unwrap();
        assert!((a - b).abs() < 1e-12);

        let obs = Vector3::from(obs);
        let ill = Vector3::from(ill);
        let p1 = phase_angle(&obs, &ill).unwrap();
        let p2 = phase_angle(&ill, &obs).unwrap();
        assert!((p1 - p2).abs() < 1e-15);
    }

    #[test]
    fn test_phase_angle_clamped() {
        assert_eq!(clamped_acos(1.0 + f64::EPSILON), 0.0);
        assert_eq!(clamped_acos(-1.0 - f64::EPSILON), PI);
        assert_eq!(clamped_acos(0.0), FRAC_PI_2);

        // The cosine of these parallel vectors rounds to 1 + 2.2e-16.
        let v = Vector3::new(
            -0.009129825816118098,
            -0.10101787042252375,
            0.3031859454455259,
        );
        let w = v * 7.908361176241581;
        assert_eq!(phase_angle(&v, &w), Ok(0.0));
        assert!(hg_app_mag(10.0, v, w, 0.15).unwrap().is_finite());

        // Exactly opposite directions put the observer behind the object.
        assert!(matches!(
            hg_app_mag(10.0, [1.0, 0.0, 0.0], [-1.0, 0.0, 0.0], 0.15),
            Err(Error::DomainError(_))
        ));
    }

    #[test]
    fn test_hg_app_mag_extreme_lengths() {
        let red = crate::flux::reduc_mag(10.0, FRAC_PI_2, 0.15).unwrap();

        let tiny = hg_app_mag(10.0, [1e-200, 0.0, 0.0], [0.0, 1e-200, 0.0], 0.15).unwrap();
        assert!((tiny - (red - 2000.0)).abs() < 1e-9);

        let huge = hg_app_mag(10.0, [1e200, 0.0, 0.0], [0.0, 1e200, 0.0], 0.15).unwrap();
        assert!((huge - (red + 2000.0)).abs() < 1e-9);

        let obs = Vector3::new(1e-300, 1e-300, 0.0);
        let ill = Vector3::new(0.0, 1e300, 0.0);
        assert!((phase_angle(&obs, &ill).unwrap() - FRAC_PI_4).abs() < 1e-12);
    }

    #[test]
    fn test_hg_app_mag_scale() {
        // Doubling both distances adds 5 log10(4) magnitudes.
        let obs = Vector3::new(0.2, 0.9, 0.0);
        let ill = Vector3::new(-1.1, 0.3, 0.2);
        let near = hg_app_mag(18.0, obs, ill, 0.15).unwrap();
        let far = hg_app_mag(18.0, obs * 2.0, ill * 2.0, 0.15).unwrap();
        assert!((far - near - 5.0 * 4f64.log10()).abs() < 1e-10);
    }

    #[test]
    fn test_hg_params_apparent_mag() {
        let params = HGParams::default("test".into(), 10.0);
        assert_eq!(params.g_param, DEFAULT_SLOPE_G);
        assert_eq!(params.c_hg(), C_V);

        let obs = Vector3::new(0.5, 0.4, 0.0);
        let ill = Vector3::new(-1.0, 0.2, 0.1);
        let expected = hg_app_mag(10.0, obs, ill, DEFAULT_SLOPE_G).unwrap();
        assert_eq!(params.apparent_mag(&obs, &ill).unwrap(), expected);

        let irr = params.apparent_irradiance(&obs, &ill).unwrap();
        assert!((irr - appmag2irr(expected)).abs() / irr < 1e-12);

        // Sun at the origin, object at 2 AU, observer at 1 AU on the same line.
        let sun2obj = Vector3::new(2.0, 0.0, 0.0);
        let sun2obs = Vector3::new(1.0, 0.0, 0.0);
        let params = HGParams::new("test".into(), 0.10, 10.0, None);
        let mag = params.apparent_mag_from_sun(&sun2obj, &sun2obs).unwrap();
        assert!((mag - 11.505149978319906).abs() < 1e-9);
    }

    #[test]
    fn test_hg_params_iau_curve() {
        let params = HGParams::default("test".into(), 10.0).with_phase_curve(PhaseCurve::Iau);
        let obs = Vector3::new(1.0, 0.0, 0.0);
        let ill = Vector3::new(1.0, 1.0, 0.0);
        let mag = params.apparent_mag(&obs, &ill).unwrap();
        let approx = HGParams::default("test".into(), 10.0)
            .apparent_mag(&obs, &ill)
            .unwrap();
        assert!((mag - approx).abs() < 0.05);
        assert!(mag != approx);
    }

    #[test]
    fn test_hg_params_fill() {
        let c_hg = 1329.0;
        let albedo: f64 = 0.25;
        let h_mag = 15.0;
        let diam = c_hg / albedo.sqrt() * 10f64.powf(-0.2 * h_mag);

        let filled =
            HGParams::try_fill("a".into(), 0.15, Some(h_mag), None, Some(albedo), None).unwrap();
        assert!((filled.diam().unwrap() - diam).abs() < 1e-10);

        let filled =
            HGParams::try_fill("a".into(), 0.15, None, None, Some(albedo), Some(diam)).unwrap();
        assert!((filled.h_mag - h_mag).abs() < 1e-10);

        let filled =
            HGParams::try_fill("a".into(), 0.15, Some(h_mag), None, None, Some(diam)).unwrap();
        assert!((filled.vis_albedo().unwrap() - albedo).abs() < 1e-10);

        let filled = HGParams::try_fill("a".into(), 0.15, Some(h_mag), None, None, None).unwrap();
        assert!(filled.diam().is_none());
        assert!(filled.vis_albedo().is_none());

        // Tiny object with a huge H would need an albedo above 1.
        let filled =
            HGParams::try_fill("a".into(), 0.15, Some(1.0), None, None, Some(1.0)).unwrap();
        assert_eq!(filled.vis_albedo(), Some(1.0));
    }

    #[test]
    fn test_hg_params_fill_errors() {
        let res = HGParams::try_fill("a".into(), 0.15, None, None, Some(0.2), None);
        assert!(matches!(res, Err(Error::ValueError(_))));

        let res = HGParams::try_fill("a".into(), 0.15, Some(15.0), None, Some(0.25), Some(5.0));
        assert!(matches!(res, Err(Error::ValueError(_))));

        let res = HGParams::try_fill("a".into(), 0.15, Some(15.0), None, Some(0.0), None);
        assert!(matches!(res, Err(Error::ValueError(_))));

        let res = HGParams::try_fill("a".into(), 0.15, Some(15.0), None, None, Some(-1.0));
        assert!(matches!(res, Err(Error::ValueError(_))));
    }

    #[test]
    fn test_hg_params_config() {
        let params: HGParams =
            serde_json::from_str(r#"{"desig": "433", "h_mag": 10.31}"#).unwrap();
        assert_eq!(params, HGParams::default("433".into(), 10.31));

        let params: HGParams = serde_json::from_str(
            r#"{"desig": "433", "h_mag": 10.31, "g_param": 0.46, "phase_curve": "Iau"}"#,
        )
        .unwrap();
        assert_eq!(params.g_param, 0.46);
        assert_eq!(params.phase_curve, PhaseCurve::Iau);
    }
}
