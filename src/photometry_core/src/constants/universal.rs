/// Zero point irradiance of the bolometric magnitude scale in W / m^2.
///
/// An object of apparent bolometric magnitude 0 delivers this irradiance.
/// <https://www.iau.org/static/resolutions/IAU2015_English.pdf> (Resolution B2)
pub const APPMAG_IRR_I0: f64 = 2.518021002e-8;

/// Slope parameter G of the HG system for objects with an unknown slope.
pub const DEFAULT_SLOPE_G: f64 = 0.15;

/// V-band constant for the relationship between D, H_V, and p_v, in km.
pub const C_V: f64 = 1329.0;
