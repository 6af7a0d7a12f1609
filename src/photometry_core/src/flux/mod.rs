//! # Flux
//! Reflected light photometry of small bodies using the HG magnitude system.
//!
//! [`phase_func`] - The two empirical phase functions of the HG system.
//! [`reduc_mag`] - Magnitude corrected for phase angle.
//! [`hg_app_mag`] - Apparent magnitude from observing geometry.
//! [`appmag2irr`] - Apparent bolometric magnitude to irradiance.
//! [`HGParams`] - Per object HG parameters, including diameter and albedo.
//!
mod irradiance;
mod phase;
mod reflected;

pub use irradiance::*;
pub use phase::*;
pub use reflected::*;
