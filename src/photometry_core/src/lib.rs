//! # Photometry Core
//! Photometric models of asteroids and other small solar system bodies.
//!
//! This contains the H-G magnitude system, used to predict the apparent brightness of
//! an object from its absolute magnitude and the observing geometry, as well as the
//! conversion of apparent bolometric magnitudes to irradiance.
//!
//! All functions here are pure. Positions of the object, observer, and illumination
//! source are expected to be computed elsewhere and passed in as vectors.
//!

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]

pub mod constants;
pub mod errors;
pub mod flux;

/// Common useful imports
pub mod prelude {
    pub use crate::constants::{APPMAG_IRR_I0, DEFAULT_SLOPE_G};
    pub use crate::errors::{Error, PhotometryResult};
    pub use crate::flux::{
        appmag2irr, hg_app_mag, irr2appmag, phase_angle, phase_func, reduc_mag, HGParams,
        PhaseCurve, PhaseIndex,
    };
}
