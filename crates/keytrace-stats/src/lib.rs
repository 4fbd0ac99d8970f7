//! keytrace-stats - Statistical functions for keystroke-timing analysis
//!
//! This crate provides the numerical core behind the keytrace charts:
//!
//! - **Sample**: finite observations with summary statistics
//! - **Bandwidth**: Silverman's rule of thumb or a fixed smoothing width
//! - **Kde**: Epanechnikov kernel density estimation over evaluation points
//! - **DensityCurve**: immutable (x, density) series produced by the estimator
//! - **integrate_cdf**: trapezoidal probability mass between two x-bounds
//!
//! # Pipeline
//!
//! ```
//! use keytrace_stats::{estimate_density, integrate_cdf, silverman_bandwidth};
//!
//! let sample = [48.0, 49.0, 50.0, 51.0, 52.0];
//! let points: Vec<f64> = (0..=100).map(f64::from).collect();
//!
//! let h = silverman_bandwidth(&sample).unwrap();
//! let curve = estimate_density(&sample, &points, h).unwrap();
//! let mass = integrate_cdf(&curve, 40.0, 60.0);
//! assert!(mass > 0.9);
//! ```

pub mod bandwidth;
pub mod cdf;
pub mod curve;
pub mod error;
pub mod kde;
pub mod sample;
pub mod summary;

pub use bandwidth::*;
pub use cdf::*;
pub use curve::*;
pub use error::*;
pub use kde::*;
pub use sample::*;
pub use summary::*;
