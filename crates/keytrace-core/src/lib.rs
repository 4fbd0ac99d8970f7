//! keytrace-core - Interactive charts of keystroke timing
//!
//! This crate turns typing-speed and keystroke-timing tables into chart
//! models and drives the interaction on them.
//!
//! # Key Components
//!
//! - **DensityPlot**: per-group KDE curves of typing speed on a shared axis
//! - **InteractionState**: hover readout and drag-to-integrate probability mass
//! - **ChartSession**: one mounted chart with its timers and drawn elements
//! - **Scene**: keyed reconciliation of drawn elements between redraws
//! - **Scheduler**: cancellable timers scoped to a chart
//! - **Replay**: side-by-side keyboard replay with rolling timing metrics
//! - **ViolinPlot** / **BarMetrics**: hold and flight time comparisons
//! - **DelayHeatmap**: per-key delay differences on a keyboard layout
//!
//! # Mounting a chart
//!
//! ```no_run
//! use keytrace_core::{mount_density_chart, KeytraceConfig};
//!
//! # async fn run() {
//! let config = KeytraceConfig::default();
//! let state = mount_density_chart(
//!     &["data/GT_DataPD_MIT-CS1PD.csv", "data/GT_DataPD_MIT-CS2PD.csv"],
//!     &config,
//! )
//! .await;
//! if let Some(message) = state.failure() {
//!     eprintln!("{}", message);
//! }
//! # }
//! ```

pub mod config;
pub mod density_plot;
pub mod elements;
pub mod error;
pub mod heatmap;
pub mod interaction;
pub mod metrics;
pub mod reconcile;
pub mod replay;
pub mod scale;
pub mod scheduler;
pub mod session;
pub mod violin;

pub use config::*;
pub use density_plot::*;
pub use elements::*;
pub use error::*;
pub use heatmap::*;
pub use interaction::*;
pub use metrics::*;
pub use reconcile::*;
pub use replay::*;
pub use scale::*;
pub use scheduler::*;
pub use session::*;
pub use violin::*;

pub use keytrace_io::Group;
