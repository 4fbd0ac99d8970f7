//! Shared fixtures for chart integration tests

#![allow(dead_code)]

use std::io::Write;
use std::path::PathBuf;
use std::sync::Once;

use keytrace_core::{DensityPlot, DensityPlotConfig};
use keytrace_io::GroupedSamples;

pub const SPEED_CS1_CSV: &str = "pID,gt,typingSpeed\n\
11,True,38.2\n\
12,True,41.0\n\
13,False,62.4\n\
14,False,58.9\n\
15,True,n/a\n\
16,True,36.7\n";

pub const SPEED_CS2_CSV: &str = "pID,gt,typingSpeed\n\
21,True,35.5\n\
22,False,66.1\n\
23,True,44.8\n\
24,False,70.0\n\
25,False,64.3\n";

pub const REPLAY_CSV: &str = "key,press_0,release_0,pID\n\
h,1000.00,1000.09,1001\n\
e,1000.12,1000.20,1001\n\
F2,1000.15,1000.16,1001\n\
y,1000.25,1000.31,1001\n\
h,2000.00,2000.05,1002\n\
i,2000.08,2000.12,1002\n";

pub const KEYSTROKES_A_CSV: &str = "key,duration,delay,has_parkinsons\n\
a,0.100,0.300,True\n\
b,0.140,0.500,True\n\
a,0.080,0.200,False\n\
b,0.090,,False\n";

pub const KEYSTROKES_B_CSV: &str = "key,duration,delay,has_parkinsons\n\
a,0.300,0.400,True\n\
c,0.070,0.250,False\n\
b,0.110,0.350,False\n";

static TRACING: Once = Once::new();

/// Install an env-filtered subscriber once per test binary
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Write a fixture into the temp dir and return its path
pub fn write_fixture(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(body.as_bytes()).unwrap();
    path
}

/// Two well-separated typing-speed groups
pub fn separated_plot() -> DensityPlot {
    let samples = GroupedSamples::new(
        &[195.0, 198.0, 200.0, 201.0, 204.0, 206.0],
        &[76.0, 79.0, 80.0, 82.0, 85.0],
    );
    DensityPlot::build(&samples, &DensityPlotConfig::default())
}
