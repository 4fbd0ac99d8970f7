//! CSV fixtures shaped like the study exports

use std::io::Write;
use std::path::PathBuf;

pub const SPEED_CS1_CSV: &str = "pID,gt,typingSpeed\n\
11,True,38.2\n\
12,True,41.0\n\
13,False,62.4\n\
14,False,58.9\n\
15,True,n/a\n";

pub const SPEED_CS2_CSV: &str = "pID,gt,typingSpeed\n\
21,True,35.5\n\
22,False,66.1\n\
23,True,44.8\n\
24,False,70.0\n";

pub const KEYSTROKES_CSV: &str = "key,duration,delay,has_parkinsons\n\
a,0.12,0.31,True\n\
s,0.15,0.42,True\n\
d,0.10,0.20,False\n\
f,0.08,0.18,False\n\
g,0.09,0.22,False\n";

/// Write a fixture into the temp dir and return its path
pub fn write_fixture(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(body.as_bytes()).unwrap();
    path
}
