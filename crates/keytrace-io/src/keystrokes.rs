//! Raw keystroke records for keyboard replay

use crate::csv_reader::{parse_number, CsvTable};
use crate::reader::IoResult;
use serde::{Deserialize, Serialize};

/// One key press with its release, timestamps in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeystrokeRecord {
    /// Key name as logged (`"space"`, `"Shift_L"`, `"a"`, ...)
    pub key: String,
    /// Press timestamp in seconds
    pub press: f64,
    /// Release timestamp in seconds
    pub release: f64,
    /// Participant identifier
    pub participant: String,
}

impl KeystrokeRecord {
    /// Hold time in milliseconds
    pub fn hold_ms(&self) -> f64 {
        (self.release - self.press) * 1000.0
    }

    /// Read records from a table with `key`, `press_0`, `release_0`, `pID`
    ///
    /// Rows with a non-numeric timestamp or a release before the press are
    /// skipped.
    pub fn from_table(table: &CsvTable) -> IoResult<Vec<Self>> {
        let keys = table.column("key")?;
        let presses = table.column("press_0")?;
        let releases = table.column("release_0")?;
        let participants = table.column("pID")?;

        let mut records = Vec::with_capacity(table.len());
        let mut skipped = 0usize;
        for i in 0..table.len() {
            let press = parse_number(presses[i]);
            let release = parse_number(releases[i]);
            if !press.is_finite() || !release.is_finite() || release < press {
                skipped += 1;
                continue;
            }
            records.push(Self {
                key: keys[i].to_string(),
                press,
                release,
                participant: participants[i].to_string(),
            });
        }

        if skipped > 0 {
            tracing::debug!(skipped, "skipped malformed keystroke rows");
        }
        Ok(records)
    }

    /// Keep only one participant's records
    pub fn for_participant<'a>(
        records: &'a [Self],
        participant: &'a str,
    ) -> impl Iterator<Item = &'a Self> + 'a {
        records.iter().filter(move |r| r.participant == participant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: &str = "key,press_0,release_0,pID\n\
a,100.0,100.1,1001\n\
b,100.5,100.55,1001\n\
space,bad,101.0,1002\n\
c,102.0,101.0,1002\n\
d,103.0,103.2,1002\n";

    #[test]
    fn test_from_table() {
        let table = CsvTable::from_reader(LOG.as_bytes()).unwrap();
        let records = KeystrokeRecord::from_table(&table).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].key, "a");
        assert!((records[0].hold_ms() - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_for_participant() {
        let table = CsvTable::from_reader(LOG.as_bytes()).unwrap();
        let records = KeystrokeRecord::from_table(&table).unwrap();
        let keys: Vec<&str> = KeystrokeRecord::for_participant(&records, "1001")
            .map(|r| r.key.as_str())
            .collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_missing_columns() {
        let table = CsvTable::from_reader("key,press_0\na,1.0\n".as_bytes()).unwrap();
        assert!(KeystrokeRecord::from_table(&table).is_err());
    }
}
