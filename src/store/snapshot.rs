//! Belief snapshot persistence.
//!
//! The snapshot is a JSON object mapping each belief name to its bucket,
//! every record carrying the name, the argument list, and the original
//! creation instant as an integer microsecond tick count. Files are
//! written to a temporary sibling first and atomically renamed into place,
//! so a crash mid-save never leaves a truncated snapshot at the target
//! path.
//!
//! Loading decodes the whole file before anything else happens; the caller
//! swaps the result in only on success, which makes restore all-or-nothing.
//! Restored beliefs get their creation instant reset to the load-time now —
//! the original instants are serialized but deliberately discarded, because
//! reloaded memory is treated as "recalled just now".

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::belief::Belief;
use crate::error::SnapshotError;

/// On-disk shape of one belief.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotRecord {
    name: String,
    args: Vec<String>,
    /// Original creation instant, microseconds since the Unix epoch.
    recorded_at_us: i64,
}

impl From<&Belief> for SnapshotRecord {
    fn from(belief: &Belief) -> Self {
        Self {
            name: belief.name.clone(),
            args: belief.args.clone(),
            recorded_at_us: belief.recorded_at.timestamp_micros(),
        }
    }
}

/// Serializes `buckets` and writes them atomically to `path`.
///
/// # Errors
///
/// Returns [`SnapshotError::Io`] on any file failure.
pub fn save(buckets: &HashMap<String, Vec<Belief>>, path: &Path) -> Result<(), SnapshotError> {
    let records: HashMap<&str, Vec<SnapshotRecord>> = buckets
        .iter()
        .map(|(name, bucket)| {
            (
                name.as_str(),
                bucket.iter().map(SnapshotRecord::from).collect(),
            )
        })
        .collect();

    let bytes = serde_json::to_vec_pretty(&records)
        .map_err(|e| SnapshotError::corrupt(format!("failed to serialize snapshot: {e}")))?;
    write_atomic(path, &bytes)?;

    let beliefs: usize = buckets.values().map(Vec::len).sum();
    info!(path = %path.display(), beliefs, "saved belief snapshot");
    Ok(())
}

/// Reads and fully decodes the snapshot at `path`.
///
/// Every restored belief's creation instant is set to `restored_at`; the
/// serialized instants are validated for shape but not carried over.
///
/// # Errors
///
/// Returns [`SnapshotError::Io`] if the file cannot be read and
/// [`SnapshotError::Corrupt`] if its contents are not a valid snapshot.
pub fn load(
    path: &Path,
    restored_at: DateTime<Utc>,
) -> Result<HashMap<String, Vec<Belief>>, SnapshotError> {
    let bytes = fs::read(path)?;
    let records: HashMap<String, Vec<SnapshotRecord>> = serde_json::from_slice(&bytes)
        .map_err(|e| SnapshotError::corrupt(format!("failed to parse snapshot: {e}")))?;

    let mut buckets = HashMap::with_capacity(records.len());
    let mut beliefs = 0usize;
    for (bucket_name, bucket) in records {
        let mut restored = Vec::with_capacity(bucket.len());
        for record in bucket {
            if record.name.is_empty() {
                return Err(SnapshotError::corrupt("belief record with empty name"));
            }
            if record.name != bucket_name {
                return Err(SnapshotError::corrupt(format!(
                    "belief named {:?} filed under bucket {:?}",
                    record.name, bucket_name
                )));
            }
            restored.push(Belief::recorded(record.name, record.args, restored_at));
        }
        beliefs += restored.len();
        buckets.insert(bucket_name, restored);
    }

    info!(path = %path.display(), beliefs, "restored belief snapshot");
    Ok(buckets)
}

/// Write-to-temp-then-rename so readers never observe a partial file.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), SnapshotError> {
    let temp_path = path.with_extension("tmp");
    {
        let mut file = File::create(&temp_path)?;
        file.write_all(bytes)?;
        file.sync_all()?;
    }
    fs::rename(&temp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::BeliefPattern;
    use crate::store::BeliefBase;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn save_then_restore_preserves_content_and_resets_time() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("beliefs.json");

        let base = BeliefBase::new();
        let long_ago = Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0).unwrap();
        base.add_record(Belief::recorded("seen", args(&["tree"]), long_ago))
            .unwrap();
        base.add("likes", args(&["alice", "tea"])).unwrap();
        base.save_to(&path).unwrap();

        let restored = BeliefBase::new();
        restored.add("stale", vec![]).unwrap();
        let before_restore = Utc::now();
        restored.restore_from(&path).unwrap();

        // Content matches the saved store; the pre-restore belief is gone.
        assert_eq!(restored.len().unwrap(), 2);
        assert!(restored
            .search(&BeliefPattern::new().name("stale"))
            .unwrap()
            .is_empty());
        let seen = restored
            .search(&BeliefPattern::new().name("seen"))
            .unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].args, args(&["tree"]));

        // Original instants are discarded in favor of the restore time.
        for belief in restored.search(&BeliefPattern::any()).unwrap() {
            assert!(belief.recorded_at >= before_restore);
        }
    }

    #[test]
    fn restore_missing_file_leaves_store_intact() {
        let dir = tempdir().unwrap();

        let base = BeliefBase::new();
        base.add("seen", args(&["tree"])).unwrap();

        let err = base
            .restore_from(dir.path().join("absent.json"))
            .unwrap_err();
        assert!(err.is_snapshot());
        assert_eq!(base.len().unwrap(), 1);
    }

    #[test]
    fn restore_invalid_json_leaves_store_intact() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("beliefs.json");
        fs::write(&path, b"{ not json").unwrap();

        let base = BeliefBase::new();
        base.add("seen", args(&["tree"])).unwrap();

        let err = base.restore_from(&path).unwrap_err();
        assert!(matches!(
            err,
            crate::error::MemoryError::Snapshot(SnapshotError::Corrupt { .. })
        ));
        assert_eq!(base.len().unwrap(), 1);
    }

    #[test]
    fn restore_rejects_misfiled_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("beliefs.json");
        fs::write(
            &path,
            br#"{"seen": [{"name": "heard", "args": [], "recorded_at_us": 0}]}"#,
        )
        .unwrap();

        let err = load(&path, Utc::now()).unwrap_err();
        assert!(matches!(err, SnapshotError::Corrupt { .. }));
        assert!(err.to_string().contains("heard"));
    }

    #[test]
    fn restore_rejects_empty_names() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("beliefs.json");
        fs::write(
            &path,
            br#"{"": [{"name": "", "args": [], "recorded_at_us": 0}]}"#,
        )
        .unwrap();

        let err = load(&path, Utc::now()).unwrap_err();
        assert!(err.to_string().contains("empty name"));
    }

    #[test]
    fn save_replaces_an_existing_snapshot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("beliefs.json");

        let base = BeliefBase::new();
        base.add("seen", args(&["tree"])).unwrap();
        base.save_to(&path).unwrap();

        base.add("seen", args(&["rock"])).unwrap();
        base.save_to(&path).unwrap();

        let restored = BeliefBase::new();
        restored.restore_from(&path).unwrap();
        assert_eq!(restored.len().unwrap(), 2);
    }
}
