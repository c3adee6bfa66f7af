//! AX-021: Append-only JSONL generation journal.

use crate::core::error::{AuroraError, Result};
use crate::core::types::{JournalEvent, TimestampedEvent};
use chrono::{SecondsFormat, Utc};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

/// Journal file name inside the output directory.
pub const EVENT_LOG_FILE: &str = "events.jsonl";

static RUN_SEQ: AtomicU32 = AtomicU32::new(0);

/// RFC 3339 UTC timestamp with second precision.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Generate a run ID, unique within the process.
pub fn generate_run_id() -> String {
    let micros = Utc::now().timestamp_micros() as u64;
    let seq = RUN_SEQ.fetch_add(1, Ordering::Relaxed) & 0xFFFF;
    format!("g-{:012x}{:04x}", micros & 0xFFFF_FFFF_FFFF, seq)
}

/// Derive the journal path for an output directory.
pub fn event_log_path(output_dir: &Path) -> PathBuf {
    output_dir.join(EVENT_LOG_FILE)
}

/// Append one event as a single JSON line.
pub fn append_event(path: &Path, event: JournalEvent) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AuroraError::io(parent, e))?;
    }

    let te = TimestampedEvent {
        ts: now_rfc3339(),
        event,
    };
    let mut line = serde_json::to_string(&te)?;
    line.push('\n');

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| AuroraError::io(path, e))?;
    file.write_all(line.as_bytes())
        .map_err(|e| AuroraError::io(path, e))?;
    Ok(())
}

/// Read every event from a journal. A missing journal reads as empty;
/// lines that do not parse are skipped.
pub fn read_events(path: &Path) -> Result<Vec<TimestampedEvent>> {
    let file = match std::fs::File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(AuroraError::io(path, e)),
    };
    let mut events = Vec::new();
    for line in std::io::BufReader::new(file).lines() {
        let line = line.map_err(|e| AuroraError::io(path, e))?;
        if let Ok(event) = serde_json::from_str::<TimestampedEvent>(&line) {
            events.push(event);
        }
    }
    Ok(events)
}

/// Journal shared between request handlers. Appends are serialized so
/// lines from concurrent generations never interleave.
#[derive(Debug)]
pub struct EventLog {
    path: PathBuf,
    lock: Mutex<()>,
}

impl EventLog {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            path: event_log_path(output_dir),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, event: JournalEvent) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        append_event(&self.path, event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{IntentKind, Lang};
    use std::collections::HashSet;
    use std::sync::Arc;

    fn started(run_id: &str) -> JournalEvent {
        JournalEvent::GenerationStarted {
            run_id: run_id.to_string(),
            kind: IntentKind::WebApp,
            lang: Lang::Python,
            name: "futuristic_timer".to_string(),
        }
    }

    #[test]
    fn test_ax021_now_rfc3339() {
        let ts = now_rfc3339();
        assert!(ts.starts_with("20"));
        assert!(ts.ends_with('Z'));
        assert!(ts.contains('T'));
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }

    #[test]
    fn test_ax021_run_ids_unique() {
        let ids: HashSet<String> = (0..500).map(|_| generate_run_id()).collect();
        assert_eq!(ids.len(), 500);
        assert!(ids.iter().all(|id| id.starts_with("g-") && id.len() == 18));
    }

    #[test]
    fn test_ax021_event_log_path() {
        assert_eq!(
            event_log_path(Path::new("/out")),
            PathBuf::from("/out/events.jsonl")
        );
    }

    #[test]
    fn test_ax021_append_and_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = event_log_path(&dir.path().join("nested"));
        append_event(&path, started("g-1")).unwrap();
        append_event(
            &path,
            JournalEvent::GenerationFailed {
                run_id: "g-2".to_string(),
                error: "disk full".to_string(),
            },
        )
        .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains("\"event\":\"generation_started\""));

        let events = read_events(&path).unwrap();
        assert_eq!(events.len(), 2);
        assert!(matches!(
            events[1].event,
            JournalEvent::GenerationFailed { ref error, .. } if error == "disk full"
        ));
    }

    #[test]
    fn test_ax021_read_missing_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_events(&dir.path().join("none.jsonl")).unwrap().is_empty());
    }

    #[test]
    fn test_ax021_read_skips_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        append_event(&path, started("g-1")).unwrap();
        let mut f = std::fs::OpenOptions::new().append(true).open(&path).unwrap();
        writeln!(f, "not json").unwrap();
        assert_eq!(read_events(&path).unwrap().len(), 1);
    }

    #[test]
    fn test_ax021_concurrent_appends_do_not_interleave() {
        let dir = tempfile::tempdir().unwrap();
        let log = Arc::new(EventLog::new(dir.path()));
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let log = Arc::clone(&log);
                std::thread::spawn(move || {
                    for i in 0..25 {
                        log.append(started(&format!("g-{}-{}", t, i))).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        let content = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(content.lines().count(), 200);
        for line in content.lines() {
            serde_json::from_str::<TimestampedEvent>(line).unwrap();
        }
    }
}
