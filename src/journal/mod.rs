//! Generation journal: BLAKE3 hashing, JSONL event log, drift verification.

pub mod eventlog;
pub mod hasher;
pub mod verify;
