/*!
 * Workload Loader
 *
 * Parses the textual descriptor stream: whitespace-separated records of
 * `arrival pid run io repeat`. Ingestion stops at the first record that
 * cannot be parsed; everything before it is kept.
 */

use crate::core::{Pid, SchedulerError, SchedulerResult, Tick};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// Fields per workload record
const RECORD_FIELDS: usize = 5;

/// One raw line of workload input
///
/// Phase values stay signed so the core can reject negatives with a proper
/// error instead of the loader silently dropping them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct WorkloadRecord {
    pub arrival_time: Tick,
    pub pid: Pid,
    pub run_ticks: i64,
    pub io_ticks: i64,
    pub repeat_count: i64,
}

impl WorkloadRecord {
    #[inline]
    #[must_use]
    pub const fn new(
        arrival_time: Tick,
        pid: Pid,
        run_ticks: i64,
        io_ticks: i64,
        repeat_count: i64,
    ) -> Self {
        Self {
            arrival_time,
            pid,
            run_ticks,
            io_ticks,
            repeat_count,
        }
    }

    fn parse_fields(fields: &[&str]) -> Option<Self> {
        match fields {
            [arrival, pid, run, io, repeat] => Some(Self {
                arrival_time: arrival.parse().ok()?,
                pid: pid.parse().ok()?,
                run_ticks: run.parse().ok()?,
                io_ticks: io.parse().ok()?,
                repeat_count: repeat.parse().ok()?,
            }),
            _ => None,
        }
    }
}

/// Ordered workload records as handed to the scheduler
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workload {
    records: Vec<WorkloadRecord>,
    truncated: bool,
}

impl Workload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: impl IntoIterator<Item = WorkloadRecord>) -> Self {
        Self {
            records: records.into_iter().collect(),
            truncated: false,
        }
    }

    pub fn push(&mut self, record: WorkloadRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[WorkloadRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether parsing stopped early on malformed or short input
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// Parse descriptor text, keeping the valid prefix
    pub fn parse(input: &str) -> Self {
        let tokens: Vec<&str> = input.split_whitespace().collect();
        let mut workload = Self::new();

        for (index, fields) in tokens.chunks(RECORD_FIELDS).enumerate() {
            match WorkloadRecord::parse_fields(fields) {
                Some(record) => workload.push(record),
                None => {
                    warn!(
                        "Workload truncated at record {}: {:?} is not a valid record",
                        index + 1,
                        fields
                    );
                    workload.truncated = true;
                    break;
                }
            }
        }

        debug!(
            "Parsed {} workload records (truncated: {})",
            workload.len(),
            workload.truncated
        );
        workload
    }

    /// Read and parse an entire stream
    pub fn from_reader<R: Read>(mut reader: R) -> SchedulerResult<Self> {
        let mut input = String::new();
        reader
            .read_to_string(&mut input)
            .map_err(|e| SchedulerError::Workload(e.to_string()))?;
        Ok(Self::parse(&input))
    }

    /// Read and parse a workload file
    pub fn from_path(path: impl AsRef<Path>) -> SchedulerResult<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| SchedulerError::Workload(format!("{}: {}", path.display(), e)))?;
        Self::from_reader(std::io::BufReader::new(file))
    }
}

impl FromStr for Workload {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl FromIterator<WorkloadRecord> for Workload {
    fn from_iter<I: IntoIterator<Item = WorkloadRecord>>(iter: I) -> Self {
        Self::from_records(iter)
    }
}

/// Parse a workload from any reader
pub fn parse_workload<R: Read>(reader: R) -> SchedulerResult<Workload> {
    Workload::from_reader(reader)
}
