use std::io::BufRead;

use chrono::NaiveTime;
use regex::Regex;
use tracing::{debug, warn};

use super::error::{ParseError, Result};
use super::fields::{
    apply_metadata, is_metadata_line, is_table_header, parse_decimal, parse_process_line,
};
use super::model::{Metadata, ParseResult, Snapshot};

/// Every snapshot in a `top -b` capture opens with a line starting with this.
pub const BOUNDARY_MARKER: &str = "top - ";

const TIME_PATTERN: &str = r"^top - (\d{2}):(\d{2}):(\d{2})";
const UPTIME_PATTERN: &str = r"\bup\s+(.+?),\s+(?:\d+\s+users?\b|load average:)";
const USERS_PATTERN: &str = r",\s+(\d+)\s+users?\b";
const LOAD_PATTERN: &str = r"load average:\s*([\d.]+),\s*([\d.]+),\s*([\d.]+)";

enum ParserState {
    NoSnapshotYet,
    InSnapshot(Snapshot),
}

/// Collects snapshots as lines are classified.
struct Assembler {
    state: ParserState,
    done: Vec<Snapshot>,
    skipped: usize,
}

impl Assembler {
    fn new() -> Self {
        Self {
            state: ParserState::NoSnapshotYet,
            done: Vec::new(),
            skipped: 0,
        }
    }

    fn open(&mut self, snapshot: Snapshot) {
        if let ParserState::InSnapshot(prev) =
            std::mem::replace(&mut self.state, ParserState::InSnapshot(snapshot))
        {
            self.done.push(prev);
        }
    }

    /// The snapshot lines are currently attributed to. Data ahead of the first
    /// boundary line lands in a zero-valued implicit snapshot.
    fn current(&mut self, line_number: usize) -> &mut Snapshot {
        if let ParserState::NoSnapshotYet = self.state {
            debug!(line = line_number, "data before first boundary line, opening implicit snapshot");
            self.state = ParserState::InSnapshot(Snapshot::default());
        }
        match &mut self.state {
            ParserState::InSnapshot(snapshot) => snapshot,
            ParserState::NoSnapshotYet => unreachable!("implicit snapshot opened above"),
        }
    }

    fn finish(mut self) -> ParseResult {
        if let ParserState::InSnapshot(last) = self.state {
            self.done.push(last);
        }
        let result = ParseResult {
            snapshots: self.done,
        };
        debug!(
            snapshots = result.snapshots.len(),
            processes = result.process_count(),
            skipped = self.skipped,
            "capture parsed"
        );
        result
    }
}

/// Line-oriented parser for `top -b` captures.
///
/// Holds only compiled patterns, so one value can parse any number of
/// captures and separate values can run on separate threads.
pub struct SnapshotParser {
    time: Regex,
    uptime: Regex,
    users: Regex,
    load: Regex,
}

impl Default for SnapshotParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotParser {
    pub fn new() -> Self {
        Self {
            time: Regex::new(TIME_PATTERN).expect("time pattern is valid"),
            uptime: Regex::new(UPTIME_PATTERN).expect("uptime pattern is valid"),
            users: Regex::new(USERS_PATTERN).expect("users pattern is valid"),
            load: Regex::new(LOAD_PATTERN).expect("load pattern is valid"),
        }
    }

    pub fn parse(&self, input: &[u8]) -> Result<ParseResult> {
        self.parse_reader(input)
    }

    /// Drain `reader` and split it into snapshots.
    ///
    /// Fails only if the reader does. Lines that do not parse are logged and
    /// skipped. Bytes that are not UTF-8 are replaced rather than rejected.
    pub fn parse_reader<R: BufRead>(&self, mut reader: R) -> Result<ParseResult> {
        let mut assembler = Assembler::new();
        let mut buf = Vec::new();
        let mut line_number = 0;

        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|source| ParseError::Read {
                    line: line_number + 1,
                    source,
                })?;
            if read == 0 {
                break;
            }
            line_number += 1;

            let text = String::from_utf8_lossy(&buf);
            let line = text.trim();
            if line.is_empty() {
                continue;
            }
            self.consume(line_number, line, &mut assembler);
        }

        Ok(assembler.finish())
    }

    fn consume(&self, line_number: usize, line: &str, assembler: &mut Assembler) {
        if line.starts_with(BOUNDARY_MARKER) {
            assembler.open(self.boundary(line_number, line));
            return;
        }

        if is_metadata_line(line) {
            let snapshot = assembler.current(line_number);
            if let Err(err) = apply_metadata(line, &mut snapshot.metadata) {
                warn!(line = line_number, %err, "skipping metadata line");
                assembler.skipped += 1;
            }
            return;
        }

        let snapshot = assembler.current(line_number);
        if is_table_header(line) {
            return;
        }
        match parse_process_line(line) {
            Ok(record) => snapshot.processes.push(record),
            Err(err) => {
                warn!(line = line_number, %err, text = line, "skipping process line");
                assembler.skipped += 1;
            }
        }
    }

    fn boundary(&self, line_number: usize, line: &str) -> Snapshot {
        let time = match self.boundary_time(line) {
            Some(Some(time)) => time,
            Some(None) => {
                warn!(
                    line = line_number,
                    "invalid time of day on boundary line, using 00:00:00"
                );
                NaiveTime::default()
            }
            None => {
                debug!(line = line_number, "boundary line without HH:MM:SS token");
                NaiveTime::default()
            }
        };
        let mut snapshot = Snapshot::new(time);
        self.boundary_metadata(line, &mut snapshot.metadata);
        snapshot
    }

    /// `None` when there is no time token, `Some(None)` when the token is out
    /// of range (for example `25:00:00`).
    fn boundary_time(&self, line: &str) -> Option<Option<NaiveTime>> {
        let caps = self.time.captures(line)?;
        let part = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());
        Some(match (part(1), part(2), part(3)) {
            (Some(h), Some(m), Some(s)) => NaiveTime::from_hms_opt(h, m, s),
            _ => None,
        })
    }

    /// Uptime, user count and load averages, each taken independently.
    fn boundary_metadata(&self, line: &str, metadata: &mut Metadata) {
        if let Some(caps) = self.uptime.captures(line) {
            let text: Vec<&str> = caps[1].split_whitespace().collect();
            metadata.uptime = format!("up {}", text.join(" "));
        }
        if let Some(users) = self
            .users
            .captures(line)
            .and_then(|caps| caps[1].parse::<u32>().ok())
        {
            metadata.users = users;
        }
        if let Some(caps) = self.load.captures(line) {
            let slots = [
                &mut metadata.load_avg_1,
                &mut metadata.load_avg_5,
                &mut metadata.load_avg_15,
            ];
            for (i, slot) in slots.into_iter().enumerate() {
                if let Some(value) = parse_decimal(&caps[i + 1]) {
                    *slot = value;
                }
            }
        }
    }
}

/// Parse a complete capture with a fresh [`SnapshotParser`].
pub fn parse(input: &[u8]) -> Result<ParseResult> {
    SnapshotParser::new().parse(input)
}
