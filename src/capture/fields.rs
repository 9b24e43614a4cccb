//! Tokenizer and label table for the metadata block and the process table.

use super::error::LineError;
use super::model::{Metadata, ProcessRecord};

/// Minimum whitespace-separated columns in a process row.
pub(crate) const MIN_PROCESS_COLUMNS: usize = 12;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MetadataKind {
    Threads,
    Cpu,
    Memory,
    Swap,
}

impl MetadataKind {
    /// Unit word expected after each number, in field order.
    fn units(self) -> &'static [&'static str] {
        match self {
            MetadataKind::Threads => &["total", "running", "sleeping", "stopped", "zombie"],
            MetadataKind::Cpu => &["us", "sy", "ni", "id", "wa", "hi", "si", "st"],
            MetadataKind::Memory => &["total", "free", "used", "buff/cache"],
            MetadataKind::Swap => &["total", "free", "used"],
        }
    }

    /// `top` ends the swap clause with `used.` before the avail figure.
    fn trailing_period(self) -> bool {
        self == MetadataKind::Swap
    }
}

pub(crate) struct LineSpec {
    pub prefix: &'static str,
    pub label: &'static str,
    pub kind: MetadataKind,
}

/// Metadata lines recognised by prefix, case-sensitive.
pub(crate) const METADATA_LINES: &[LineSpec] = &[
    LineSpec {
        prefix: "Threads:",
        label: "Threads",
        kind: MetadataKind::Threads,
    },
    LineSpec {
        prefix: "Tasks:",
        label: "Tasks",
        kind: MetadataKind::Threads,
    },
    LineSpec {
        prefix: "%Cpu(s):",
        label: "%Cpu(s)",
        kind: MetadataKind::Cpu,
    },
    LineSpec {
        prefix: "KiB Mem :",
        label: "KiB Mem",
        kind: MetadataKind::Memory,
    },
    LineSpec {
        prefix: "MiB Mem :",
        label: "MiB Mem",
        kind: MetadataKind::Memory,
    },
    LineSpec {
        prefix: "GiB Mem :",
        label: "GiB Mem",
        kind: MetadataKind::Memory,
    },
    LineSpec {
        prefix: "KiB Swap:",
        label: "KiB Swap",
        kind: MetadataKind::Swap,
    },
    LineSpec {
        prefix: "MiB Swap:",
        label: "MiB Swap",
        kind: MetadataKind::Swap,
    },
    LineSpec {
        prefix: "GiB Swap:",
        label: "GiB Swap",
        kind: MetadataKind::Swap,
    },
];

pub(crate) fn is_metadata_line(line: &str) -> bool {
    METADATA_LINES.iter().any(|spec| line.starts_with(spec.prefix))
}

pub(crate) fn is_table_header(line: &str) -> bool {
    line.split_whitespace().next() == Some("PID")
}

/// Parse a metadata line and merge it into `metadata`.
///
/// Values are applied only once the whole line has the expected shape.
pub(crate) fn apply_metadata(line: &str, metadata: &mut Metadata) -> Result<(), LineError> {
    let (label, value) = line.split_once(':').ok_or(LineError::MissingColon)?;
    let label = label.trim();
    let spec = METADATA_LINES
        .iter()
        .find(|spec| spec.label == label)
        .ok_or_else(|| LineError::UnknownLabel(label.to_string()))?;

    let tokens = scan_pairs(value, spec.kind)?;
    match spec.kind {
        MetadataKind::Threads => {
            let v = parse_all(&tokens, |t| t.parse::<u32>().ok())?;
            metadata.threads_total = v[0];
            metadata.threads_running = v[1];
            metadata.threads_sleeping = v[2];
            metadata.threads_stopped = v[3];
            metadata.threads_zombie = v[4];
        }
        MetadataKind::Cpu => {
            // ni, hi and si are validated but not kept.
            let v = parse_all(&tokens, parse_decimal)?;
            metadata.cpu_user = v[0];
            metadata.cpu_system = v[1];
            metadata.cpu_idle = v[3];
            metadata.cpu_wait = v[4];
            metadata.cpu_steal = v[7];
        }
        MetadataKind::Memory => {
            let v = parse_all(&tokens, parse_decimal)?;
            metadata.mem_total = v[0];
            metadata.mem_free = v[1];
            metadata.mem_used = v[2];
            metadata.mem_buff_cache = v[3];
        }
        MetadataKind::Swap => {
            let v = parse_all(&tokens, parse_decimal)?;
            metadata.swap_total = v[0];
            metadata.swap_free = v[1];
            metadata.swap_used = v[2];
        }
    }
    Ok(())
}

/// Split `value` on commas and return the number token of each expected
/// `<number> <unit>` field.
///
/// Fields past the expected count are ignored, as is trailing text inside the
/// last expected field.
fn scan_pairs(value: &str, kind: MetadataKind) -> Result<Vec<&str>, LineError> {
    let units = kind.units();
    let fields: Vec<&str> = value.split(',').collect();
    if fields.len() < units.len() {
        return Err(LineError::FieldCount {
            expected: units.len(),
            found: fields.len(),
        });
    }

    let last = units.len() - 1;
    let mut numbers = Vec::with_capacity(units.len());
    for (index, (field, &unit)) in fields.iter().zip(units).enumerate() {
        let mut tokens = field.split_whitespace();
        let number = tokens.next();
        let word = tokens.next();
        let extra = tokens.next().is_some();

        let word_ok = match word {
            Some(w) if w == unit => true,
            Some(w) if index == last && kind.trailing_period() => w.strip_suffix('.') == Some(unit),
            _ => false,
        };
        match number {
            Some(number) if word_ok && (index == last || !extra) => numbers.push(number),
            _ => {
                return Err(LineError::FieldShape {
                    index,
                    unit,
                    found: field.trim().to_string(),
                });
            }
        }
    }
    Ok(numbers)
}

fn parse_all<T>(tokens: &[&str], parse: impl Fn(&str) -> Option<T>) -> Result<Vec<T>, LineError> {
    tokens
        .iter()
        .enumerate()
        .map(|(index, token)| {
            parse(token).ok_or_else(|| LineError::FieldNumber {
                index,
                token: token.to_string(),
            })
        })
        .collect()
}

/// Parse one process table row.
///
/// `pid`, `%CPU` and `%MEM` must parse or the row is rejected. `PR` and `NI`
/// fall back to zero (real-time tasks show `rt` as their priority).
pub(crate) fn parse_process_line(line: &str) -> Result<ProcessRecord, LineError> {
    let columns: Vec<&str> = line.split_whitespace().collect();
    if columns.len() < MIN_PROCESS_COLUMNS {
        return Err(LineError::TooFewColumns {
            found: columns.len(),
            min: MIN_PROCESS_COLUMNS,
        });
    }

    let pid = columns[0]
        .parse::<i64>()
        .map_err(|_| column_error("PID", columns[0]))?;
    let cpu_percent = parse_decimal(columns[8]).ok_or_else(|| column_error("%CPU", columns[8]))?;
    let mem_percent = parse_decimal(columns[9]).ok_or_else(|| column_error("%MEM", columns[9]))?;

    Ok(ProcessRecord {
        pid,
        user: columns[1].to_string(),
        priority: columns[2].parse().unwrap_or(0),
        nice: columns[3].parse().unwrap_or(0),
        virt: columns[4].to_string(),
        res: columns[5].to_string(),
        shr: columns[6].to_string(),
        state: columns[7].to_string(),
        cpu_percent,
        mem_percent,
        time: columns[10].to_string(),
        command: columns[11..].join(" "),
    })
}

fn column_error(column: &'static str, token: &str) -> LineError {
    LineError::Column {
        column,
        token: token.to_string(),
    }
}

/// Plain decimal: optional sign, digits, optional fraction.
///
/// Rejects exponents, `inf`, `nan` and digit grouping, all of which
/// `f64::from_str` would otherwise accept or misread.
pub(crate) fn parse_decimal(token: &str) -> Option<f64> {
    let unsigned = token.strip_prefix(['+', '-']).unwrap_or(token);
    let (int, frac) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    if int.is_empty() && frac.is_empty() {
        return None;
    }
    let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !digits(int) || !digits(frac) {
        return None;
    }
    token.parse().ok()
}
