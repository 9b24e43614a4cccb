use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::series::ProcessSeries;

pub fn truncate_unicode(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            result.push('\u{2026}');
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

/// Truncate to `width` columns, then pad with spaces to exactly `width`.
pub fn fit_unicode(s: &str, width: usize) -> String {
    let mut out = truncate_unicode(s, width);
    let pad = width.saturating_sub(out.width());
    out.extend(std::iter::repeat_n(' ', pad));
    out
}

/// Plain-text table of processes by peak CPU, busiest first.
pub fn process_summary(processes: &[ProcessSeries], label_width: usize) -> String {
    let mut rows: Vec<&ProcessSeries> = processes.iter().collect();
    rows.sort_by(|a, b| b.peak_cpu().total_cmp(&a.peak_cpu()));

    let mut out = format!(
        "{}  {:>8}  {:>8}\n",
        fit_unicode("PROCESS", label_width),
        "PEAK%",
        "SEEN"
    );
    for p in rows {
        let seen = p.cpu.iter().filter(|v| **v > 0.0).count();
        out.push_str(&format!(
            "{}  {:>8.1}  {:>8}\n",
            fit_unicode(&p.label, label_width),
            p.peak_cpu(),
            seen
        ));
    }
    out
}
