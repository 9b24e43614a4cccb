use super::{ReportOptions, html_escape};
use crate::series::SeriesSet;

const STYLE: &str = r#"
    :root {
        --bg: #ffffff;
        --bg-alt: #f6f7f9;
        --text: #1f2328;
        --muted: #656d76;
        --border: #d0d7de;
    }
    @media (prefers-color-scheme: dark) {
        :root {
            --bg: #0d1117;
            --bg-alt: #161b22;
            --text: #e6edf3;
            --muted: #8d96a0;
            --border: #30363d;
        }
    }
    body {
        margin: 0;
        padding: 24px;
        background: var(--bg);
        color: var(--text);
        font-family: system-ui, -apple-system, "Segoe UI", sans-serif;
    }
    header { margin-bottom: 24px; }
    header h1 { margin: 0 0 8px; font-size: 1.6rem; }
    .meta { color: var(--muted); margin: 4px 0; white-space: pre-wrap; }
    .source { color: var(--muted); font-size: 0.9rem; }
    .chart {
        height: 360px;
        margin-bottom: 24px;
        background: var(--bg-alt);
        border: 1px solid var(--border);
        border-radius: 6px;
    }
    #process-chart { height: 520px; }
    table { border-collapse: collapse; width: 100%; max-width: 480px; }
    th, td { border-bottom: 1px solid var(--border); padding: 4px 8px; text-align: left; }
    td.num { text-align: right; font-variant-numeric: tabular-nums; }
    .empty { color: var(--muted); font-style: italic; }
"#;

const SCRIPT: &str = r#"
    function lineChart(id, title, yName, names, arrays) {
        const el = document.getElementById(id);
        if (!el || typeof echarts === 'undefined') {
            return;
        }
        const chart = echarts.init(el);
        chart.setOption({
            title: { text: title },
            tooltip: { trigger: 'axis' },
            legend: { type: 'scroll', top: 28 },
            grid: { top: 72, left: 64, right: 24, bottom: 64 },
            xAxis: { type: 'category', data: TTOP_DATA.times },
            yAxis: { type: 'value', name: yName },
            dataZoom: [{ type: 'inside' }, { type: 'slider' }],
            series: names.map((name, i) => ({
                name: name,
                type: 'line',
                showSymbol: false,
                data: arrays[i],
            })),
        });
        window.addEventListener('resize', () => chart.resize());
    }

    const d = TTOP_DATA;
    lineChart('cpu-chart', 'CPU', '%',
        ['user', 'system', 'idle', 'wait', 'steal'],
        [d.cpu.user, d.cpu.system, d.cpu.idle, d.cpu.wait, d.cpu.steal]);
    lineChart('memory-chart', 'Memory', 'MiB',
        ['total', 'free', 'used', 'buff/cache'],
        [d.memory.total, d.memory.free, d.memory.used, d.memory.buff_cache]);
    lineChart('swap-chart', 'Swap', 'MiB',
        ['total', 'free', 'used'],
        [d.swap.total, d.swap.free, d.swap.used]);
    lineChart('threads-chart', 'Threads', 'count',
        ['total', 'running', 'sleeping', 'stopped', 'zombie'],
        [d.threads.total, d.threads.running, d.threads.sleeping, d.threads.stopped, d.threads.zombie]);
    lineChart('load-chart', 'Load average', 'load',
        ['1 min', '5 min', '15 min'],
        [d.load.one, d.load.five, d.load.fifteen]);
    lineChart('process-chart', 'CPU per process', '%',
        d.processes.map(p => p.label),
        d.processes.map(p => p.cpu));
"#;

/// Assemble the page. `data` must already be script-safe JSON.
pub(super) fn build(series: &SeriesSet, options: &ReportOptions, data: &str) -> String {
    let title = html_escape(&options.title);
    let version = html_escape(&options.app_version);
    let echarts_url = html_escape(&options.echarts_url);

    let metadata = if options.metadata.is_empty() {
        String::new()
    } else {
        format!(r#"<p class="meta">{}</p>"#, html_escape(&options.metadata))
    };

    let source = if options.file_name.is_empty() {
        String::new()
    } else {
        format!(
            r#"<p class="source">Source: {} <span title="sha256 {}">({})</span></p>"#,
            html_escape(&options.file_name),
            html_escape(&options.file_hash),
            html_escape(options.short_hash()),
        )
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <meta name="generator" content="ttop {version}">
    <meta name="robots" content="noindex, nofollow">
    <script src="{echarts_url}"></script>
    <style>{STYLE}</style>
</head>
<body>
    <header>
        <h1>{title}</h1>
        {metadata}
        {source}
        <p class="source">{snapshots} snapshots, {processes} processes, ttop {version}</p>
    </header>
    <main>
        <div id="cpu-chart" class="chart"></div>
        <div id="memory-chart" class="chart"></div>
        <div id="swap-chart" class="chart"></div>
        <div id="threads-chart" class="chart"></div>
        <div id="load-chart" class="chart"></div>
        <div id="process-chart" class="chart"></div>
        <section>
            <h2>Snapshots</h2>
            {table}
        </section>
    </main>
    <script>
    const TTOP_DATA = {data};
    {SCRIPT}
    </script>
</body>
</html>
"#,
        snapshots = series.len(),
        processes = series.processes.len(),
        table = snapshot_table(series),
    )
}

fn snapshot_table(series: &SeriesSet) -> String {
    if series.snapshots.is_empty() {
        return r#"<p class="empty">No snapshots found in capture.</p>"#.to_string();
    }

    let mut rows = String::new();
    for row in &series.snapshots {
        rows.push_str(&format!(
            r#"<tr><td>{}</td><td class="num">{}</td></tr>"#,
            html_escape(&row.time),
            row.process_count
        ));
    }
    format!(
        r#"<table id="snapshot-table"><thead><tr><th>Time</th><th>Processes</th></tr></thead><tbody>{rows}</tbody></table>"#
    )
}
