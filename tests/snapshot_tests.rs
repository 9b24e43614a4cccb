use insta::assert_snapshot;
use ttop::capture::parse;
use ttop::series::{SeriesSet, align};

const SAMPLE: &str = include_str!("fixtures/sample_top.txt");

fn sample_series() -> SeriesSet {
    align(&parse(SAMPLE.as_bytes()).unwrap())
}

#[test]
fn sample_process_cpu() {
    let set = sample_series();
    let rendered = set
        .processes
        .iter()
        .map(|p| format!("{}: {:?}", p.label, p.cpu))
        .collect::<Vec<_>>()
        .join("\n");
    assert_snapshot!(rendered);
}

#[test]
fn sample_metrics() {
    let set = sample_series();
    let rendered = [
        format!("times: {:?}", set.times),
        format!("threads.running: {:?}", set.threads.running),
        format!("cpu.user: {:?}", set.cpu.user),
        format!("cpu.idle: {:?}", set.cpu.idle),
        format!("cpu.wait: {:?}", set.cpu.wait),
        format!("memory.used: {:?}", set.memory.used),
        format!("load.one: {:?}", set.load.one),
    ]
    .join("\n");
    assert_snapshot!(rendered);
}
