use std::fs;
use std::io::BufReader;

use climate_aggregator::stages::{GroupedAggregator, Mapper, Reducer};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const NOISY_CSV: &str = "\
Date,City,Temperature,Humidity,Pressure
# January export, two stations
2024-01-15,Paris,5.5,80.0,1012.3
2024-01-20,Paris,6.5,82.0,1013.7
2024-01-18,Berlin,-1.0,70.0,1008.2
2024-02-03,Paris,8.0,75.0,1015.0
bad-date,Paris,5.5,80.0,1012.3
2024-01-19,Berlin,cold,70.0,1008.2
2024-01-21,Berlin,-3.0,72.0

2024-01-25,Berlin,1.0,68.0,1009.8
";

fn run_mapper(input: &str) -> String {
    let mut out = Vec::new();
    Mapper::new().run(input.as_bytes(), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn run_reducer(input: &str) -> String {
    let mut out = Vec::new();
    Reducer::new().run(input.as_bytes(), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

/// Byte-lexicographic line sort, standing in for the external
/// shuffle/sort stage between the two processes.
fn external_sort(pairs: &str) -> String {
    let mut lines: Vec<&str> = pairs.lines().collect();
    lines.sort_unstable();
    let mut sorted = lines.join("\n");
    if !sorted.is_empty() {
        sorted.push('\n');
    }
    sorted
}

#[test]
fn test_full_pipeline_over_noisy_input() {
    let pairs = run_mapper(NOISY_CSV);
    let output = run_reducer(&external_sort(&pairs));

    assert_eq!(
        output,
        "Berlin_2024-01\t0.00\n\
         Berlin_2024-01_humidity\t69.00\n\
         Berlin_2024-01_pressure\t1009.00\n\
         Paris_2024-01\t6.00\n\
         Paris_2024-01_humidity\t81.00\n\
         Paris_2024-01_pressure\t1013.00\n\
         Paris_2024-02\t8.00\n\
         Paris_2024-02_humidity\t75.00\n\
         Paris_2024-02_pressure\t1015.00\n"
    );
}

#[test]
fn test_single_process_mode_matches_pipeline_bytes() {
    let pipeline = run_reducer(&external_sort(&run_mapper(NOISY_CSV)));

    let mut out = Vec::new();
    GroupedAggregator::new()
        .run(NOISY_CSV.as_bytes(), &mut out)
        .unwrap();
    let single_process = String::from_utf8(out).unwrap();

    assert_eq!(single_process, pipeline);
}

#[test]
fn test_pipeline_is_idempotent() {
    let first = run_reducer(&external_sort(&run_mapper(NOISY_CSV)));
    let second = run_reducer(&external_sort(&run_mapper(NOISY_CSV)));

    assert_eq!(first, second);
}

#[test]
fn test_empty_input_yields_empty_output() {
    assert_eq!(run_mapper(""), "");
    assert_eq!(run_reducer(""), "");
}

#[test]
fn test_unsorted_pairs_split_key_without_grouped_mode() {
    // With the sort stage omitted, a key whose occurrences straddle
    // another key comes out as two partial averages; the grouped mode
    // repairs it.
    let pairs = "Paris_2024-01\t4.0\n\
                 Berlin_2024-01\t0.0\n\
                 Paris_2024-01\t8.0\n";

    let streamed = run_reducer(pairs);
    assert_eq!(
        streamed,
        "Paris_2024-01\t4.00\nBerlin_2024-01\t0.00\nParis_2024-01\t8.00\n"
    );

    let mut out = Vec::new();
    GroupedAggregator::new()
        .reduce_unsorted(pairs.as_bytes(), &mut out)
        .unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Berlin_2024-01\t0.00\nParis_2024-01\t6.00\n"
    );
}

#[test]
fn test_file_backed_stages() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let csv_path = temp_dir.path().join("telemetry.csv");
    let pairs_path = temp_dir.path().join("pairs.tsv");
    let avg_path = temp_dir.path().join("averages.tsv");

    fs::write(&csv_path, NOISY_CSV).unwrap();

    let reader = BufReader::new(fs::File::open(&csv_path).unwrap());
    let mut writer = fs::File::create(&pairs_path).unwrap();
    let map_stats = Mapper::new().run(reader, &mut writer).unwrap();
    assert_eq!(map_stats.records_emitted, 5);
    assert_eq!(map_stats.lines_malformed, 3);

    let sorted = external_sort(&fs::read_to_string(&pairs_path).unwrap());
    fs::write(&pairs_path, &sorted).unwrap();

    let reader = BufReader::new(fs::File::open(&pairs_path).unwrap());
    let mut writer = fs::File::create(&avg_path).unwrap();
    let reduce_stats = Reducer::new().run(reader, &mut writer).unwrap();
    assert_eq!(reduce_stats.groups_flushed, 9);

    let output = fs::read_to_string(&avg_path).unwrap();
    assert!(output.starts_with("Berlin_2024-01\t0.00\n"));
    assert_eq!(output.lines().count(), 9);
}
