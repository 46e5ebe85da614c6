//! generate -> append-campaigns -> verify through the command handlers.

use crate::common::{init_tracing, small_config, SEED};
use adfunnel::{run_append, run_verify};
use funnel_args::AppendArgs;
use funnel_core::{ids, Campaign, FunnelSink};
use funnel_sink::{read_csv, CsvSink, OutputFormat, VerifyArgs};
use tempfile::TempDir;

fn write_dataset(dir: &std::path::Path) {
    let tables = crate::common::generate(small_config());
    CsvSink::new(dir).write_tables(&tables).unwrap();
}

fn append_args(dir: &std::path::Path, count: u64) -> AppendArgs {
    AppendArgs {
        campaigns: dir.join("campaigns.csv"),
        num_campaigns: count,
        seed: SEED,
        reference: Some("2024-07-10T08:00:00Z".to_string()),
        first_sequence: None,
        dry_run: false,
    }
}

#[test]
fn test_append_preserves_existing_rows() {
    init_tracing();
    let temp_dir = TempDir::new().unwrap();
    write_dataset(temp_dir.path());
    let path = temp_dir.path().join("campaigns.csv");
    let before: Vec<Campaign> = read_csv(&path).unwrap();

    let appended = run_append(append_args(temp_dir.path(), 4)).unwrap();
    let after: Vec<Campaign> = read_csv(&path).unwrap();

    assert_eq!(appended.len(), 4);
    assert_eq!(after.len(), before.len() + 4);
    assert_eq!(&after[..before.len()], &before[..]);
    assert_eq!(after[before.len()].campaign_id, "CMP-NEW-1000");
    assert!(after[before.len()..]
        .iter()
        .all(|c| c.campaign_name.starts_with("NEW: ")));
}

#[test]
fn test_second_append_continues_sequence() {
    let temp_dir = TempDir::new().unwrap();
    write_dataset(temp_dir.path());

    run_append(append_args(temp_dir.path(), 3)).unwrap();
    let second = run_append(append_args(temp_dir.path(), 3)).unwrap();

    let sequences: Vec<_> = second
        .iter()
        .map(|c| ids::parse_sequence(&c.campaign_id, ids::NEW_CAMPAIGN_PREFIX).unwrap())
        .collect();
    assert_eq!(sequences, vec![1003, 1004, 1005]);
}

#[test]
fn test_dry_run_leaves_file_untouched() {
    let temp_dir = TempDir::new().unwrap();
    write_dataset(temp_dir.path());
    let path = temp_dir.path().join("campaigns.csv");
    let before = std::fs::read(&path).unwrap();

    let mut args = append_args(temp_dir.path(), 2);
    args.dry_run = true;
    assert_eq!(run_append(args).unwrap().len(), 2);
    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[test]
fn test_appended_dataset_still_verifies() {
    let temp_dir = TempDir::new().unwrap();
    write_dataset(temp_dir.path());
    run_append(append_args(temp_dir.path(), 5)).unwrap();

    let summary = run_verify(VerifyArgs {
        input_dir: temp_dir.path().to_path_buf(),
        format: OutputFormat::Csv,
    })
    .unwrap();
    assert_eq!(summary.campaigns, small_config().num_campaigns as usize + 5);
}

#[test]
fn test_append_to_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let err = run_append(append_args(temp_dir.path(), 1)).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to read campaigns"));
}
