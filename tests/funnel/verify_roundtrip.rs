//! generate -> verify through the command handlers.

use crate::common::{init_tracing, SEED};
use adfunnel::{run_generate, run_verify};
use funnel_args::CommonGenerateArgs;
use funnel_sink::{read_tables, GenerateArgs, OutputArgs, OutputFormat, VerifyArgs};
use tempfile::TempDir;

fn generate_args(dir: &std::path::Path, format: OutputFormat, partitioned: bool) -> GenerateArgs {
    GenerateArgs {
        output: OutputArgs {
            output_dir: dir.to_path_buf(),
            format,
            partitioned,
        },
        common: CommonGenerateArgs {
            seed: Some(SEED),
            num_campaigns: Some(12),
            impressions_per_campaign: Some(300),
            click_rate: Some(0.1),
            conversion_rate: Some(0.2),
            start: Some("2024-01-01".to_string()),
            end: Some("2024-04-01".to_string()),
            ..Default::default()
        },
    }
}

#[test]
fn test_generate_then_verify_csv() {
    init_tracing();
    let temp_dir = TempDir::new().unwrap();

    let generated = run_generate(generate_args(temp_dir.path(), OutputFormat::Csv, false))
        .unwrap()
        .unwrap();
    let verified = run_verify(VerifyArgs {
        input_dir: temp_dir.path().to_path_buf(),
        format: OutputFormat::Csv,
    })
    .unwrap();

    assert_eq!(generated, verified);
}

#[test]
fn test_generate_then_verify_partitioned_jsonl() {
    let temp_dir = TempDir::new().unwrap();

    let generated = run_generate(generate_args(temp_dir.path(), OutputFormat::Jsonl, true))
        .unwrap()
        .unwrap();
    assert!(temp_dir.path().join("campaigns.jsonl").is_file());
    assert!(temp_dir.path().join("impressions").is_dir());

    let verified = run_verify(VerifyArgs {
        input_dir: temp_dir.path().to_path_buf(),
        format: OutputFormat::Jsonl,
    })
    .unwrap();
    assert_eq!(generated.conversions, verified.conversions);
    assert_eq!(generated.impressions, verified.impressions);
}

#[test]
fn test_dry_run_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let output_dir = temp_dir.path().join("out");
    let mut args = generate_args(&output_dir, OutputFormat::Csv, false);
    args.common.dry_run = true;

    assert!(run_generate(args).unwrap().is_none());
    assert!(!output_dir.exists());
}

#[test]
fn test_invalid_rate_fails_before_writing() {
    let temp_dir = TempDir::new().unwrap();
    let output_dir = temp_dir.path().join("out");
    let mut args = generate_args(&output_dir, OutputFormat::Csv, false);
    args.common.click_rate = Some(1.5);

    let err = run_generate(args).unwrap_err();
    assert!(format!("{err:#}").contains("click_rate"));
    assert!(!output_dir.exists());
}

#[test]
fn test_verify_rejects_tampered_table() {
    let temp_dir = TempDir::new().unwrap();
    run_generate(generate_args(temp_dir.path(), OutputFormat::Csv, false)).unwrap();

    // Drop the clicks' parents.
    let tables = read_tables(temp_dir.path(), OutputFormat::Csv).unwrap();
    assert!(!tables.clicks.is_empty());
    let header = std::fs::read_to_string(temp_dir.path().join("impressions.csv"))
        .unwrap()
        .lines()
        .next()
        .unwrap()
        .to_string();
    std::fs::write(temp_dir.path().join("impressions.csv"), header + "\n").unwrap();

    let result = run_verify(VerifyArgs {
        input_dir: temp_dir.path().to_path_buf(),
        format: OutputFormat::Csv,
    });
    assert!(result.is_err());
}

#[test]
fn test_verify_missing_directory() {
    let temp_dir = TempDir::new().unwrap();
    let err = run_verify(VerifyArgs {
        input_dir: temp_dir.path().join("absent"),
        format: OutputFormat::Csv,
    })
    .unwrap_err();
    assert!(format!("{err:#}").contains("not found"));
}
