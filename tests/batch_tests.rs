//! End-to-end batch runs over files on disk.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use cigarco::batch::{BatchConfig, BatchProcessor, ErrorMode};
use cigarco::cli::{open_input, OutputFormat};
use cigarco::config::CigarcoConfig;
use cigarco::CigarcoError;
use flate2::write::GzEncoder;
use flate2::Compression;
use tempfile::TempDir;

const ALIGNMENTS: &str = "\
# query\ttarget\tstart\tcigar
TR1\tCHR1\t3\t8M7D6M2I2M11D7M
TR2\tCHR2\t10\t20M
";

const QUERIES: &str = "\
TR1\t4
TR2\t0
TR1\t13
TR2\t10
";

fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn write_gz(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
    encoder.write_all(content.as_bytes()).unwrap();
    encoder.finish().unwrap();
    path
}

fn run(config: BatchConfig, alignments: &Path, queries: &Path) -> Result<String, CigarcoError> {
    let mut processor = BatchProcessor::new(config);
    processor.load_alignments(open_input(alignments)?)?;
    let mut out = Vec::new();
    processor.run_queries(open_input(queries)?, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn test_transform_files() {
    let dir = tempfile::tempdir().unwrap();
    let alignments = write_file(&dir, "alignments.tsv", ALIGNMENTS);
    let queries = write_file(&dir, "queries.tsv", QUERIES);

    let output = run(BatchConfig::default(), &alignments, &queries).unwrap();
    assert_eq!(
        output,
        "TR1\t4\tCHR1\t7\nTR2\t0\tCHR2\t10\nTR1\t13\tCHR1\t23\nTR2\t10\tCHR2\t20\n"
    );
}

#[test]
fn test_transform_gzip_files() {
    let dir = tempfile::tempdir().unwrap();
    let alignments = write_gz(&dir, "alignments.tsv.gz", ALIGNMENTS);
    let queries = write_gz(&dir, "queries.tsv.gz", QUERIES);

    let output = run(BatchConfig::default(), &alignments, &queries).unwrap();
    assert_eq!(output.lines().count(), 4);
}

#[test]
fn test_mixed_directions() {
    let dir = tempfile::tempdir().unwrap();
    let alignments = write_file(&dir, "alignments.tsv", ALIGNMENTS);
    let queries = write_file(&dir, "queries.tsv", "TR1\t40\tTQ\nTR1\t4\tQT\n");

    let output = run(BatchConfig::default(), &alignments, &queries).unwrap();
    assert_eq!(output, "TR1\t40\tTR1\t21\nTR1\t4\tCHR1\t7\n");
}

#[test]
fn test_report_mode_skips_bad_records() {
    let dir = tempfile::tempdir().unwrap();
    let alignments = write_file(
        &dir,
        "alignments.tsv",
        "TR1\tCHR1\t3\t8M7D6M2I2M11D7M\nTR3\tCHR3\t-5\t10M\nTR4\tCHR4\t0\t10Z\n",
    );
    let queries = write_file(&dir, "queries.tsv", "TR3\t1\nTR1\t4\nTR1\t99\nTR1\t4\tZZ\n");

    let output = run(
        BatchConfig::new().error_mode(ErrorMode::Report),
        &alignments,
        &queries,
    )
    .unwrap();
    assert_eq!(output, "TR1\t4\tCHR1\t7\n");
}

#[test]
fn test_fail_mode_stops_at_first_error() {
    let dir = tempfile::tempdir().unwrap();
    let alignments = write_file(&dir, "alignments.tsv", ALIGNMENTS);
    let queries = write_file(&dir, "queries.tsv", "TR1\t4\nTR1\t99\nTR2\t0\n");

    let err = run(
        BatchConfig::new().error_mode(ErrorMode::Fail),
        &alignments,
        &queries,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        CigarcoError::CoordinateOutOfRange { coordinate: 99, .. }
    ));
}

#[test]
fn test_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let alignments = write_file(&dir, "alignments.tsv", ALIGNMENTS);
    let queries = write_file(&dir, "queries.tsv", QUERIES);

    let output = run(
        BatchConfig::new().format(OutputFormat::Json),
        &alignments,
        &queries,
    )
    .unwrap();
    let transformed: Vec<u64> = output
        .lines()
        .map(|l| {
            let value: serde_json::Value = serde_json::from_str(l).unwrap();
            value["transformed"].as_u64().unwrap()
        })
        .collect();
    assert_eq!(transformed, vec![7, 10, 23, 20]);
}

#[test]
fn test_config_file_drives_batch() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_file(
        &dir,
        ".cigarco.toml",
        "[batch]\nerror-mode = \"F\"\ncache-capacity = 2\n",
    );
    let alignments = write_file(&dir, "alignments.tsv", ALIGNMENTS);
    let queries = write_file(&dir, "queries.tsv", "TR9\t1\n");

    let config = CigarcoConfig::load_from_path(&config_path).unwrap();
    let err = run(config.to_batch_config(), &alignments, &queries).unwrap_err();
    assert_eq!(
        err,
        CigarcoError::UnknownSequence {
            name: "TR9".to_string()
        }
    );

    // CLI flags override the file
    let batch = config.merge_with_cli(Some(ErrorMode::Ignore), None, None);
    assert_eq!(run(batch, &alignments, &queries).unwrap(), "");
}

#[test]
fn test_duplicate_query_names_last_wins() {
    let dir = tempfile::tempdir().unwrap();
    let alignments = write_file(
        &dir,
        "alignments.tsv",
        "TR1\tCHR1\t0\t10M\nTR1\tCHR7\t100\t10M\n",
    );
    let queries = write_file(&dir, "queries.tsv", "TR1\t1\n");

    let output = run(BatchConfig::default(), &alignments, &queries).unwrap();
    assert_eq!(output, "TR1\t1\tCHR7\t101\n");
}

#[test]
fn test_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.tsv");
    let queries = write_file(&dir, "queries.tsv", QUERIES);

    let err = run(BatchConfig::default(), &missing, &queries).unwrap_err();
    assert!(matches!(err, CigarcoError::Io { .. }));
}
