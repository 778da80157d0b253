//! Corpus aggregation.
//!
//! Reads every NDJSON file discovered under a corpus root into a DataFrame
//! and materializes the whole corpus as one unified frame. Per-file frames
//! are buffered and concatenated once, diagonally, so files with differing
//! column sets union their columns with null fill.

use crate::app::models::CorpusStats;
use crate::app::services::discovery;
use crate::error::{EtlError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

/// Parse one NDJSON file into a DataFrame, one row per record.
pub fn read_records(path: &Path) -> Result<DataFrame> {
    let file = File::open(path)?;
    let df = JsonLineReader::new(file)
        .finish()
        .map_err(|e| EtlError::parse(path, e.to_string()))?;
    debug!("Parsed {} records from {}", df.height(), path.display());
    Ok(df)
}

/// Aggregate every matching file under `root` into one unified DataFrame.
///
/// The entire corpus is materialized in memory. Column sets are unioned
/// across files; rows from files missing a column receive nulls.
pub fn aggregate(root: &Path, pattern: &str) -> Result<(DataFrame, CorpusStats)> {
    let files = discovery::collect_files(root, pattern)?;
    println!("{} files found in {}", files.len(), root.display());

    if files.is_empty() {
        return Err(EtlError::CorpusEmpty {
            path: root.to_path_buf(),
            pattern: pattern.to_string(),
        });
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message("Reading files");

    let mut frames = Vec::with_capacity(files.len());
    for path in &files {
        if let Some(name) = path.file_name() {
            pb.set_message(format!("Reading: {}", name.to_string_lossy()));
        }
        frames.push(read_records(path)?.lazy());
        pb.inc(1);
    }
    pb.finish_and_clear();

    let processed = frames.len();
    let union_args = UnionArgs {
        to_supertypes: true,
        ..Default::default()
    };
    let df = concat_lf_diagonal(frames, union_args)?.collect()?;

    let stats = CorpusStats {
        files_found: files.len(),
        files_processed: processed,
        rows: df.height(),
    };
    println!("{}/{} total files processed.", processed, stats.files_found);
    info!(
        "Aggregated {} rows from {} files under {}",
        stats.rows,
        processed,
        root.display()
    );

    Ok((df, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_records_one_row_per_line() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("records.json");
        fs::write(
            &path,
            "{\"song_id\": \"S1\", \"title\": \"First\", \"year\": 2001}\n\
             {\"song_id\": \"S2\", \"title\": \"Second\", \"year\": 2002}\n",
        )
        .unwrap();

        let df = read_records(&path).unwrap();
        assert_eq!(df.height(), 2);
        assert!(df.column("song_id").is_ok());
        assert!(df.column("title").is_ok());
    }

    #[test]
    fn test_read_records_invalid_content_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "this is not json\n").unwrap();

        let result = read_records(&path);
        assert!(matches!(result, Err(EtlError::Parse { .. })));
    }

    #[test]
    fn test_aggregate_concatenates_all_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("corpus");
        let sub = root.join("A");
        fs::create_dir_all(&sub).unwrap();

        fs::write(
            root.join("one.json"),
            "{\"song_id\": \"S1\", \"title\": \"First\"}\n",
        )
        .unwrap();
        fs::write(
            sub.join("two.json"),
            "{\"song_id\": \"S2\", \"title\": \"Second\"}\n\
             {\"song_id\": \"S3\", \"title\": \"Third\"}\n",
        )
        .unwrap();

        let (df, stats) = aggregate(&root, "*.json").unwrap();
        assert_eq!(stats.files_found, 2);
        assert_eq!(stats.files_processed, 2);
        assert_eq!(stats.rows, 3);
        assert_eq!(df.height(), 3);
    }

    #[test]
    fn test_aggregate_unions_columns_with_null_fill() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_path_buf();

        fs::write(
            root.join("a.json"),
            "{\"song_id\": \"S1\", \"title\": \"First\"}\n",
        )
        .unwrap();
        fs::write(
            root.join("b.json"),
            "{\"song_id\": \"S2\", \"duration\": 101.5}\n",
        )
        .unwrap();

        let (df, _) = aggregate(&root, "*.json").unwrap();
        assert_eq!(df.height(), 2);

        // Union of per-file columns, nulls where a file lacked the column
        assert!(df.column("title").is_ok());
        assert!(df.column("duration").is_ok());
        assert_eq!(df.column("title").unwrap().null_count(), 1);
        assert_eq!(df.column("duration").unwrap().null_count(), 1);
    }

    #[test]
    fn test_aggregate_empty_corpus_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = aggregate(temp_dir.path(), "*.json");
        assert!(matches!(result, Err(EtlError::CorpusEmpty { .. })));
    }
}
