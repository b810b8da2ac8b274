//! Batch processor implementation.

use std::io::{BufRead, Write};
use std::time::{Duration, Instant};

use tracing::{debug, error, info};

use crate::cli::{
    output_result, parse_alignment_line, parse_query_line, process_input_line, OutputFormat,
};
use crate::error::CigarcoError;
use crate::mapping::MapperRegistry;

use super::ErrorMode;

/// Configuration for batch processing.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Reaction to bad records and failed lookups.
    pub error_mode: ErrorMode,
    /// Format of transformation results.
    pub format: OutputFormat,
    /// Per-mapper LRU bound; `None` keeps caches unbounded.
    pub cache_capacity: Option<usize>,
    /// Log progress every N records (0 disables).
    pub progress_interval: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::default(),
            format: OutputFormat::default(),
            cache_capacity: None,
            progress_interval: 100_000,
        }
    }
}

impl BatchConfig {
    /// Create a new batch configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the error mode.
    pub fn error_mode(mut self, error_mode: ErrorMode) -> Self {
        self.error_mode = error_mode;
        self
    }

    /// Set the output format.
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Bound each mapper's result cache.
    pub fn cache_capacity(mut self, capacity: Option<usize>) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Set the progress logging interval.
    pub fn progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }
}

/// Counts for one pass over a record stream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    /// Records read (blank and comment lines excluded).
    pub processed: usize,
    /// Records that produced a result.
    pub succeeded: usize,
    /// Records skipped because of an error.
    pub failed: usize,
    /// Wall-clock processing time.
    pub duration: Duration,
}

impl BatchSummary {
    /// Calculate success rate as a percentage.
    pub fn success_rate(&self) -> f64 {
        if self.processed == 0 {
            100.0
        } else {
            (self.succeeded as f64 / self.processed as f64) * 100.0
        }
    }

    /// Records per second, or 0.0 when no time has elapsed.
    pub fn items_per_second(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs < f64::EPSILON {
            0.0
        } else {
            self.processed as f64 / secs
        }
    }
}

/// Loads alignments into a registry and answers query records against it.
#[derive(Debug)]
pub struct BatchProcessor {
    config: BatchConfig,
    registry: MapperRegistry,
}

impl BatchProcessor {
    /// Create a processor with an empty registry.
    pub fn new(config: BatchConfig) -> Self {
        let registry = match config.cache_capacity {
            Some(capacity) => MapperRegistry::with_cache_capacity(capacity),
            None => MapperRegistry::new(),
        };
        Self { config, registry }
    }

    /// The processor's configuration.
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// The registry populated by [`load_alignments`](Self::load_alignments).
    pub fn registry(&self) -> &MapperRegistry {
        &self.registry
    }

    /// Read alignment records and register them.
    ///
    /// # Errors
    ///
    /// Read failures always abort. Record errors abort only in
    /// [`ErrorMode::Fail`].
    pub fn load_alignments<R: BufRead>(&mut self, reader: R) -> Result<BatchSummary, CigarcoError> {
        let start = Instant::now();
        let mut summary = BatchSummary::default();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_num = idx + 1;
            let Some(record) = process_input_line(&line, idx == 0) else {
                continue;
            };
            summary.processed += 1;

            match parse_alignment_line(record, line_num) {
                Ok(alignment) => {
                    self.registry.add_alignment(alignment);
                    summary.succeeded += 1;
                }
                Err(e) => {
                    summary.failed += 1;
                    self.handle_error(e, line_num, record)?;
                }
            }
        }

        summary.duration = start.elapsed();
        info!(
            records = summary.processed,
            loaded = summary.succeeded,
            skipped = summary.failed,
            alignments = self.registry.len(),
            "loaded alignments"
        );
        Ok(summary)
    }

    /// Answer query records, writing one result line per successful lookup.
    ///
    /// # Errors
    ///
    /// Read and write failures always abort. Record and lookup errors abort
    /// only in [`ErrorMode::Fail`].
    pub fn run_queries<R: BufRead, W: Write>(
        &self,
        reader: R,
        writer: &mut W,
    ) -> Result<BatchSummary, CigarcoError> {
        let start = Instant::now();
        let mut summary = BatchSummary::default();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_num = idx + 1;
            let Some(record) = process_input_line(&line, idx == 0) else {
                continue;
            };
            summary.processed += 1;

            let outcome = parse_query_line(record, line_num).and_then(|query| {
                self.registry
                    .transform(&query.query_name, query.coordinate, query.direction)
                    .map(|result| (query, result))
            });

            match outcome {
                Ok((query, result)) => {
                    output_result(writer, &query, &result, self.config.format)?;
                    summary.succeeded += 1;
                }
                Err(e) => {
                    summary.failed += 1;
                    self.handle_error(e, line_num, record)?;
                }
            }

            if self.config.progress_interval > 0
                && summary.processed % self.config.progress_interval == 0
            {
                debug!(processed = summary.processed, "query progress");
            }
        }

        writer.flush()?;
        summary.duration = start.elapsed();
        info!(
            records = summary.processed,
            transformed = summary.succeeded,
            skipped = summary.failed,
            elapsed_ms = summary.duration.as_millis() as u64,
            "processed queries"
        );
        Ok(summary)
    }

    fn handle_error(
        &self,
        err: CigarcoError,
        line_num: usize,
        record: &str,
    ) -> Result<(), CigarcoError> {
        match self.config.error_mode {
            ErrorMode::Ignore => Ok(()),
            ErrorMode::Report => {
                error!(line = line_num, record, code = %err.code(), "{}", err);
                Ok(())
            }
            ErrorMode::Fail => {
                error!(line = line_num, record, code = %err.code(), "{}", err);
                Err(err)
            }
        }
    }
}
