//! Trim command entry point.
//!
//! Orchestrates the complete flow:
//! validate arguments → open files → single pass → report

use crate::cli::{Cli, parse_duration};
use crate::config::{Config, ReportFormat};
use crate::defaults::IO_BUFFER_BYTES;
use crate::error::{Result, SnipError};
use crate::mpeg::MpegReader;
use crate::output::{render_event, render_start, render_summary};
use crate::report::SnipReport;
use crate::trim::{PredictionPolicy, RunEvent, RunStats, Snipper, TrimWindow};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// A fully validated trim job.
#[derive(Debug, Clone, PartialEq)]
pub struct TrimRequest {
    pub window: TrimWindow,
    pub input: PathBuf,
    /// `None` for a dry run.
    pub output: Option<PathBuf>,
    pub prediction: PredictionPolicy,
    pub keep_partial: bool,
}

fn duration_arg(flag: &str, value: &str) -> Result<Duration> {
    parse_duration(value).map_err(|message| SnipError::InvalidDuration {
        flag: flag.to_string(),
        message,
    })
}

/// Validate CLI arguments against the configuration, before any file is
/// opened. CLI values win over configured ones.
pub fn resolve_request(cli: &Cli, config: &Config) -> Result<TrimRequest> {
    let start = cli
        .start
        .as_deref()
        .or(config.trim.start.as_deref())
        .ok_or_else(|| SnipError::missing("start time flag"))?;
    let start_after = duration_arg("--start", start)?;

    let end_at = match cli.end.as_deref().or(config.trim.end.as_deref()) {
        Some(end) => Some(duration_arg("--end", end)?),
        None => None,
    };

    let input = cli
        .input
        .clone()
        .ok_or_else(|| SnipError::missing("input file path"))?;

    let output = if cli.dry_run {
        None
    } else {
        let output = cli
            .output
            .clone()
            .ok_or_else(|| SnipError::missing("output file path"))?;
        if same_file(&input, &output) {
            return Err(SnipError::Other(format!(
                "Refusing to overwrite input {} with output",
                input.display()
            )));
        }
        Some(output)
    };

    Ok(TrimRequest {
        window: TrimWindow::new(start_after, end_at),
        input,
        output,
        prediction: cli.prediction.unwrap_or(config.trim.prediction),
        keep_partial: cli.keep_partial,
    })
}

fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Run one trim job.
///
/// The output file is created only after the input opened successfully. On
/// failure a partial output is removed unless `keep_partial` is set.
pub fn run_trim(
    request: &TrimRequest,
    event_tx: Option<crossbeam_channel::Sender<RunEvent>>,
) -> Result<SnipReport> {
    let started = Instant::now();

    let open_err = |source| SnipError::OpenInput {
        path: request.input.clone(),
        source,
    };
    let input = File::open(&request.input).map_err(open_err)?;
    let input_bytes = input.metadata().map_err(open_err)?.len();
    let reader = MpegReader::new(BufReader::with_capacity(IO_BUFFER_BYTES, input));

    let stats = match &request.output {
        None => trim_into(request, reader, std::io::sink(), input_bytes, event_tx)?,
        Some(path) => {
            let file = File::create(path).map_err(|source| SnipError::CreateOutput {
                path: path.clone(),
                source,
            })?;
            let writer = BufWriter::with_capacity(IO_BUFFER_BYTES, file);
            let result = trim_into(request, reader, writer, input_bytes, event_tx);
            if result.is_err()
                && !request.keep_partial
                && let Err(e) = fs::remove_file(path)
            {
                eprintln!(
                    "Warning: could not remove partial output {}: {}",
                    path.display(),
                    e
                );
            }
            result?
        }
    };

    Ok(
        SnipReport::new(&request.window, request.prediction, &stats, started.elapsed())
            .with_dry_run(request.output.is_none()),
    )
}

fn trim_into<R: std::io::Read, W: Write>(
    request: &TrimRequest,
    reader: MpegReader<R>,
    sink: W,
    input_bytes: u64,
    event_tx: Option<crossbeam_channel::Sender<RunEvent>>,
) -> Result<RunStats> {
    let mut snipper = Snipper::new(reader, sink, request.window, input_bytes)
        .with_prediction_policy(request.prediction);
    if let Some(tx) = event_tx {
        snipper = snipper.with_event_sender(tx);
    }
    let (stats, mut sink) = snipper.run()?;
    sink.flush().map_err(SnipError::Write)?;
    Ok(stats)
}

/// Run the trim command: validate → trim → print summary.
///
/// Events are rendered on a separate thread while the pass runs, so the pass
/// itself never waits on the terminal.
pub fn run_trim_command(cli: &Cli, config: &Config) -> Result<SnipReport> {
    let request = resolve_request(cli, config)?;
    let format = cli.report_format(config.report.format);
    let show_text = !cli.quiet && format == ReportFormat::Text;

    if show_text {
        render_start(&request.window, &request.input);
    }

    let verbosity = cli.verbose;
    let (event_tx, renderer) = if !cli.quiet && verbosity > 0 {
        let (tx, rx) = crossbeam_channel::unbounded::<RunEvent>();
        let handle = std::thread::spawn(move || {
            for event in rx {
                render_event(&event, verbosity);
            }
        });
        (Some(tx), Some(handle))
    } else {
        (None, None)
    };

    let result = run_trim(&request, event_tx);
    if let Some(handle) = renderer {
        // The sender was dropped with the snipper, so the thread is finishing.
        if handle.join().is_err() {
            eprintln!("Warning: event renderer panicked");
        }
    }
    let report = result?;

    match format {
        ReportFormat::Json if !cli.quiet => {
            let json = report
                .to_json()
                .map_err(|e| SnipError::Other(format!("Failed to render report: {}", e)))?;
            println!("{}", json);
        }
        ReportFormat::Text if !cli.quiet => render_summary(&report),
        _ => {}
    }

    Ok(report)
}
