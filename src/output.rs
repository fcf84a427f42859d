//! Terminal rendering for runs: start banner, live events and the summary.
//! Events and diagnostics go to stderr; the summary goes to stdout.

use crate::defaults::RULE;
use crate::report::SnipReport;
use crate::trim::{RunEvent, TrimState, TrimWindow};
use owo_colors::OwoColorize;
use std::path::Path;
use std::time::Duration;

fn secs(d: Duration) -> String {
    format!("{:.1}s", d.as_secs_f64())
}

fn secs_from_ms(ms: u64) -> String {
    secs(Duration::from_millis(ms))
}

/// Banner describing what is about to be cut.
pub fn render_start(window: &TrimWindow, input: &Path) {
    println!("{}", RULE);
    println!(
        "Snip {} Leading from {}",
        secs(window.start_after),
        input.display()
    );
    if window.trims_tail() {
        println!(
            "Snip {} Trailing from {}",
            secs(window.end_at),
            input.display()
        );
    }
    println!("Starting...");
}

/// Minimum verbosity at which an event is shown.
fn event_level(event: &RunEvent) -> u8 {
    match event {
        RunEvent::StateChanged { .. }
        | RunEvent::Predicted { .. }
        | RunEvent::SummaryHeaderSkipped { .. } => 1,
        RunEvent::TagPassed { .. } | RunEvent::Resynced { .. } => 2,
    }
}

/// Format one event as a single line, or `None` if it is hidden at
/// `verbosity`.
pub fn format_event(event: &RunEvent, verbosity: u8) -> Option<String> {
    if verbosity < event_level(event) {
        return None;
    }
    let line = match event {
        RunEvent::TagPassed { kind, bytes } => {
            format!("[tag] {:?} tag passed through ({} bytes)", kind, bytes)
        }
        RunEvent::SummaryHeaderSkipped { kind, bytes } => {
            format!("[vbr] {} summary header skipped ({} bytes)", kind, bytes)
        }
        RunEvent::Predicted {
            frames,
            effective_bytes,
        } => format!(
            "[predict] ~{} frames from {} frame bytes",
            frames, effective_bytes
        ),
        RunEvent::Resynced { bytes } => format!("[sync] skipped {} unrecognized bytes", bytes),
        RunEvent::StateChanged {
            from,
            to,
            frame,
            at,
        } => format!(
            "[state] {} -> {} at frame {} ({})",
            from,
            to,
            frame,
            secs(*at)
        ),
    };
    Some(line)
}

/// Print an event to stderr if `verbosity` allows it.
pub fn render_event(event: &RunEvent, verbosity: u8) {
    let Some(line) = format_event(event, verbosity) else {
        return;
    };
    match event {
        RunEvent::StateChanged {
            to: TrimState::Passing,
            ..
        } => eprintln!("{}", line.green()),
        RunEvent::StateChanged {
            to: TrimState::TrimmingTail,
            ..
        } => eprintln!("{}", line.yellow()),
        RunEvent::TagPassed { .. } | RunEvent::Resynced { .. } => eprintln!("{}", line.dimmed()),
        _ => eprintln!("{}", line),
    }
}

/// Human-readable summary lines.
pub fn format_summary(report: &SnipReport) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Finished - took {}, saw {} frames vs {} predicted",
            humantime::format_duration(Duration::from_millis(report.elapsed_ms)),
            report.frames_encountered,
            report.predicted_frames
        ),
        format!("Skipped {} frames", report.frames_dropped),
        format!(
            "New file {} long vs {} original",
            secs_from_ms(report.output_duration_ms),
            secs_from_ms(report.cumulative_duration_ms)
        ),
    ];
    // Only a tail trim depends on the estimate.
    if report.end_at_ms > 0 && report.prediction_error != 0 {
        lines.push(format!(
            "Frame estimate was off by {:+} frames; the tail cut is approximate",
            report.prediction_error
        ));
    }
    if let Some(kind) = report.summary_header {
        lines.push(format!("Removed {} summary header", kind));
    }
    if report.skipped_bytes > 0 {
        lines.push(format!(
            "Ignored {} unrecognized bytes",
            report.skipped_bytes
        ));
    }
    if report.dry_run {
        lines.push("Dry run - no output written".to_string());
    }
    lines
}

pub fn render_summary(report: &SnipReport) {
    for line in format_summary(report) {
        println!("{}", line);
    }
    println!("{}", RULE);
}
