//! Junction binary
//!
//! Reads a junction box list, joins the closest pairs into circuits and
//! prints both answers. Logs go to stderr; stdout carries only results.

mod args;
mod error;

use std::io::Read;
use std::path::Path;

use junction_circuits::{analyze, parse_points, AnalysisReport, PairSource};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{CliError, Result};

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "junction=info,junction_circuits=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let options = match args::parse(std::env::args().skip(1), |key| std::env::var(key).ok()) {
        Ok(options) => options,
        Err(e) => {
            args::print_usage();
            return Err(e.into());
        }
    };

    if options.help {
        args::print_usage();
        return Ok(());
    }

    let text = read_input(options.input.as_deref())?;
    let points = parse_points(&text).map_err(CliError::from)?;
    tracing::info!("Loaded {} junction boxes", points.len());

    let report = analyze(&points, &options.config);

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report).map_err(CliError::from)?);
    } else {
        print!("{}", render(&report));
    }

    Ok(())
}

/// Read the whole point list from a file, or stdin when no path is given.
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(CliError::Stdin)?;
            Ok(text)
        }
    }
}

/// Plain-text answers, with notes for any phase that stopped early.
fn render(report: &AnalysisReport) -> String {
    let answers = report.answers();
    let mut out = format!("Answer 1: {}\n", answers.largest_product);

    match answers.connecting_metric {
        Some(metric) => out.push_str(&format!("Answer 2: {}\n", metric)),
        None => out.push_str("Answer 2: unavailable\n"),
    }

    if !report.bounded.status.is_completed() {
        out.push_str(&format!(
            "Note: bounded phase ended early ({}) after {} of {} joins\n",
            report.bounded.status,
            report.bounded.accepted,
            report.config.target_count
        ));
    }
    if !report.full.status.is_completed() {
        out.push_str(&format!(
            "Note: full connectivity not reached ({}); {} circuits remain\n",
            report.full.status,
            report.final_sizes.len()
        ));
    }
    if let Some(resolved) = report.resolved {
        if resolved.source == PairSource::LastAccepted {
            out.push_str(&format!("Note: answer 2 uses last accepted pair {}\n", resolved.pair));
        }
    }
    if report.is_degenerate() {
        out.push_str(&format!(
            "Note: {} junction boxes cannot be joined\n",
            report.point_count
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use junction_circuits::AnalysisConfig;
    use std::io::Write;

    #[test]
    fn renders_both_answers() {
        let points = parse_points("0,0,0\n1,0,0\n2,0,0\n100,0,0\n101,0,0\n").unwrap();
        let report = analyze(&points, &AnalysisConfig::default().with_target_count(3));
        assert_eq!(render(&report), "Answer 1: 6\nAnswer 2: 200\n");
    }

    #[test]
    fn renders_unavailable_for_single_box() {
        let points = parse_points("5,5,5\n").unwrap();
        let report = analyze(&points, &AnalysisConfig::default());
        let text = render(&report);
        assert!(text.starts_with("Answer 1: 1\nAnswer 2: unavailable\n"), "{}", text);
        assert!(text.contains("bounded phase ended early"));
        assert!(text.contains("cannot be joined"));
    }

    #[test]
    fn renders_cap_fallback_note() {
        let points = parse_points("0,0,0\n1,0,0\n3,0,0\n7,0,0\n").unwrap();
        let config = AnalysisConfig::default().with_target_count(1).with_hard_cap(2);
        let text = render(&analyze(&points, &config));
        assert!(text.contains("Answer 2: 3\n"), "{}", text);
        assert!(text.contains("join cap reached"));
        assert!(text.contains("last accepted pair 1-2"));
    }

    #[test]
    fn reads_input_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1,2,3").unwrap();
        writeln!(file, "4,5,6").unwrap();

        let text = read_input(Some(file.path())).unwrap();
        assert_eq!(parse_points(&text).unwrap().len(), 2);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_input(Some(dir.path().join("absent.txt").as_path())).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }

    #[test]
    fn report_serializes_to_json() {
        let points = parse_points("0,0,0\n1,0,0\n").unwrap();
        let report = analyze(&points, &AnalysisConfig::default());
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["point_count"], 2);
        assert_eq!(json["full"]["status"], "completed");
        assert_eq!(json["resolved"]["source"], "full_connectivity");
        assert_eq!(json["config"]["budget"], "accepted");
    }
}
