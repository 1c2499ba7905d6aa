//! Command-line and environment options.
//!
//! Precedence: flag, then `JUNCTION_*` environment variable, then default.

use std::path::PathBuf;

use junction_circuits::{AnalysisConfig, BudgetPolicy};

use crate::error::{CliError, Result};

/// Everything a run needs from the outside world.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// `None` reads stdin
    pub input: Option<PathBuf>,
    pub config: AnalysisConfig,
    pub json: bool,
    pub help: bool,
}

pub fn print_usage() {
    eprintln!("junction - join the closest junction boxes into circuits");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  junction [OPTIONS] [INPUT]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  INPUT               Point list, one x,y,z per line (default/-: stdin)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --joins <N>         Joins applied before the first answer (default: 1000)");
    eprintln!("  --cap <N>           Accepted-join cap while connecting (default: 1000000)");
    eprintln!("  --largest <K>       Largest circuits multiplied (default: 3)");
    eprintln!("  --count-attempts    Count skipped candidates toward --joins");
    eprintln!("  --json              Print the full report as JSON");
    eprintln!("  -h, --help          Show this message");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  JUNCTION_JOINS, JUNCTION_CAP, JUNCTION_LARGEST  Defaults for the flags above");
    eprintln!("  RUST_LOG                                        Log filter (logs go to stderr)");
}

/// Parse arguments (without the program name), reading fallbacks through `env`.
pub fn parse<I, F>(args: I, env: F) -> Result<Options>
where
    I: IntoIterator<Item = String>,
    F: Fn(&str) -> Option<String>,
{
    let mut config = AnalysisConfig::default();
    if let Some(value) = env("JUNCTION_JOINS") {
        config.target_count = parse_count("JUNCTION_JOINS", &value)?;
    }
    if let Some(value) = env("JUNCTION_CAP") {
        config.hard_cap = parse_count("JUNCTION_CAP", &value)?;
    }
    if let Some(value) = env("JUNCTION_LARGEST") {
        config.largest = parse_count("JUNCTION_LARGEST", &value)?;
    }

    let mut input = None;
    let mut json = false;
    let mut help = false;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => help = true,
            "--json" => json = true,
            "--count-attempts" => config.budget = BudgetPolicy::Attempted,
            "--joins" => config.target_count = parse_count(&arg, &value_for(&arg, args.next())?)?,
            "--cap" => config.hard_cap = parse_count(&arg, &value_for(&arg, args.next())?)?,
            "--largest" => config.largest = parse_count(&arg, &value_for(&arg, args.next())?)?,
            "-" => set_input(&mut input, None)?,
            flag if flag.starts_with('-') => {
                return Err(CliError::Usage(format!("unknown option {}", flag)));
            }
            path => set_input(&mut input, Some(PathBuf::from(path)))?,
        }
    }

    if !help {
        config.validate()?;
    }

    Ok(Options {
        input: input.flatten(),
        config,
        json,
        help,
    })
}

fn value_for(flag: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| CliError::Usage(format!("{} needs a value", flag)))
}

fn parse_count(name: &str, value: &str) -> Result<usize> {
    value
        .trim()
        .parse()
        .map_err(|_| CliError::Usage(format!("{} expects a non-negative integer, got {:?}", name, value)))
}

fn set_input(slot: &mut Option<Option<PathBuf>>, value: Option<PathBuf>) -> Result<()> {
    if slot.is_some() {
        return Err(CliError::Usage("only one INPUT may be given".to_string()));
    }
    *slot = Some(value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_read_stdin() {
        let options = parse(args(&[]), no_env).unwrap();
        assert_eq!(options.input, None);
        assert_eq!(options.config, AnalysisConfig::default());
        assert!(!options.json);
        assert!(!options.help);
    }

    #[test]
    fn flags_override_defaults() {
        let options = parse(
            args(&["--joins", "10", "--cap", "1000", "--largest", "2", "--count-attempts", "--json", "boxes.txt"]),
            no_env,
        )
        .unwrap();
        assert_eq!(options.input, Some(PathBuf::from("boxes.txt")));
        assert_eq!(options.config.target_count, 10);
        assert_eq!(options.config.hard_cap, 1000);
        assert_eq!(options.config.largest, 2);
        assert_eq!(options.config.budget, BudgetPolicy::Attempted);
        assert!(options.json);
    }

    #[test]
    fn environment_fills_missing_flags() {
        let env = |key: &str| match key {
            "JUNCTION_JOINS" => Some("25".to_string()),
            "JUNCTION_LARGEST" => Some("4".to_string()),
            _ => None,
        };
        let options = parse(args(&["--largest", "5"]), env).unwrap();
        assert_eq!(options.config.target_count, 25);
        assert_eq!(options.config.largest, 5);
        assert_eq!(options.config.hard_cap, 1_000_000);
    }

    #[test]
    fn dash_means_stdin() {
        let options = parse(args(&["-"]), no_env).unwrap();
        assert_eq!(options.input, None);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(parse(args(&["--joins"]), no_env), Err(CliError::Usage(_))));
        assert!(matches!(parse(args(&["--joins", "ten"]), no_env), Err(CliError::Usage(_))));
        assert!(matches!(parse(args(&["--cap", "-1"]), no_env), Err(CliError::Usage(_))));
        assert!(matches!(parse(args(&["--frobnicate"]), no_env), Err(CliError::Usage(_))));
        assert!(matches!(parse(args(&["a.txt", "b.txt"]), no_env), Err(CliError::Usage(_))));
        let bad_env = |_: &str| Some("lots".to_string());
        assert!(matches!(parse(args(&[]), bad_env), Err(CliError::Usage(_))));
    }

    #[test]
    fn unknown_short_flags_are_usage_errors() {
        for flag in ["-v", "-j", "-x"] {
            let err = parse(args(&[flag]), no_env).unwrap_err();
            match err {
                CliError::Usage(message) => assert!(message.contains(flag), "{}", message),
                other => panic!("{} should be a usage error, got {:?}", flag, other),
            }
        }
        assert!(parse(args(&["-h"]), no_env).unwrap().help);
    }

    #[test]
    fn zero_largest_is_rejected() {
        let err = parse(args(&["--largest", "0"]), no_env).unwrap_err();
        assert!(matches!(err, CliError::Engine(junction_circuits::Error::InvalidConfig(_))));
    }

    #[test]
    fn help_skips_validation() {
        let options = parse(args(&["--largest", "0", "--help"]), no_env).unwrap();
        assert!(options.help);
    }
}
