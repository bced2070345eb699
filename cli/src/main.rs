use std::io::Read;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use odt_commons_config::{BuildInfo, BuildInfoProvider, CommonsConfig, DEFAULT_CONF_DIR};
use odt_commons_core::{
    Dict, EVERYTHING, Locale, PeriodOfTime, PrecisePeriodOfTime, Ref, SemVersion,
    UNSET_POSITION, check_not_dirty_url, parse_url_params,
};
use serde::Serialize;
use tracing::debug;

const REFERENCE: &str = "odt-commons";

#[derive(Debug, Parser)]
#[command(name = "odt-commons")]
#[command(about = "Inspect open data common values")]
struct Cli {
    /// Directory searched first for logging configuration.
    #[arg(long, global = true, default_value = DEFAULT_CONF_DIR)]
    conf_dir: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse a semantic version and print its parts.
    Semver(SemverArgs),
    /// Build a period of time from a start and an end date.
    Period(PeriodArgs),
    /// Print the URI of a location inside a document.
    Uri(UriArgs),
    /// Read a JSON dictionary from stdin and pick a string from it.
    Dict(DictArgs),
    /// Check a URL and print its query parameters.
    Url(UrlArgs),
    /// Print build information.
    BuildInfo(BuildInfoArgs),
}

#[derive(Debug, Args)]
struct SemverArgs {
    /// Version in MAJOR.MINOR.PATCH[-prerelease] form.
    version: String,
}

#[derive(Debug, Args)]
struct PeriodArgs {
    /// Start date: ISO 8601, "" for unbounded or "?" for unknown.
    start: String,
    /// End date: ISO 8601, "" for unbounded or "?" for unknown.
    end: String,
    /// Drop the raw string and keep only the two dates.
    #[arg(long)]
    precise: bool,
}

#[derive(Debug, Args)]
struct UriArgs {
    /// Identifier of the document.
    #[arg(long, default_value = "")]
    document_id: String,
    /// Path inside the document; "*" addresses the whole document.
    #[arg(long, default_value = EVERYTHING)]
    path: String,
    /// Physical row, -1 when unknown.
    #[arg(long, default_value_t = UNSET_POSITION, allow_negative_numbers = true)]
    row: i64,
    /// Physical column, -1 when unknown.
    #[arg(long, default_value_t = UNSET_POSITION, allow_negative_numbers = true)]
    column: i64,
}

#[derive(Debug, Args)]
struct DictArgs {
    /// Preferred locale as a language tag (e.g. "it", "en-GB").
    #[arg(long, default_value = "")]
    locale: String,
}

#[derive(Debug, Args)]
struct UrlArgs {
    url: String,
}

#[derive(Debug, Args)]
struct BuildInfoArgs {
    /// Build information YAML file.
    #[arg(long, conflicts_with = "resource_dir")]
    file: Option<PathBuf>,
    /// Directory holding the build information of a component.
    #[arg(long)]
    resource_dir: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct SemverReport {
    version: String,
    major: u32,
    minor: u32,
    patch: u32,
    prerelease: String,
}

fn main() {
    let cli = Cli::parse();

    let config = CommonsConfig::new(REFERENCE).with_conf_dir(&cli.conf_dir);
    if let Err(err) = config.init_logging() {
        eprintln!("warning: logging not configured: {err}");
    }

    let result = match cli.command {
        Command::Semver(args) => run_semver(args),
        Command::Period(args) => run_period(args),
        Command::Uri(args) => run_uri(args),
        Command::Dict(args) => run_dict(args),
        Command::Url(args) => run_url(args),
        Command::BuildInfo(args) => run_build_info(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let raw = serde_json::to_string_pretty(value)
        .map_err(|err| format!("Failed to serialize output: {err}"))?;
    println!("{raw}");
    Ok(())
}

fn run_semver(args: SemverArgs) -> Result<(), String> {
    let version = SemVersion::parse(&args.version).map_err(|e| e.to_string())?;
    print_json(&SemverReport {
        version: version.to_string(),
        major: version.major(),
        minor: version.minor(),
        patch: version.patch(),
        prerelease: version.prerelease().to_string(),
    })
}

fn run_period(args: PeriodArgs) -> Result<(), String> {
    if args.precise {
        let period =
            PrecisePeriodOfTime::of(args.start, args.end).map_err(|e| e.to_string())?;
        return print_json(&serde_json::json!({
            "period": period,
            "formatted": period.to_formatted_string(),
        }));
    }
    let period = PeriodOfTime::of(args.start, args.end).map_err(|e| e.to_string())?;
    print_json(&serde_json::json!({
        "period": period,
        "formatted": period.to_formatted_string(),
    }))
}

fn run_uri(args: UriArgs) -> Result<(), String> {
    let location = Ref::builder()
        .document_id(args.document_id)
        .trace_path(args.path)
        .physical_row(args.row)
        .physical_column(args.column)
        .build()
        .map_err(|e| e.to_string())?;
    let uri = location.uri().map_err(|e| e.to_string())?;
    print_json(&serde_json::json!({
        "uri": uri,
        "ref": location,
        "display": location.to_string(),
    }))
}

fn run_dict(args: DictArgs) -> Result<(), String> {
    let locale = Locale::parse(&args.locale).map_err(|e| e.to_string())?;

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .map_err(|err| format!("Failed to read stdin: {err}"))?;
    let dict: Dict =
        serde_json::from_str(&input).map_err(|err| format!("Invalid dictionary: {err}"))?;
    debug!(locales = dict.locales().count(), "read dictionary");

    print_json(&dict.any_string(&locale))
}

fn run_url(args: UrlArgs) -> Result<(), String> {
    let url = check_not_dirty_url(&args.url, "url").map_err(|e| e.to_string())?;
    let params = parse_url_params(url).map_err(|e| e.to_string())?;
    let params: serde_json::Map<String, serde_json::Value> = params
        .into_iter()
        .map(|(name, values)| (name, serde_json::Value::from(values)))
        .collect();
    print_json(&serde_json::json!({ "url": url, "params": params }))
}

fn run_build_info(args: BuildInfoArgs) -> Result<(), String> {
    let info = match (args.file, args.resource_dir) {
        (Some(file), _) => BuildInfo::load(&file),
        (None, Some(dir)) => CommonsConfig::new(REFERENCE)
            .with_resource_dir(dir)
            .build_info(),
        (None, None) => CommonsConfig::new(REFERENCE).build_info(),
    }
    .map_err(|e| e.to_string())?;
    print_json(&info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_period_with_empty_end() {
        let cli = Cli::try_parse_from(["odt-commons", "period", "2014", ""]).unwrap();
        match cli.command {
            Command::Period(args) => {
                assert_eq!(args.start, "2014");
                assert_eq!(args.end, "");
                assert!(!args.precise);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_uri_defaults() {
        let cli = Cli::try_parse_from(["odt-commons", "uri", "--document-id", "a"]).unwrap();
        match cli.command {
            Command::Uri(args) => {
                assert_eq!(args.path, EVERYTHING);
                assert_eq!(args.row, UNSET_POSITION);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_cli_build_info_conflicting_sources() {
        let result = Cli::try_parse_from([
            "odt-commons",
            "build-info",
            "--file",
            "a.yml",
            "--resource-dir",
            "res",
        ]);
        assert!(result.is_err());
    }
}
