//! CLI binary for viewmd.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ViewConfig` and reports where the output went.

use anyhow::{Context, Result};
use clap::builder::BoolishValueParser;
use clap::{ArgAction, CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use std::ffi::OsString;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use viewmd::{view, SanitizePolicy, ViewConfig, ViewProgressCallback, DEFAULT_WAIT_SECS};

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}

// ── Cleanup countdown using indicatif ────────────────────────────────────────

/// Shows a spinner while the run waits to delete the workspace.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::hidden();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}  {elapsed:.dim}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        Arc::new(Self { bar })
    }
}

impl ViewProgressCallback for CliProgressCallback {
    fn on_cleanup_wait(&self, dir: &Path, wait_secs: u64) {
        self.bar.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        self.bar
            .set_message(format!("Removing {} in {wait_secs}s…", dir.display()));
        self.bar.enable_steady_tick(Duration::from_millis(80));
    }

    fn on_cleanup_complete(&self, _dir: &Path, _removed: bool) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Preview a file (removed again after 3 seconds)
  viewmd README.md

  # Several files, each in its own tab
  viewmd docs/*.md

  # Keep the generated HTML
  viewmd -keep notes.md

  # Give a slow browser more time before cleanup
  viewmd -wait 10 notes.md

  # Text-only output, in a full HTML page, opened in Firefox
  viewmd --policy strict --standalone --browser firefox notes.md

  # Machine-readable report of what was written
  viewmd --json --keep notes.md

Go-style single-dash long flags (-keep, -keep=false, -wait N, -wait=N,
-help) are accepted as well as --keep, --wait N and --help. Switches take
an optional =true / =false (also 1/0, yes/no, on/off).

ENVIRONMENT VARIABLES:
  VIEWMD_KEEP        Same as --keep
  VIEWMD_WAIT        Same as --wait
  VIEWMD_POLICY      Same as --policy
  VIEWMD_BROWSER     Same as --browser
  RUST_LOG           Log filter (overrides --verbose / --quiet)
"#;

/// Render Markdown files and display the output in a browser.
#[derive(Parser, Debug)]
#[command(
    name = "viewmd",
    version,
    about = "Renders a Markdown file and displays the output in browser",
    long_about = "Renders Markdown files to sanitized HTML, opens each result in the default \
browser, and deletes the generated files after a short delay.",
    override_usage = "viewmd [OPTIONS] <INPUT.md>...",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Markdown files to display, in order.
    inputs: Vec<PathBuf>,

    /// Keep the generated HTML files.
    #[arg(
        long,
        env = "VIEWMD_KEEP",
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new(),
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        default_value_t = false
    )]
    keep: bool,

    /// Number of seconds to wait before deleting generated files (ignored if --keep is set).
    #[arg(long, env = "VIEWMD_WAIT", value_name = "N", default_value_t = DEFAULT_WAIT_SECS)]
    wait: u64,

    /// Sanitization policy: ugc (formatting, links, images) or strict (text only).
    #[arg(long, env = "VIEWMD_POLICY", value_enum, default_value = "ugc")]
    policy: PolicyArg,

    /// Wrap each output in a full HTML page with a charset and title.
    #[arg(
        long,
        env = "VIEWMD_STANDALONE",
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new(),
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        default_value_t = false
    )]
    standalone: bool,

    /// Open outputs with this application instead of the default handler.
    #[arg(long, env = "VIEWMD_BROWSER", value_name = "APP")]
    browser: Option<String>,

    /// Print a JSON report of the written files on stdout.
    #[arg(
        long,
        env = "VIEWMD_JSON",
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new(),
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        default_value_t = false
    )]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(
        short, long,
        env = "VIEWMD_VERBOSE",
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new(),
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        default_value_t = false
    )]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(
        short, long,
        env = "VIEWMD_QUIET",
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new(),
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        default_value_t = false
    )]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum PolicyArg {
    Ugc,
    Strict,
}

impl From<PolicyArg> for SanitizePolicy {
    fn from(v: PolicyArg) -> Self {
        match v {
            PolicyArg::Ugc => SanitizePolicy::Ugc,
            PolicyArg::Strict => SanitizePolicy::Strict,
        }
    }
}

/// Long flags that may also be spelled with a single dash.
const LONG_FLAGS: &[&str] = &[
    "help",
    "version",
    "keep",
    "wait",
    "policy",
    "standalone",
    "browser",
    "json",
    "verbose",
    "quiet",
];

/// Rewrite Go-style `-flag` / `-flag=value` arguments to `--flag`.
///
/// Only names in [`LONG_FLAGS`] are rewritten, and nothing after a bare
/// `--`, so short flags (`-v`) and file names starting with a dash that
/// follow `--` are left alone.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut out = Vec::new();
    let mut passthrough = false;

    for arg in args {
        if passthrough {
            out.push(arg);
            continue;
        }
        let rewritten = arg.to_str().and_then(|s| {
            if s == "--" {
                return None;
            }
            let rest = s.strip_prefix('-').filter(|r| !r.starts_with('-'))?;
            let name = rest.split_once('=').map_or(rest, |(n, _)| n);
            LONG_FLAGS.contains(&name).then(|| OsString::from(format!("-{s}")))
        });
        if arg == "--" {
            passthrough = true;
        }
        out.push(rewritten.unwrap_or(arg));
    }
    out
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));

    // No files: usage and a clean exit, before any temp dir exists.
    if cli.inputs.is_empty() {
        Cli::command()
            .print_help()
            .context("Failed to print usage")?;
        return Ok(());
    }

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let show_progress = !cli.quiet && !cli.json && io::stderr().is_terminal();
    let config = build_config(&cli, show_progress)?;

    // ── Run ──────────────────────────────────────────────────────────────
    let report = view(&cli.inputs, &config)
        .await
        .context("viewmd failed")?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialise report")?
        );
    } else if report.kept && !cli.quiet {
        eprintln!(
            "{} {} file(s) kept in {}",
            green("✔"),
            report.files.len(),
            report.temp_dir.display()
        );
    }

    Ok(())
}

/// Map CLI args to `ViewConfig`.
fn build_config(cli: &Cli, show_progress: bool) -> Result<ViewConfig> {
    let mut builder = ViewConfig::builder()
        .keep(cli.keep)
        .wait_secs(cli.wait)
        .policy(cli.policy.into())
        .standalone(cli.standalone);

    if let Some(ref app) = cli.browser {
        builder = builder.browser(app.clone());
    }
    if show_progress {
        let cb = CliProgressCallback::new();
        builder = builder.progress_callback(cb as Arc<dyn ViewProgressCallback>);
    }

    builder.build().context("Invalid configuration")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(args: &[&str]) -> Vec<String> {
        normalize_args(args.iter().map(OsString::from))
            .into_iter()
            .map(|a| a.into_string().unwrap())
            .collect()
    }

    #[test]
    fn go_style_flags_are_rewritten() {
        assert_eq!(
            norm(&["viewmd", "-keep", "-wait", "5", "a.md"]),
            ["viewmd", "--keep", "--wait", "5", "a.md"]
        );
        assert_eq!(norm(&["viewmd", "-wait=7", "a.md"]), ["viewmd", "--wait=7", "a.md"]);
        assert_eq!(norm(&["viewmd", "-help"]), ["viewmd", "--help"]);
    }

    #[test]
    fn double_dash_and_short_flags_untouched() {
        assert_eq!(
            norm(&["viewmd", "--keep", "-v", "-q", "a.md"]),
            ["viewmd", "--keep", "-v", "-q", "a.md"]
        );
    }

    #[test]
    fn unknown_single_dash_words_untouched() {
        assert_eq!(norm(&["viewmd", "-notes.md"]), ["viewmd", "-notes.md"]);
    }

    #[test]
    fn nothing_after_separator_is_rewritten() {
        assert_eq!(
            norm(&["viewmd", "--", "-keep"]),
            ["viewmd", "--", "-keep"]
        );
    }

    #[test]
    fn parses_go_style_command_line() {
        let cli = Cli::try_parse_from(normalize_args(
            ["viewmd", "-keep", "-wait", "9", "a.md", "b.md"].map(OsString::from),
        ))
        .unwrap();
        assert!(cli.keep);
        assert_eq!(cli.wait, 9);
        assert_eq!(cli.inputs, [PathBuf::from("a.md"), PathBuf::from("b.md")]);
    }

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(normalize_args(args.iter().map(OsString::from)))
    }

    #[test]
    fn go_style_bool_values() {
        assert!(!parse(&["viewmd", "-keep=false", "a.md"]).unwrap().keep);
        assert!(parse(&["viewmd", "-keep=true", "a.md"]).unwrap().keep);
        assert!(parse(&["viewmd", "--keep=1", "a.md"]).unwrap().keep);

        let cli = parse(&["viewmd", "-standalone=t", "-json=false", "-quiet=0", "a.md"]).unwrap();
        assert!(cli.standalone);
        assert!(!cli.json);
        assert!(!cli.quiet);
    }

    #[test]
    fn bare_switch_does_not_take_the_next_argument() {
        let cli = parse(&["viewmd", "-keep", "a.md", "-verbose", "b.md"]).unwrap();
        assert!(cli.keep);
        assert!(cli.verbose);
        assert_eq!(cli.inputs, [PathBuf::from("a.md"), PathBuf::from("b.md")]);
    }

    #[test]
    fn short_switches_still_work() {
        let cli = parse(&["viewmd", "-v", "a.md"]).unwrap();
        assert!(cli.verbose);
        assert!(!cli.quiet);
    }

    #[test]
    fn invalid_bool_value_is_rejected() {
        assert!(parse(&["viewmd", "-keep=maybe", "a.md"]).is_err());
    }

    #[test]
    fn wait_defaults_to_three() {
        let cli = Cli::try_parse_from(["viewmd", "a.md"]).unwrap();
        assert_eq!(cli.wait, 3);
        assert!(!cli.keep);
    }

    #[test]
    fn negative_wait_is_rejected() {
        assert!(Cli::try_parse_from(["viewmd", "--wait", "-1", "a.md"]).is_err());
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }
}
