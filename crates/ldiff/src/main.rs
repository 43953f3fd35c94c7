//! ldiff CLI - line-level diff with collapsible sections

mod config;
mod logging;
mod render;
mod source;

use anyhow::{Context, Result};
use clap::Parser;
use config::{ColorChoice, Config, Format};
use ldiff_core::report::summary_line;
use ldiff_core::{export_report, DiffResult, FoldNavigator};
use render::RenderOptions;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "ldiff")]
#[command(author, version, about = "A line-level diff with collapsible sections")]
struct Args {
    /// Old file (`-` reads stdin)
    old: PathBuf,

    /// New file (`-` reads stdin)
    new: PathBuf,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Expand collapsed unchanged sections
    #[arg(long)]
    expand: bool,

    /// When to use colors
    #[arg(long, value_enum)]
    color: Option<ColorChoice>,

    /// Hide the line number gutter
    #[arg(long)]
    no_line_numbers: bool,

    /// Print only the change counts
    #[arg(long)]
    stats: bool,

    /// Similarity above which differing lines count as modified (0..=1)
    #[arg(long, value_parser = parse_unit)]
    modify_threshold: Option<f64>,

    /// Similarity below which a modification is a conflict (0..=1)
    #[arg(long, value_parser = parse_unit)]
    conflict_threshold: Option<f64>,

    /// Exit with status 1 when the inputs differ
    #[arg(long)]
    exit_code: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_unit(value: &str) -> Result<f64, String> {
    let parsed: f64 = value
        .parse()
        .map_err(|e| format!("invalid number '{value}': {e}"))?;
    if (0.0..=1.0).contains(&parsed) {
        Ok(parsed)
    } else {
        Err(format!("{value} is not within 0..=1"))
    }
}

/// Output settings after merging CLI flags over config
#[derive(Debug, Clone, Copy)]
struct OutputPlan {
    format: Format,
    stats_only: bool,
    expand: bool,
    render: RenderOptions,
}

impl OutputPlan {
    fn new(args: &Args, config: &Config, color: bool) -> Self {
        Self {
            format: args.format.unwrap_or(config.output.format),
            stats_only: args.stats,
            expand: args.expand || config.output.expand,
            render: RenderOptions {
                color,
                line_numbers: config.output.line_numbers && !args.no_line_numbers,
            },
        }
    }
}

fn use_color(choice: ColorChoice, to_file: bool) -> bool {
    if to_file {
        return false;
    }
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

fn render_output(diff: DiffResult, plan: OutputPlan) -> Result<String> {
    if plan.stats_only {
        return match plan.format {
            Format::Json => {
                let mut json = serde_json::to_string_pretty(&diff.stats)
                    .context("Failed to serialize stats")?;
                json.push('\n');
                Ok(json)
            }
            _ => Ok(format!("{}\n", summary_line(&diff.stats))),
        };
    }

    match plan.format {
        Format::Text => {
            let mut nav = FoldNavigator::new(diff);
            if plan.expand {
                nav.expand_all();
            }
            Ok(render::render_text(&nav, plan.render))
        }
        Format::Json => {
            let mut json =
                serde_json::to_string_pretty(&diff).context("Failed to serialize diff")?;
            json.push('\n');
            Ok(json)
        }
        Format::Report => Ok(export_report(&diff)),
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    logging::init(args.verbose)?;
    let config = Config::load();

    let (old_source, new_source) = source::resolve(&args.old, &args.new)?;
    let limit = config.input.limit();
    let old = old_source
        .read(limit)
        .with_context(|| format!("Failed to read old input: {}", old_source.label()))?;
    let new = new_source
        .read(limit)
        .with_context(|| format!("Failed to read new input: {}", new_source.label()))?;

    // CLI thresholds override config
    let mut engine = config.engine();
    if let Some(modify) = args.modify_threshold {
        engine = engine.with_modify_threshold(modify);
    }
    if let Some(conflict) = args.conflict_threshold {
        engine = engine.with_conflict_threshold(conflict);
    }
    let thresholds = engine.thresholds();
    if thresholds.modify > thresholds.conflict {
        tracing::warn!(
            modify = thresholds.modify,
            conflict = thresholds.conflict,
            "modify threshold is above conflict threshold; no modification will be a conflict"
        );
    }

    let diff = engine.diff_strings(&old, &new);
    tracing::info!(
        old = %old_source.label(),
        new = %new_source.label(),
        records = diff.records.len(),
        sections = diff.sections.len(),
        "diffed inputs"
    );
    let identical = diff.is_identical();

    let color = use_color(args.color.unwrap_or(config.output.color), args.output.is_some());
    let plan = OutputPlan::new(&args, &config, color);
    let output = render_output(diff, plan)?;

    match &args.output {
        Some(path) => std::fs::write(path, &output)
            .with_context(|| format!("Failed to write output: {}", path.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(output.as_bytes())
                .and_then(|()| stdout.flush())
                .context("Failed to write to stdout")?;
        }
    }

    if args.exit_code && !identical {
        return Ok(ExitCode::from(1));
    }
    Ok(ExitCode::SUCCESS)
}
