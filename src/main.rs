//! # chataudit CLI
//!
//! Command-line interface for the chataudit library.

use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;

use chataudit::AuditError;
use chataudit::cli::{Args, DEFAULT_OUTPUT};
use chataudit::config::Settings;
use chataudit::core::{
    CountRow, RecordCollection, RuleSet, Summary, apply_filters, category_options,
};
use chataudit::format::{OutputFormat, write_to_format};
use chataudit::parser::{ExportParser, ParseStats};

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), AuditError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();

    let settings = match args.config {
        Some(ref path) => Settings::load(path)?,
        None => Settings::default(),
    };
    setup_logging(&args, &settings);

    let rules = load_rules(&args, &settings)?;
    let filter_spec = args.filter_spec()?;
    let format = args.output_format()?;
    let output_path = adjust_output_extension(&args.output, format);

    println!("🔎 chataudit v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input.display());
    println!("📏 Rules:   {} ({} categories)", rules.len(), rules.categories().len());
    if !args.summary_only {
        println!("💾 Output:  {}", output_path.display());
        println!("📄 Format:  {}", format);
    }
    println!();

    let parser = ExportParser::with_config(rules, settings.to_parser_config());
    let parse_start = Instant::now();
    let export = parser.parse(&args.input)?;
    println!(
        "✅ Detected {} messages ({:.2}s)",
        export.stats.messages,
        parse_start.elapsed().as_secs_f64()
    );
    print_parse_stats(&export.stats);

    let summary = Summary::from_records(&export.records);
    if let (Some(first), Some(last)) = (summary.first_date, summary.last_date) {
        println!("   Span:      {} → {}", first.format("%d/%m/%Y"), last.format("%d/%m/%Y"));
    }

    println!();
    print_counts("📊 Messages per category", &summary.categories);
    println!();
    print_counts("👤 Messages per author", &summary.authors);

    let filtered = apply_filters(&export.records, &filter_spec);
    let options = category_options(&export.records, &filter_spec);

    println!();
    if filter_spec.is_active() {
        println!("🔍 Filtered: {} messages", filtered.len());
    }
    if options.is_empty() {
        println!("🏷️  Categories: (none)");
    } else {
        println!("🏷️  Categories: {}", options.join(", "));
    }

    if args.explain {
        println!();
        print_explanations(&filtered, parser.rules());
    }

    if !args.summary_only {
        write_to_format(&filtered, &output_path, format)?;
        println!();
        println!(
            "💾 Wrote {} rows to {}",
            filtered.len(),
            output_path.display()
        );
    }

    tracing::info!(
        elapsed_ms = total_start.elapsed().as_millis(),
        "audit finished"
    );
    Ok(())
}

/// Rule text comes from `--rules`, then the settings file, then the
/// built-in rules.
fn load_rules(args: &Args, settings: &Settings) -> Result<RuleSet, AuditError> {
    let Some(ref path) = args.rules else {
        return Ok(settings.rule_set());
    };

    let text = std::fs::read_to_string(path)?;
    let rules = Settings {
        rules: Some(text),
        ..settings.clone()
    }
    .rule_set();

    if rules.is_empty() {
        tracing::warn!(path = %path.display(), "rules file declares no categories");
    }
    Ok(rules)
}

/// Set up tracing with stderr output.
///
/// `RUST_LOG` wins, then `-v` flags, then the settings file, then `warn`.
fn setup_logging(args: &Args, settings: &Settings) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let level = args
        .verbosity_level()
        .or(settings.log_level.as_deref())
        .unwrap_or("warn");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}

fn print_parse_stats(stats: &ParseStats) {
    if let Some(format) = stats.format {
        println!("   Format:    {} ({})", format, stats.encoding);
    }
    if stats.orphan_lines > 0 {
        println!("   Skipped:   {} lines before the first message", stats.orphan_lines);
    }
    if stats.unmatched_lines > 0 {
        println!("   Unmatched: {} lines without author", stats.unmatched_lines);
    }
    if stats.undated_messages > 0 {
        println!("   Undated:   {} messages with unreadable dates", stats.undated_messages);
    }
}

fn print_counts(title: &str, rows: &[CountRow]) {
    println!("{title}:");
    if rows.is_empty() {
        println!("   (none)");
        return;
    }

    let width = rows.iter().map(|r| r.name.chars().count()).max().unwrap_or(0);
    for row in rows {
        println!("   {:<width$}  {:>6}", row.name, row.count, width = width);
    }
}

fn print_explanations(records: &RecordCollection, rules: &RuleSet) {
    println!("🧩 Classification:");
    for msg in records {
        match rules.explain(msg.body()) {
            Some(m) => println!(
                "   {} {} {} → {} (rule {}, \"{}\")",
                msg.display_date(),
                msg.time(),
                msg.author(),
                m.category,
                m.index + 1,
                m.keyword
            ),
            None => println!(
                "   {} {} {} → {} (fallback)",
                msg.display_date(),
                msg.time(),
                msg.author(),
                msg.category()
            ),
        }
    }
}

/// Adjusts output file extension based on format if using default output.
fn adjust_output_extension(output: &Path, format: OutputFormat) -> PathBuf {
    if output != Path::new(DEFAULT_OUTPUT) {
        return output.to_path_buf();
    }
    output.with_extension(format.extension())
}
