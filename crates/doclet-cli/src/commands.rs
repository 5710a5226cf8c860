//! CLI command implementations.

use crate::HookSet;
use colored::Colorize;
use doclet_core::{email_address, DocletError, DocletOptions, RecordSet};
use doclet_graft::{
    Doclet, Emit, GraftReport, HookTable, JsonHooks, MergeAnomaly, NullEmitter, RunOutcome,
    WriterEmitter,
};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::debug;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Options of the `run` command besides the input.
pub struct RunArgs<'a> {
    pub config: Option<&'a Path>,
    pub output: Option<&'a Path>,
    pub hooks: HookSet,
    pub meta: bool,
    pub quiet: bool,
    pub no_inherited: bool,
    pub compact: bool,
}

/// Graft records and write the tree.
pub fn run(input: &Path, args: RunArgs<'_>) -> Result<()> {
    let mut options = load_options(args.config)?;
    if args.quiet {
        options.quiet = true;
    }
    if args.no_inherited {
        options.treat_inherited_element = false;
    }

    let mut records = load_records(input)?;
    let hooks = hook_table(args.hooks, &options, args.meta);
    let doclet = Doclet::new(options).with_hooks(hooks);

    let outcome = match args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| DocletError::io(path, e))?;
            let outcome = execute(
                doclet.with_emitter(writer(BufWriter::new(file), args.compact)),
                &mut records,
            )?;
            eprintln!("{} Wrote {}", "✓".green(), path.display());
            outcome
        }
        None => execute(
            doclet.with_emitter(writer(io::stdout(), args.compact)),
            &mut records,
        )?,
    };

    warn_about(&outcome.report);
    Ok(())
}

/// Graft records and print statistics.
pub fn stats(input: &Path, config: Option<&Path>, json: bool) -> Result<()> {
    let options = load_options(config)?;
    let mut records = load_records(input)?;
    let records_in = records.len();

    let hooks = hook_table(HookSet::Json, &options, false);
    let outcome = execute(
        Doclet::new(options).with_hooks(hooks).with_emitter(NullEmitter),
        &mut records,
    )?;
    let report = &outcome.report;

    if json {
        let summary = StatsSummary {
            records_in,
            records_kept: report.records,
            nodes_attached: report.attached,
            max_depth: report.max_depth,
            anomalies: &report.anomalies,
            unpaired: &report.unpaired,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", "Doclet statistics".cyan().bold());
    println!(
        "  Records:    {} kept of {}",
        report.records.to_string().cyan(),
        records_in
    );
    println!("  Nodes:      {}", report.attached.to_string().cyan());
    println!("  Max depth:  {}", report.max_depth.to_string().cyan());
    if report.anomalies.is_empty() && report.unpaired.is_empty() {
        println!("{} No merge problems", "✓".green());
    } else {
        warn_about(report);
    }
    Ok(())
}

/// Print the first chevron-quoted email address.
pub fn email(text: &str) -> Result<()> {
    match email_address(text) {
        "" => Err(format!("no email address found in \"{}\"", text).into()),
        address => {
            println!("{}", address);
            Ok(())
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsSummary<'a> {
    records_in: usize,
    records_kept: usize,
    nodes_attached: usize,
    max_depth: usize,
    anomalies: &'a [MergeAnomaly],
    unpaired: &'a [String],
}

fn execute<E: Emit>(mut doclet: Doclet<E>, records: &mut RecordSet) -> Result<RunOutcome> {
    Ok(doclet.run(records)?)
}

fn writer<W: Write>(out: W, compact: bool) -> WriterEmitter<W> {
    let emitter = WriterEmitter::new(out);
    if compact {
        emitter.compact()
    } else {
        emitter
    }
}

fn hook_table(set: HookSet, options: &DocletOptions, meta: bool) -> HookTable {
    let table = HookTable::new(options.quiet);
    match set {
        HookSet::Json => table.with_fallback(JsonHooks::new().with_meta(meta)),
        HookSet::Log => table,
    }
}

fn load_options(config: Option<&Path>) -> Result<DocletOptions> {
    match config {
        Some(path) => Ok(DocletOptions::load(path)?),
        None => Ok(DocletOptions::default()),
    }
}

fn load_records(input: &Path) -> Result<RecordSet> {
    let records = if input == Path::new("-") {
        RecordSet::from_reader(io::stdin().lock())?
    } else {
        RecordSet::load(input)?
    };
    debug!("Loaded {} records from {}", records.len(), input.display());
    Ok(records)
}

fn warn_about(report: &GraftReport) {
    for anomaly in &report.anomalies {
        eprintln!(
            "{} duplicate merge request for {} (record #{} replaced by #{})",
            "⚠".yellow(),
            anomaly.longname.red(),
            anomaly.replaced,
            anomaly.replacement
        );
    }
    if !report.unpaired.is_empty() {
        eprintln!(
            "{} {} records never met their merge counterpart:",
            "⚠".yellow(),
            report.unpaired.len()
        );
        for longname in report.unpaired.iter().take(5) {
            eprintln!("  {}", longname);
        }
        if report.unpaired.len() > 5 {
            eprintln!("  ... and {} more", report.unpaired.len() - 5);
        }
    }
}
