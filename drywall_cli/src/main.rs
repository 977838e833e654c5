//! # Drywall CLI
//!
//! Command-line front end for `drywall_core`. Reads JSON job files, resolves
//! component ids against the catalog, runs the checks and prints a summary
//! followed by the JSON result.
//!
//! ```text
//! drywall_cli stud partition.json
//! drywall_cli ceiling ceiling.json --trace
//! drywall_cli project level3.json --json
//! drywall_cli --catalog supplier.json catalog
//! drywall_cli init level3.json
//! ```

use std::fmt::{self, Write as _};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, error, info};

use drywall_core::calculations::{
    CalculationItem, CalculationOutput, CeilingJob, CeilingSystemInput, CeilingSystemResult, DesignBasis,
    WallStudInput, WallStudJob, WallStudResult,
};
use drywall_core::file_io::{load_project, read_json, write_json_atomic};
use drywall_core::project::{ItemOutcome, ProjectReport};
use drywall_core::{
    CalcError, CalcResult, CalculationTrace, Catalog, CheckResult, ComponentRepository, Project, VerificationResult,
};

const RULE: &str = "═══════════════════════════════════════════════════";

#[derive(Debug, Parser)]
#[command(name = "drywall_cli", version, about = "Drywall stud and suspended-ceiling verification")]
struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// JSON component catalog used instead of the built-in tables
    #[arg(long, value_name = "FILE", global = true)]
    catalog: Option<PathBuf>,

    /// Print only the JSON result
    #[arg(long, global = true)]
    json: bool,

    /// Print the calculation trace after the summary
    #[arg(long, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Verify a wall stud from a job file
    Stud {
        /// Wall-stud job (label, stud_id, input)
        input: PathBuf,
    },

    /// Verify a suspended ceiling from a job file
    Ceiling {
        /// Ceiling job (label, runner_id, hanger_id, anchor_id, input)
        input: PathBuf,
    },

    /// Run every calculation in a project file
    Project {
        /// Project file
        input: PathBuf,
    },

    /// List component ids in the active catalog
    Catalog,

    /// Write a sample project file
    Init {
        /// Where to write the project
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// What a command produced: the text summary, the JSON document and
/// whether the run should exit non-zero.
struct Output {
    summary: String,
    json: String,
    failed: bool,
}

impl Output {
    fn new(summary: String, value: &impl Serialize) -> CalcResult<Self> {
        Ok(Output {
            summary,
            json: serde_json::to_string_pretty(value)?,
            failed: false,
        })
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(output) => {
            if !cli.json {
                println!("{}", output.summary);
                println!();
            }
            println!("{}", output.json);
            if output.failed {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!(code = e.error_code(), "{}", e);
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

fn setup_logging(verbosity: u8, quiet: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match (quiet, verbosity) {
        (true, _) => tracing::Level::ERROR,
        (false, 0) => tracing::Level::WARN,
        (false, 1) => tracing::Level::INFO,
        (false, 2) => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_names(false)
        .with_line_number(false);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}

fn run(cli: &Cli) -> CalcResult<Output> {
    let loaded;
    let catalog: &Catalog = match &cli.catalog {
        Some(path) => {
            info!(path = %path.display(), "loading component catalog");
            loaded = Catalog::from_json_file(path)?;
            &loaded
        }
        None => Catalog::builtin(),
    };

    match &cli.command {
        Command::Stud { input } => {
            let job: WallStudJob = read_json(input)?;
            debug!(label = %job.label, stud = %job.stud_id, "wall stud job");
            let result = job.run(catalog)?;
            let mut summary = render_wall_stud(&job.label, &result).map_err(summary_error)?;
            if cli.trace {
                write_trace(&mut summary, &result.trace).map_err(summary_error)?;
            }
            Output::new(summary, &result)
        }
        Command::Ceiling { input } => {
            let job: CeilingJob = read_json(input)?;
            debug!(label = %job.label, runner = %job.runner_id, "ceiling job");
            let result = job.run(catalog)?;
            let mut summary = render_ceiling(&job.label, &result).map_err(summary_error)?;
            if cli.trace {
                write_trace(&mut summary, &result.trace).map_err(summary_error)?;
            }
            Output::new(summary, &result)
        }
        Command::Project { input } => {
            let project = load_project(input)?;
            let report = project.run(catalog);
            let summary = render_project(&report, cli.trace).map_err(summary_error)?;
            let mut output = Output::new(summary, &report)?;
            output.failed = report.failed_count() > 0;
            Ok(output)
        }
        Command::Catalog => {
            let listing = CatalogListing::from_repository(catalog)?;
            Output::new(render_catalog(&listing).map_err(summary_error)?, &listing)
        }
        Command::Init { path, force } => {
            if path.exists() && !force {
                return Err(CalcError::file_error(
                    "init",
                    path.display().to_string(),
                    "file exists, pass --force to overwrite",
                ));
            }
            let project = sample_project();
            write_json_atomic(&project, path)?;
            info!(path = %path.display(), items = project.item_count(), "sample project written");
            let summary = format!("Wrote sample project to {}", path.display());
            Output::new(summary, &project)
        }
    }
}

/// Two calculations against built-in components.
fn sample_project() -> Project {
    let mut project = Project::new("Sample fit-out", "Level 1 partitions and ceilings", "");
    project.add_item(CalculationItem::WallStud(WallStudJob {
        label: "P-1 corridor partition".to_string(),
        stud_id: "C75x45x1.0t".to_string(),
        input: WallStudInput::new(2700.0),
    }));
    project.add_item(CalculationItem::CeilingSystem(CeilingJob {
        label: "C-1 office ceiling".to_string(),
        runner_id: "RRC19x40x0.6t".to_string(),
        hanger_id: "M10".to_string(),
        anchor_id: "HST3-M10".to_string(),
        input: CeilingSystemInput::new(),
    }));
    project
}

// ============================================================================
// Rendering
// ============================================================================

fn summary_error(_: fmt::Error) -> CalcError {
    CalcError::Internal {
        message: "failed to format the summary".to_string(),
    }
}

fn status_icon(pass: bool) -> &'static str {
    if pass {
        "[OK]"
    } else {
        "[FAIL]"
    }
}

fn write_checks(out: &mut String, verification: &VerificationResult) -> fmt::Result {
    for (kind, check) in verification.checks() {
        writeln!(
            out,
            "  {:<16} {:>6.3} ({:.2} / {:.2} {}) {}",
            kind.display_name(),
            check.ratio,
            check.demand,
            check.capacity,
            kind.units(),
            status_icon(check.pass)
        )?;
    }
    Ok(())
}

fn write_tension(out: &mut String, name: &str, check: &CheckResult) -> fmt::Result {
    writeln!(
        out,
        "  {:<16} {:>6.3} ({:.2} / {:.2} N) {}",
        name,
        check.ratio,
        check.demand,
        check.capacity,
        status_icon(check.pass)
    )
}

fn write_verdict(out: &mut String, passes: bool, governing: &str, ratio: f64) -> fmt::Result {
    writeln!(out, "{}", RULE)?;
    writeln!(
        out,
        "  RESULT: {} (governs: {}, {:.3})",
        if passes { "PASS" } else { "FAIL" },
        governing,
        ratio
    )?;
    write!(out, "{}", RULE)
}

fn write_trace(out: &mut String, trace: &CalculationTrace) -> fmt::Result {
    write!(out, "\n\nCalculation trace:\n{}", trace)
}

fn write_basis(out: &mut String, basis: &DesignBasis) -> fmt::Result {
    let m = &basis.material;
    writeln!(
        out,
        "  Py = {} MPa, E = {} MPa, γm = {}, Ny = {} mm, L/{}",
        m.yield_strength_mpa,
        m.elastic_modulus_mpa,
        m.material_factor,
        basis.bearing_length_mm,
        basis.deflection_criterion.divisor()
    )
}

fn render_wall_stud(label: &str, result: &WallStudResult) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{}", RULE)?;
    writeln!(out, "  WALL STUD: {} ({})", label, result.section_id)?;
    write_basis(&mut out, &result.basis)?;
    writeln!(out, "{}", RULE)?;
    writeln!(out)?;
    writeln!(out, "Demand:")?;
    writeln!(out, "  Mc   = {:.2} kN·mm", result.design_moment_kn_mm())?;
    writeln!(out, "  Fv   = {:.2} N", result.design_shear_n())?;
    writeln!(out, "  δmax = {:.2} mm", result.max_deflection_mm())?;
    writeln!(out)?;
    writeln!(out, "Checks:")?;
    write_checks(&mut out, &result.verification)?;
    writeln!(out)?;
    write_verdict(
        &mut out,
        result.passes(),
        result.governing_check().display_name(),
        result.max_utilization(),
    )?;
    Ok(out)
}

fn render_ceiling(label: &str, result: &CeilingSystemResult) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{}", RULE)?;
    writeln!(out, "  CEILING: {}", label)?;
    writeln!(
        out,
        "  runner {}, hanger {}, anchor {}",
        result.runner_id, result.hanger_id, result.anchor_id
    )?;
    write_basis(&mut out, &result.basis)?;
    writeln!(out, "{}", RULE)?;
    writeln!(out)?;
    writeln!(out, "Runner checks:")?;
    write_checks(&mut out, &result.runner)?;
    writeln!(out)?;
    writeln!(out, "Hardware:")?;
    write_tension(&mut out, "Hanger tension", &result.hanger)?;
    write_tension(&mut out, "Anchor tension", &result.anchor)?;
    writeln!(out)?;
    write_verdict(
        &mut out,
        result.passes(),
        result.governing_condition(),
        result.max_utilization(),
    )?;
    Ok(out)
}

fn render_project(report: &ProjectReport, with_trace: bool) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{}", RULE)?;
    writeln!(out, "  PROJECT: {} ({} items)", report.project_name, report.entries.len())?;
    writeln!(out, "{}", RULE)?;

    for entry in &report.entries {
        writeln!(out)?;
        match &entry.outcome {
            ItemOutcome::Completed(output) => {
                let (rendered, trace) = match output {
                    CalculationOutput::WallStud(r) => (render_wall_stud(&entry.label, r)?, &r.trace),
                    CalculationOutput::CeilingSystem(r) => (render_ceiling(&entry.label, r)?, &r.trace),
                };
                writeln!(out, "{}", rendered)?;
                if with_trace {
                    write_trace(&mut out, trace)?;
                }
            }
            ItemOutcome::Failed(e) => {
                writeln!(out, "  {} ({}): ERROR {}", entry.label, entry.calc_type, e)?;
            }
        }
    }

    writeln!(out)?;
    let passed = report.entries.iter().filter(|e| e.passes()).count();
    write!(
        out,
        "{} of {} items pass, {} failed to run",
        passed,
        report.entries.len(),
        report.failed_count()
    )?;
    Ok(out)
}

/// Catalog contents as printed by `drywall_cli catalog`.
#[derive(Debug, Serialize)]
struct CatalogListing {
    sections: Vec<SectionEntry>,
    hangers: Vec<String>,
    anchors: Vec<String>,
}

#[derive(Debug, Serialize)]
struct SectionEntry {
    id: String,
    kind: String,
    description: String,
}

impl CatalogListing {
    fn from_repository(repo: &dyn ComponentRepository) -> CalcResult<Self> {
        let sections = repo
            .section_ids()
            .into_iter()
            .map(|id| {
                let section = repo.find_section(id)?;
                Ok(SectionEntry {
                    id: section.id.clone(),
                    kind: section.kind.display_name().to_string(),
                    description: section.to_string(),
                })
            })
            .collect::<CalcResult<Vec<_>>>()?;
        Ok(CatalogListing {
            sections,
            hangers: repo.hanger_ids().into_iter().map(String::from).collect(),
            anchors: repo.anchor_ids().into_iter().map(String::from).collect(),
        })
    }
}

fn render_catalog(listing: &CatalogListing) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "Sections:")?;
    for s in &listing.sections {
        writeln!(out, "  {}", s.description)?;
    }
    writeln!(out, "Hangers: {}", listing.hangers.join(", "))?;
    write!(out, "Anchors: {}", listing.anchors.join(", "))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["drywall_cli"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    fn write(dir: &tempfile::TempDir, name: &str, contents: &str) -> String {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path.display().to_string()
    }

    const STUD_JOB: &str = r#"{
        "label": "Reference stud",
        "stud_id": "C75x45x0.8t",
        "input": {
            "span_mm": 4100.0,
            "tributary_width_mm": 406.0,
            "imposed_load_kn_per_m": 0.75,
            "imposed_load_height_m": 1.1,
            "imposed_load_factor": 1.6
        }
    }"#;

    #[test]
    fn test_stud_summary_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "stud.json", STUD_JOB);

        let output = run(&cli(&["stud", &path])).unwrap();
        assert!(!output.failed);
        assert!(output.summary.contains("WALL STUD: Reference stud (C75x45x0.8t)"));
        assert!(output.summary.contains("Mc   = 392.14 kN·mm"));
        assert!(output.summary.contains("[FAIL]"));
        assert!(output.summary.contains("δmax = 57833.11 mm"));
        assert!(output.summary.contains("RESULT: FAIL (governs: Deflection, 3385.353)"));
        assert!(output.summary.contains("γm = 1.2, Ny = 32 mm, L/240"));

        let json: serde_json::Value = serde_json::from_str(&output.json).unwrap();
        assert_eq!(json["verification"]["overall_result"], false);
        assert_eq!(json["section_id"], "C75x45x0.8t");
    }

    #[test]
    fn test_trace_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "stud.json", STUD_JOB);

        let output = run(&cli(&["stud", &path, "--trace"])).unwrap();
        assert!(output.summary.contains("Calculation trace:"));
        assert!(output.summary.contains("Mb = 200 × 2712 / 1.2"));
    }

    #[test]
    fn test_unknown_stud_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "stud.json", &STUD_JOB.replace("C75x45x0.8t", "C200x50x1.2t"));

        let err = run(&cli(&["stud", &path])).err().unwrap();
        assert_eq!(err.error_code(), "SECTION_NOT_FOUND");
    }

    #[test]
    fn test_rejected_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "stud.json", &STUD_JOB.replace("4100.0", "-4100.0"));

        let err = run(&cli(&["stud", &path])).err().unwrap();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_ceiling_job() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "ceiling.json",
            r#"{
                "label": "C-1",
                "runner_id": "RRC19x40x0.6t",
                "hanger_id": "M10",
                "anchor_id": "HST3-M10",
                "input": { "hanger_spacing_mm": 920.0, "runner_spacing_mm": 610.0 }
            }"#,
        );

        let output = run(&cli(&["ceiling", &path])).unwrap();
        assert!(output.summary.contains("Hanger tension"));
        assert!(output.summary.contains("Anchor tension"));
        assert!(output.summary.contains("γm = 1.4"));
        let json: serde_json::Value = serde_json::from_str(&output.json).unwrap();
        assert_eq!(json["hanger_id"], "M10");
    }

    #[test]
    fn test_init_then_project() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.json").display().to_string();

        run(&cli(&["init", &path])).unwrap();
        let err = run(&cli(&["init", &path])).err().unwrap();
        assert_eq!(err.error_code(), "FILE_ERROR");
        run(&cli(&["init", &path, "--force"])).unwrap();

        let output = run(&cli(&["project", &path])).unwrap();
        assert!(!output.failed);
        assert!(output.summary.contains("PROJECT: Sample fit-out (2 items)"));
        assert!(output.summary.contains("C-1 office ceiling"));
        assert!(output.summary.contains("P-1 corridor partition"));
    }

    #[test]
    fn test_project_with_unknown_component_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        let mut project = sample_project();
        project.add_item(CalculationItem::WallStud(WallStudJob {
            label: "P-9".to_string(),
            stud_id: "C999".to_string(),
            input: WallStudInput::new(2700.0),
        }));
        write_json_atomic(&project, &path).unwrap();

        let output = run(&cli(&["project", &path.display().to_string()])).unwrap();
        assert!(output.failed);
        assert!(output.summary.contains("P-9 (WallStud): ERROR Section not found: C999"));
        assert!(output.summary.contains("1 failed to run"));
    }

    #[test]
    fn test_catalog_listing() {
        let output = run(&cli(&["catalog"])).unwrap();
        assert!(output.summary.contains("C75x45x0.8t"));
        assert!(output.summary.contains("Hangers: M10, M12, M8"));
        assert!(output.summary.contains("HST3-M10"));
    }

    #[test]
    fn test_substitute_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = write(
            &dir,
            "catalog.json",
            r#"{ "hangers": [ { "id": "M6", "diameter_mm": 6.0, "area_mm2": 20.1, "tensile_strength_mpa": 400.0 } ] }"#,
        );
        let stud = write(&dir, "stud.json", STUD_JOB);

        let output = run(&cli(&["--catalog", &catalog, "catalog"])).unwrap();
        assert!(output.summary.contains("Hangers: M6"));

        let err = run(&cli(&["--catalog", &catalog, "stud", &stud])).err().unwrap();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["drywall_cli", "-q", "-v", "catalog"]).is_err());
    }
}
