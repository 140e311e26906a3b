use chrono::Local;
use clap::Args;
use scholarship_saw::error::AppError;
use scholarship_saw::selection::{
    default_roster, rank, CriteriaCatalog, RosterImporter, SelectionReport,
};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct RankArgs {
    /// Roster to rank: CSV (`id,name,C1..C5`) or a JSON candidate array. Defaults to the built-in roster.
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
    /// Only list the first N ranked candidates
    #[arg(long)]
    pub(crate) top: Option<usize>,
    /// Emit the full report as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let RankArgs { roster, top, json } = args;

    let candidates = match roster {
        Some(path) => RosterImporter::from_path(&path)?,
        None => default_roster(),
    };
    let catalog = CriteriaCatalog::standard();
    let report = SelectionReport::new(rank(&candidates, &catalog)?, &catalog);

    let mut stdout = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, &report)?;
        writeln!(stdout)?;
    } else {
        render_report(&mut stdout, &report, top)?;
    }
    Ok(())
}

pub(crate) fn run_criteria() -> Result<(), AppError> {
    render_criteria(&mut io::stdout().lock(), &CriteriaCatalog::standard())?;
    Ok(())
}

fn percent(value: f64) -> f64 {
    value * 100.0
}

pub(crate) fn render_report<W: Write>(
    out: &mut W,
    report: &SelectionReport,
    top: Option<usize>,
) -> io::Result<()> {
    let summary = &report.summary;
    let shown = match top {
        Some(count) => report.leaders(count),
        None => &report.candidates[..],
    };

    writeln!(
        out,
        "Scholarship selection results ({})",
        report
            .generated_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
    )?;
    writeln!(
        out,
        "Pass threshold {:.2} | {} of {} passed ({:.0}%)",
        report.threshold,
        summary.passed,
        summary.total,
        percent(summary.pass_rate)
    )?;
    writeln!(
        out,
        "Average {:.4} | highest {:.4} | lowest {:.4}",
        summary.average_score, summary.highest_score, summary.lowest_score
    )?;
    writeln!(out)?;
    writeln!(out, "{:>4}  {:<6} {:<24} {:>7}  Result", "Rank", "ID", "Name", "Score")?;
    for entry in shown {
        writeln!(
            out,
            "{:>4}  {:<6} {:<24} {:>7.4}  {}",
            entry.rank,
            entry.candidate.id.as_str(),
            entry.candidate.name,
            entry.aggregate_score,
            if entry.passed { "PASSED" } else { "not passed" }
        )?;
    }

    let recipients: Vec<&str> = report
        .recipients()
        .map(|entry| entry.candidate.name.as_str())
        .collect();
    if recipients.is_empty() {
        writeln!(out, "\nNo candidate reached the threshold.")
    } else {
        writeln!(out, "\nRecipients: {}", recipients.join(", "))
    }
}

pub(crate) fn render_criteria<W: Write>(out: &mut W, catalog: &CriteriaCatalog) -> io::Result<()> {
    writeln!(
        out,
        "Criteria catalog (total weight {:.2})",
        catalog.total_weight()
    )?;
    for criterion in catalog {
        writeln!(
            out,
            "- {} {} | weight {:.0}% | {}",
            criterion.id,
            criterion.name,
            percent(criterion.weight),
            criterion.kind.label()
        )?;
        for level in &criterion.rubric {
            writeln!(out, "    {}: {}", level.score, level.description)?;
        }
    }
    Ok(())
}
