use crate::infra::{load_files, parse_date};
use chrono::{Local, NaiveDate};
use clap::Args;
use placement_ai::error::AppError;
use placement_ai::workflows::placement::{
    BatchOptions, DriveBuckets, DriveId, DriveMatch, EligibilityResult, EligibilityService,
    EligibilityServiceError, PlacementRepository, StudentId,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// Student roster CSV export
    #[arg(long)]
    pub(crate) roster: PathBuf,
    /// Drive catalog JSON file
    #[arg(long)]
    pub(crate) drives: PathBuf,
    /// Student to evaluate
    #[arg(long)]
    pub(crate) student: String,
    /// Restrict the check to a single drive (defaults to every drive)
    #[arg(long)]
    pub(crate) drive: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct CohortArgs {
    /// Student roster CSV export
    #[arg(long)]
    pub(crate) roster: PathBuf,
    /// Drive catalog JSON file
    #[arg(long)]
    pub(crate) drives: PathBuf,
    /// Drive to summarize
    #[arg(long)]
    pub(crate) drive: String,
    /// Print the ids of fully eligible students
    #[arg(long)]
    pub(crate) list_students: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DrivesArgs {
    /// Student roster CSV export
    #[arg(long)]
    pub(crate) roster: PathBuf,
    /// Drive catalog JSON file
    #[arg(long)]
    pub(crate) drives: PathBuf,
    /// Student whose drive options are listed
    #[arg(long)]
    pub(crate) student: String,
    /// Date used to close drives past their deadline (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_check(args: CheckArgs, options: BatchOptions) -> Result<(), AppError> {
    let CheckArgs {
        roster,
        drives,
        student,
        drive,
    } = args;

    let repository = Arc::new(load_files(&roster, &drives)?);
    let service = EligibilityService::new(repository.clone()).with_options(options);
    let student_id = StudentId(student);

    let drive_ids = match drive {
        Some(id) => vec![DriveId(id)],
        None => repository
            .list_drives()
            .map_err(EligibilityServiceError::from)?
            .into_iter()
            .map(|drive| drive.id)
            .collect(),
    };

    println!("Eligibility check for {}", student_id);
    if drive_ids.is_empty() {
        println!("\nNo drives in the catalog");
    }
    for drive_id in drive_ids {
        let result = service.check(&student_id, &drive_id)?;
        render_result(&drive_id.0, &result);
    }

    Ok(())
}

pub(crate) fn run_cohort(args: CohortArgs, options: BatchOptions) -> Result<(), AppError> {
    let CohortArgs {
        roster,
        drives,
        drive,
        list_students,
    } = args;

    let repository = Arc::new(load_files(&roster, &drives)?);
    let service = EligibilityService::new(repository).with_options(options);
    let drive_id = DriveId(drive);
    let summary = service.cohort(&drive_id)?;

    println!("Cohort summary for {}", drive_id);
    println!("- Eligible: {}", summary.eligible);
    println!("- Partially eligible: {}", summary.partially_eligible);
    println!("- Not eligible: {}", summary.not_eligible);
    println!("- Total: {}", summary.total());

    if list_students {
        if summary.eligible_students.is_empty() {
            println!("\nEligible students: none");
        } else {
            println!("\nEligible students");
            for id in &summary.eligible_students {
                println!("- {}", id);
            }
        }
    }

    Ok(())
}

pub(crate) fn run_drives(args: DrivesArgs, options: BatchOptions) -> Result<(), AppError> {
    let DrivesArgs {
        roster,
        drives,
        student,
        today,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let repository = Arc::new(load_files(&roster, &drives)?);
    let service = EligibilityService::new(repository).with_options(options);
    let student_id = StudentId(student);
    let buckets = service.drives_for_student(&student_id, today)?;

    println!("Open drives for {} (as of {})", student_id, today);
    render_buckets(&buckets);
    Ok(())
}

fn render_result(label: &str, result: &EligibilityResult) {
    println!("\n{} [{}]", label, result.summary());
    for rule in &result.results {
        println!("  {}", rule.message);
    }

    if !result.suggestions.is_empty() {
        println!("  Suggestions");
        for suggestion in &result.suggestions {
            println!("  - {}", suggestion);
        }
    }
}

fn render_buckets(buckets: &DriveBuckets) {
    render_bucket("Fully eligible", &buckets.fully_eligible);
    render_bucket("Partially eligible", &buckets.partially_eligible);
    render_bucket("Not eligible", &buckets.not_eligible);
}

fn render_bucket(heading: &str, matches: &[DriveMatch]) {
    if matches.is_empty() {
        println!("\n{heading}: none");
        return;
    }

    println!("\n{heading}");
    for entry in matches {
        println!(
            "- {} ({}): {} passed, {} missed",
            entry.title, entry.drive_id, entry.result.passed_count, entry.result.failed_count
        );
        for missing in &entry.result.missing_criteria {
            println!("    {}", missing);
        }
    }
}
