use std::sync::Arc;
use std::time::Instant;

use chrono::Local;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use hirelane::api::{ApplicationsApi, HttpApplicationsApi};
use hirelane::auth::AuthContext;
use hirelane::config::AppConfig;
use hirelane::error::AppError;
use hirelane::telemetry;
use hirelane::workflows::applications::{
    apply_control, candidate_card, ApplicationId, ApplyFlow, ApplyOutcome,
    CandidateApplicationCard, CompanyApplicationCard, InterviewForm, JobId, ReviewBoard,
    DETAIL_SUCCESS_BANNER,
};

#[derive(Parser, Debug)]
#[command(
    name = "hirelane",
    about = "Job-board application workflows from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply to a job posting
    Apply {
        /// Job posting identifier
        job_id: String,
    },
    /// Check whether you already applied to a job
    Check {
        /// Job posting identifier
        job_id: String,
    },
    /// List your applications
    Applications,
    /// Review the applications submitted for one of your job postings
    Review {
        /// Job posting identifier
        job_id: String,
    },
    /// Accept an application and schedule its interview
    Accept(AcceptArgs),
    /// Reject a pending application
    Reject {
        /// Job posting identifier
        job_id: String,
        /// Application identifier
        application_id: String,
    },
}

#[derive(Args, Debug)]
struct AcceptArgs {
    /// Job posting identifier
    job_id: String,
    /// Application identifier
    application_id: String,
    /// Interview date (YYYY-MM-DD, must be in the future)
    #[arg(long)]
    date: String,
    /// Interview time (HH:mm)
    #[arg(long)]
    time: String,
    /// Optional location, e.g. "Office" or a meeting link
    #[arg(long, default_value = "")]
    location: String,
    /// Optional notes for the candidate
    #[arg(long, default_value = "")]
    notes: String,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let auth = AuthContext::restore(config.session.clone());
    let api = Arc::new(HttpApplicationsApi::new(
        &config.api,
        auth.token().map(str::to_string),
    )?);

    info!(?config.environment, base_url = %config.api.base_url, "hirelane client ready");

    match cli.command {
        Command::Apply { job_id } => run_apply(api, &auth, JobId(job_id)).await,
        Command::Check { job_id } => run_check(api, JobId(job_id)).await,
        Command::Applications => run_applications(api).await,
        Command::Review { job_id } => run_review(api, JobId(job_id)).await,
        Command::Accept(args) => run_accept(api, args).await,
        Command::Reject {
            job_id,
            application_id,
        } => run_reject(api, JobId(job_id), ApplicationId(application_id)).await,
    }
}

async fn run_apply(
    api: Arc<HttpApplicationsApi>,
    auth: &AuthContext,
    job_id: JobId,
) -> Result<(), AppError> {
    let mut flow = ApplyFlow::new(api, job_id, DETAIL_SUCCESS_BANNER);
    flow.sync_with_server().await;

    let now = Instant::now();
    let outcome = flow.apply(auth, now).await;
    for line in render_apply_outcome(&outcome) {
        println!("{line}");
    }

    let control = apply_control(&flow, auth, now);
    if let Some(banner) = control.success_banner {
        println!("{banner}");
    }
    Ok(())
}

async fn run_check(api: Arc<HttpApplicationsApi>, job_id: JobId) -> Result<(), AppError> {
    let check = api.check_application(&job_id).await?;
    if check.has_applied {
        println!("You have applied to job {}.", job_id.0);
    } else {
        println!("No application on record for job {}.", job_id.0);
    }
    Ok(())
}

async fn run_applications(api: Arc<HttpApplicationsApi>) -> Result<(), AppError> {
    let applications = api.my_applications().await?;
    if applications.is_empty() {
        println!("No applications yet.");
        return Ok(());
    }

    println!("Your applications");
    for card in applications.iter().map(candidate_card) {
        for line in render_candidate_card(&card) {
            println!("{line}");
        }
    }
    Ok(())
}

async fn run_review(api: Arc<HttpApplicationsApi>, job_id: JobId) -> Result<(), AppError> {
    let mut board = ReviewBoard::new(api, job_id);
    board.refresh().await?;
    render_board(&board);
    Ok(())
}

async fn run_accept(api: Arc<HttpApplicationsApi>, args: AcceptArgs) -> Result<(), AppError> {
    let AcceptArgs {
        job_id,
        application_id,
        date,
        time,
        location,
        notes,
    } = args;

    let mut board = ReviewBoard::new(api, JobId(job_id));
    board.refresh().await?;

    let mut form = InterviewForm::new(date, time, location, notes);
    let today = Local::now().date_naive();

    let confirmation = board
        .accept(
            &ApplicationId(application_id),
            &mut form,
            today,
            Instant::now(),
        )
        .await?;

    println!("{}", confirmation.message);
    println!(
        "Interview on {} at {}.",
        confirmation.interview.interview_date,
        confirmation.interview.interview_time.format("%H:%M")
    );
    render_board(&board);
    Ok(())
}

async fn run_reject(
    api: Arc<HttpApplicationsApi>,
    job_id: JobId,
    application_id: ApplicationId,
) -> Result<(), AppError> {
    let mut board = ReviewBoard::new(api, job_id);
    board.refresh().await?;
    board.reject(&application_id).await?;
    println!("Application {} rejected.", application_id.0);
    render_board(&board);
    Ok(())
}

fn render_apply_outcome(outcome: &ApplyOutcome) -> Vec<String> {
    match outcome {
        ApplyOutcome::Submitted => vec!["Application submitted.".to_string()],
        ApplyOutcome::Ignored => vec!["Nothing to do: application already submitted.".to_string()],
        ApplyOutcome::LoginRequired { redirect } => vec![
            "Sign in to apply.".to_string(),
            format!("Continue at: {redirect}"),
        ],
        ApplyOutcome::AlreadyApplied { message } => vec![(*message).to_string()],
        ApplyOutcome::CvRequired {
            message,
            upload_redirect,
        } => vec![
            (*message).to_string(),
            format!("Upload one at: {upload_redirect}"),
        ],
        ApplyOutcome::Failed { message } => vec![(*message).to_string()],
    }
}

fn render_candidate_card(card: &CandidateApplicationCard) -> Vec<String> {
    let mut lines = Vec::new();
    let company = card
        .company_name
        .as_deref()
        .map(|name| format!(" at {name}"))
        .unwrap_or_default();
    lines.push(format!(
        "- {}{} [{}] applied {}",
        card.job_title,
        company,
        card.badge.label,
        card.applied_at.format("%Y-%m-%d")
    ));
    if let Some(interview) = &card.interview {
        let location = interview
            .location
            .as_deref()
            .map(|location| format!(" ({location})"))
            .unwrap_or_default();
        lines.push(format!(
            "  Interview: {} {}{}",
            interview.interview_date,
            interview.interview_time.format("%H:%M"),
            location
        ));
    }
    if let Some(note) = card.pending_note {
        lines.push(format!("  {note}"));
    }
    if let Some(note) = card.closed_note {
        lines.push(format!("  {note}"));
    }
    lines
}

fn render_company_card(card: &CompanyApplicationCard) -> Vec<String> {
    let mut lines = vec![format!(
        "- {} [{}] applied {}",
        card.candidate_name,
        card.badge.label,
        card.applied_at.format("%Y-%m-%d")
    )];
    lines.push(format!("  {}", card.description_preview));
    if let Some(notice) = &card.position_filled_notice {
        lines.push(format!("  {notice}"));
    }
    if card.decision_controls_visible {
        let accept = if card.accept_enabled {
            "accept available"
        } else {
            "accept disabled"
        };
        lines.push(format!("  Actions: {accept}, reject available"));
    }
    lines
}

fn render_board(board: &ReviewBoard<HttpApplicationsApi>) {
    let count = board.applications().len();
    println!(
        "{count} {} for job {}",
        if count == 1 {
            "application"
        } else {
            "applications"
        },
        board.job_id().0
    );

    if let Some(banner) = board.position_filled_banner() {
        println!("{banner}");
    }

    if count == 0 {
        println!("No applications yet. Candidates will see your posting soon!");
        return;
    }

    for card in board.card_views() {
        for line in render_company_card(&card) {
            println!("{line}");
        }
    }
}
