//! HackTrack CLI
//!
//! Command-line front-end over the local HackTrack data directory:
//! - Sign in and out with the demo accounts
//! - Browse, create and (de)activate hackathons
//! - Review teams and announce winners
//! - Submit a project and watch its evaluation

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use hacktrack::auth::{check_route, demo_account_for, login_redirect, GuardDecision, Role, Route, Session, SessionStore};
use hacktrack::config::{generate_default_config, Config};
use hacktrack::hackathon::{parse_event_date, Hackathon, HackathonRegistry, HackathonUpdate, NewHackathon};
use hacktrack::notify::{Notice, Notifier};
use hacktrack::review::{filter_teams, mock_teams, shortlist, ReviewBoard, StatusFilter, Team};
use hacktrack::storage::{snapshot, FileStore, KeyValueStore};
use hacktrack::submission::{
    countdown, end_of_day, participation_certificate, EvaluationSimulator, SubmissionDraft,
};
use hacktrack::timing::{SystemClock, TokioDelay};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "hacktrack")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Hackathon management from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: standard locations)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Data directory (overrides config)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Log at the configured level instead of warnings only
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with a demo account
    Login {
        /// Defaults to the demo account for the role
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
        /// participant or admin
        #[arg(long, default_value = "participant")]
        role: Role,
    },

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Check what the route guard does for a page path
    Route {
        /// Page path, e.g. /admin-dashboard
        path: String,
    },

    /// Manage hackathons
    #[command(subcommand)]
    Hackathons(HackathonCommands),

    /// Published results
    #[command(subcommand)]
    Results(ResultsCommands),

    /// Teams under review (admin)
    #[command(subcommand)]
    Teams(TeamCommands),

    /// Submit your team's project and follow its evaluation (participant)
    Submit(SubmitArgs),

    /// Download your participation certificate for the active hackathon (participant)
    Certificate,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete all persisted state
    Reset,
}

#[derive(Subcommand)]
enum HackathonCommands {
    /// List all hackathons
    List,
    /// Show the active hackathon
    Current,
    /// Create a hackathon (admin)
    Create(CreateArgs),
    /// Mark a hackathon active (admin)
    Activate { id: String },
    /// Mark a hackathon inactive (admin)
    Deactivate { id: String },
}

#[derive(Args)]
struct CreateArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    description: String,
    #[arg(long)]
    location: String,
    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    start: String,
    /// End date (YYYY-MM-DD)
    #[arg(long)]
    end: String,
    /// Registration deadline (default: start date)
    #[arg(long)]
    registration_deadline: Option<String>,
    /// Submission deadline (default: end date)
    #[arg(long)]
    submission_deadline: Option<String>,
    /// Prize line, repeatable
    #[arg(long = "prize")]
    prizes: Vec<String>,
    /// Create without making it active
    #[arg(long)]
    inactive: bool,
}

#[derive(Subcommand)]
enum ResultsCommands {
    /// Show results (default: most recently announced)
    Show { hackathon_id: Option<String> },
    /// Announce winners (admin)
    Publish {
        hackathon_id: String,
        /// TEAM_ID:PLACE, repeatable
        #[arg(long = "winner", required = true)]
        winners: Vec<String>,
    },
    /// Send certificates once results are announced (admin)
    Certificates { hackathon_id: String },
}

#[derive(Subcommand)]
enum TeamCommands {
    /// Search and filter teams
    List {
        #[arg(short, long, default_value = "")]
        search: String,
        /// all, submitted, under_review, shortlisted, not_selected or winner
        #[arg(long, default_value = "all")]
        status: StatusFilter,
    },
    /// Shortlisted teams by score
    Shortlist,
}

#[derive(Args)]
struct SubmitArgs {
    #[arg(long, default_value = "")]
    description: String,
    /// Abstract PDF file name
    #[arg(long = "abstract")]
    abstract_file: Option<String>,
    /// Prototype video file name
    #[arg(long)]
    video: Option<String>,
    #[arg(long)]
    github: Option<String>,
}

/// Prints notices the way the web app shows toasts
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        eprintln!("{}", notice);
    }
}

struct App {
    config: Config,
    storage: Arc<dyn KeyValueStore>,
    notifier: Arc<dyn Notifier>,
    json: bool,
}

impl App {
    fn session_store(&self) -> SessionStore {
        let store = SessionStore::new(
            Arc::clone(&self.storage),
            Arc::new(TokioDelay),
            self.config.latency.to_latency(),
        )
        .with_notifier(Arc::clone(&self.notifier));
        store.restore();
        store
    }

    fn registry(&self) -> Result<HackathonRegistry> {
        let registry = HackathonRegistry::initialize(Arc::clone(&self.storage), Arc::new(SystemClock))
            .context("stored hackathon data is unreadable; run `hacktrack reset` to start over")?;
        Ok(registry.with_notifier(Arc::clone(&self.notifier)))
    }

    /// Session allowed on `route`, or an error naming what is missing
    fn require(&self, route: Route) -> Result<Session> {
        let state = self.session_store().state();
        match check_route(&state, route) {
            GuardDecision::Render => match state.session() {
                Some(session) => Ok(session.clone()),
                None => bail!("not signed in; run `hacktrack login`"),
            },
            GuardDecision::Redirect(Route::Login) => bail!("not signed in; run `hacktrack login`"),
            GuardDecision::Redirect(to) => {
                bail!("{} is not available to this account (dashboard: {})", route, to)
            }
            GuardDecision::Pending => bail!("session is still loading"),
        }
    }

    fn print<T: Serialize>(&self, value: &T, text: impl FnOnce() -> String) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            println!("{}", text());
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.storage.data_dir = dir.to_string_lossy().to_string();
    }
    if !cli.verbose {
        config.logging.level = "warn".to_string();
    }
    config.logging.init();

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("writing {}", path.display()))?;
                println!("Config written to {}", path.display());
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let data_dir = config.storage.data_path();
    let storage = FileStore::open(&data_dir)
        .with_context(|| format!("opening data directory {}", data_dir.display()))?;
    tracing::debug!("Data directory: {:?}", data_dir);

    let app = App {
        config,
        storage: Arc::new(storage),
        notifier: Arc::new(ConsoleNotifier),
        json: cli.json,
    };

    match cli.command {
        Commands::Login {
            email,
            password,
            role,
        } => {
            let demo = demo_account_for(role);
            let email = email.unwrap_or_else(|| demo.email.to_string());
            let password = password.unwrap_or_else(|| demo.password.to_string());
            let store = app.session_store();
            let session = store.login(&email, &password, role).await?;
            app.print(&session, || {
                format!(
                    "Signed in as {} ({}), dashboard: {}",
                    session.name,
                    session.role,
                    session.role.dashboard()
                )
            })?;
        }

        Commands::Logout => {
            app.session_store().logout().await?;
            println!("Signed out");
        }

        Commands::Whoami => {
            let session = app.session_store().session();
            app.print(&session, || match &session {
                Some(s) => format!("{} <{}> ({}, id {})", s.name, s.email, s.role, s.id),
                None => "Not signed in".to_string(),
            })?;
        }

        Commands::Route { path } => {
            let state = app.session_store().state();
            let route = Route::from_path(&path);
            let decision = match (route, login_redirect(&state)) {
                (Route::Login, Some(dashboard)) => GuardDecision::Redirect(dashboard),
                _ => check_route(&state, route),
            };
            app.print(&decision, || match decision {
                GuardDecision::Render => format!("{}: render", route),
                GuardDecision::Pending => format!("{}: pending", route),
                GuardDecision::Redirect(to) => format!("{}: redirect to {}", route, to),
            })?;
        }

        Commands::Hackathons(cmd) => run_hackathons(&app, cmd).await?,
        Commands::Results(cmd) => run_results(&app, cmd).await?,
        Commands::Teams(cmd) => run_teams(&app, cmd)?,
        Commands::Submit(args) => run_submit(&app, args).await?,

        Commands::Certificate => {
            let session = app.require(Route::ParticipantDashboard)?;
            let registry = app.registry()?;
            let Some(current) = registry.current_hackathon() else {
                bail!("no active hackathon");
            };
            let certificate = participation_certificate(
                &session,
                &current,
                Utc::now().date_naive(),
                app.notifier.as_ref(),
            );
            app.print(&certificate, || {
                format!(
                    "Certificate of participation\n  {} <{}>\n  {}\n  issued {}",
                    certificate.recipient,
                    certificate.email,
                    certificate.hackathon_title,
                    certificate.issued_on
                )
            })?;
        }

        Commands::Reset => {
            snapshot::clear_all(app.storage.as_ref())?;
            println!("All HackTrack data removed");
        }

        Commands::Config { .. } => {}
    }

    Ok(())
}

fn hackathon_line(h: &Hackathon) -> String {
    format!(
        "{:<14} {:<32} {} to {}  {:<10} {}",
        h.id,
        h.title,
        h.start_date,
        h.end_date,
        h.location,
        if h.is_active { "active" } else { "inactive" }
    )
}

fn hackathon_details(h: &Hackathon) -> String {
    let mut out = format!(
        "{} (id {})\n{}\n\nDates:        {} to {}\nRegistration: until {}\nSubmission:   until {} ({})\nLocation:     {}",
        h.title,
        h.id,
        h.description,
        h.start_date,
        h.end_date,
        h.registration_deadline,
        h.submission_deadline,
        countdown(end_of_day(h.submission_deadline), Utc::now()),
        h.location,
    );
    if !h.prizes.is_empty() {
        out.push_str("\nPrizes:");
        for prize in &h.prizes {
            out.push_str(&format!("\n  - {}", prize));
        }
    }
    out
}

async fn run_hackathons(app: &App, cmd: HackathonCommands) -> Result<()> {
    let registry = app.registry()?;

    match cmd {
        HackathonCommands::List => {
            let hackathons = registry.hackathons();
            app.print(&hackathons, || {
                hackathons
                    .iter()
                    .map(hackathon_line)
                    .collect::<Vec<_>>()
                    .join("\n")
            })?;
        }

        HackathonCommands::Current => {
            let current = registry.current_hackathon();
            app.print(&current, || match &current {
                Some(h) => hackathon_details(h),
                None => "No active hackathon".to_string(),
            })?;
        }

        HackathonCommands::Create(args) => {
            app.require(Route::CreateHackathon)?;

            let date = |raw: &str| parse_event_date(raw).map_err(anyhow::Error::msg);
            let mut new = NewHackathon::new(
                args.title,
                args.description,
                args.location,
                date(&args.start)?,
                date(&args.end)?,
            );
            if let Some(raw) = &args.registration_deadline {
                new = new.registration_deadline(date(raw)?);
            }
            if let Some(raw) = &args.submission_deadline {
                new = new.submission_deadline(date(raw)?);
            }
            for prize in args.prizes {
                new = new.prize(prize);
            }
            if args.inactive {
                new = new.inactive();
            }

            let created = registry.add_hackathon(new.validated()?).await?;
            app.print(&created, || hackathon_line(&created))?;
        }

        HackathonCommands::Activate { id } => set_active(app, &registry, &id, true).await?,
        HackathonCommands::Deactivate { id } => set_active(app, &registry, &id, false).await?,
    }

    Ok(())
}

async fn set_active(app: &App, registry: &HackathonRegistry, id: &str, active: bool) -> Result<()> {
    app.require(Route::AdminDashboard)?;
    let updated = registry
        .update_hackathon(id, HackathonUpdate::active(active))
        .await?;
    app.print(&updated, || hackathon_line(&updated))
}

async fn run_results(app: &App, cmd: ResultsCommands) -> Result<()> {
    let registry = app.registry()?;

    match cmd {
        ResultsCommands::Show { hackathon_id } => {
            let results = match &hackathon_id {
                Some(id) => registry.results(id),
                None => registry.latest_results(),
            };
            let Some(results) = results else {
                println!("No results announced yet");
                return Ok(());
            };

            app.print(&results, || {
                let mut out = format!(
                    "Results for hackathon {} (announced {})",
                    results.hackathon_id,
                    results.announcement_date.format("%Y-%m-%d %H:%M UTC")
                );
                for w in results.podium() {
                    out.push_str(&format!(
                        "\n  {}{}  {:<16} {}",
                        w.place,
                        hacktrack::review::ordinal_suffix(w.place),
                        w.team_name,
                        w.project_title
                    ));
                }
                out
            })?;
        }

        ResultsCommands::Publish {
            hackathon_id,
            winners,
        } => {
            app.require(Route::AdminDashboard)?;
            if registry.hackathon(&hackathon_id).is_none() {
                bail!("no hackathon with id {}", hackathon_id);
            }

            let mut board = ReviewBoard::new(Arc::new(registry), mock_teams())
                .with_notifier(Arc::clone(&app.notifier));
            for raw in &winners {
                let (team_id, place) = raw
                    .split_once(':')
                    .with_context(|| format!("expected TEAM_ID:PLACE, got {}", raw))?;
                let place: u32 = place
                    .parse()
                    .with_context(|| format!("invalid place in {}", raw))?;
                board.select_winner(team_id, place)?;
            }

            let published = board.announce(&hackathon_id).await?;
            app.print(&published, || {
                format!(
                    "Announced {} winner(s) for hackathon {}",
                    published.winners.len(),
                    published.hackathon_id
                )
            })?;
        }

        ResultsCommands::Certificates { hackathon_id } => {
            app.require(Route::AdminDashboard)?;
            let board = ReviewBoard::new(Arc::new(registry), mock_teams())
                .with_notifier(Arc::clone(&app.notifier));
            let sent = board.send_certificates(&hackathon_id)?;
            println!("Certificates sent to {} team(s)", sent);
        }
    }

    Ok(())
}

fn team_line(t: &Team) -> String {
    let members: Vec<&str> = t.members.iter().map(|m| m.name.as_str()).collect();
    format!(
        "{:<3} {:<16} {:<13} {:>3}  {}",
        t.id,
        t.name,
        t.status.label(),
        t.score,
        members.join(", ")
    )
}

fn run_teams(app: &App, cmd: TeamCommands) -> Result<()> {
    app.require(Route::AdminDashboard)?;
    let teams = mock_teams();

    let picked: Vec<&Team> = match cmd {
        TeamCommands::List { search, status } => filter_teams(&teams, &search, status),
        TeamCommands::Shortlist => shortlist(&teams),
    };

    app.print(&picked, || {
        if picked.is_empty() {
            return "No teams match".to_string();
        }
        picked
            .iter()
            .map(|t| team_line(t))
            .collect::<Vec<_>>()
            .join("\n")
    })
}

async fn run_submit(app: &App, args: SubmitArgs) -> Result<()> {
    app.require(Route::ParticipantDashboard)?;

    let mut draft = SubmissionDraft::new().description(args.description);
    if let Some(file) = args.abstract_file {
        draft = draft.abstract_file(file);
    }
    if let Some(file) = args.video {
        draft = draft.prototype_video(file);
    }
    if let Some(url) = args.github {
        draft = draft.github_link(url);
    }

    let registry = app.registry()?;
    if let Some(current) = registry.current_hackathon() {
        println!(
            "{}: {}% complete, {}",
            current.title,
            draft.progress(),
            countdown(end_of_day(current.submission_deadline), Utc::now())
        );
    }

    let simulator = EvaluationSimulator::new(Arc::new(TokioDelay), app.config.latency.to_latency())
        .with_notifier(Arc::clone(&app.notifier));
    let evaluation = simulator.submit(&draft)?;

    let mut rx = evaluation.subscribe();
    loop {
        let status = *rx.borrow_and_update();
        println!("{:<13} {}", status.label(), status.description());
        if status.is_terminal() || rx.changed().await.is_err() {
            break;
        }
    }

    Ok(())
}
