use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use parent_dashboard::config::DashboardConfig;
use parent_dashboard::domain::{validate_login, CoinHistoryFormatter, Greeting};
use parent_dashboard::logging::init_tracing;
use parent_dashboard::state::{DashboardState, Resource};
use serde::Serialize;
use shared::{CoinCategory, HomeworkStatus, LeaderboardPeriod, LoginRequest};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "parent-dashboard")]
#[command(about = "Coin balances and learning data for the parent dashboard")]
struct Cli {
    /// YAML config file; missing file means defaults
    #[arg(long, env = "DASHBOARD_CONFIG", default_value = "dashboard.yaml")]
    config: PathBuf,

    /// Overrides the configured API base URL
    #[arg(long)]
    api_url: Option<String>,

    /// Overrides the configured log level (RUST_LOG still wins)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Greeting, coin balances and recent awards (the default)
    Summary {
        #[arg(long)]
        child: Option<String>,
    },
    /// Credit coins on the in-memory ledger and print the new balance
    Award {
        #[arg(long)]
        child: String,
        /// class, homework or game
        #[arg(long)]
        category: CoinCategory,
        #[arg(long, default_value = "Awarded from the command line")]
        description: String,
    },
    /// Sign in and print the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "DASHBOARD_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Call the REST API through a data hook and print the JSON payload
    Fetch {
        #[command(subcommand)]
        target: FetchTarget,
    },
}

#[derive(Subcommand, Debug)]
enum FetchTarget {
    Profile,
    Children,
    Progress {
        #[arg(long)]
        child: Option<String>,
    },
    Bookings {
        #[arg(long)]
        child: Option<String>,
    },
    Homework {
        #[arg(long)]
        child: Option<String>,
        #[arg(long, value_enum)]
        status: Option<HomeworkFilter>,
    },
    Leaderboard {
        #[arg(long, value_enum, default_value_t = PeriodArg::Weekly)]
        period: PeriodArg,
        #[arg(long)]
        limit: Option<u32>,
    },
    Tickets,
    Ticket {
        id: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum HomeworkFilter {
    Pending,
    Submitted,
    Graded,
    Overdue,
}

impl From<HomeworkFilter> for HomeworkStatus {
    fn from(filter: HomeworkFilter) -> Self {
        match filter {
            HomeworkFilter::Pending => HomeworkStatus::Pending,
            HomeworkFilter::Submitted => HomeworkStatus::Submitted,
            HomeworkFilter::Graded => HomeworkStatus::Graded,
            HomeworkFilter::Overdue => HomeworkStatus::Overdue,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PeriodArg {
    Weekly,
    Monthly,
    AllTime,
}

impl From<PeriodArg> for LeaderboardPeriod {
    fn from(period: PeriodArg) -> Self {
        match period {
            PeriodArg::Weekly => LeaderboardPeriod::Weekly,
            PeriodArg::Monthly => LeaderboardPeriod::Monthly,
            PeriodArg::AllTime => LeaderboardPeriod::AllTime,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = DashboardConfig::load(Some(cli.config.as_path())).context("Failed to load dashboard config")?;
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    init_tracing(&config.log_level);

    let mut state = DashboardState::new(config).context("Failed to set up dashboard")?;

    match cli.command.unwrap_or(Command::Summary { child: None }) {
        Command::Summary { child } => print_summary(&state, child.as_deref()),
        Command::Award {
            child,
            category,
            description,
        } => {
            let transaction = state.award_coins(&child, category, &description)?;
            let formatter = CoinHistoryFormatter::new();
            println!(
                "{} {} for {} ({})",
                formatter.format_points(transaction.points),
                category.label().to_lowercase(),
                child,
                transaction.id
            );
            println!("New balance: {}", state.ledger().get_total_coins(&child));
            Ok(())
        }
        Command::Login { email, password } => {
            let request = LoginRequest { email, password };
            let validation = validate_login(&request);
            if !validation.is_valid {
                bail!(validation.messages().join("; "));
            }
            let response = state.api().auth().login(&request).await?;
            state.sign_in(&response.token);
            info!("Signed in as {}", response.profile.email);
            println!("{}", Greeting::now().address(Some(&response.profile.name)));
            println!("{}", response.token);
            Ok(())
        }
        Command::Fetch { target } => fetch(&state, target).await,
    }
}

fn print_summary(state: &DashboardState, child: Option<&str>) -> anyhow::Result<()> {
    println!("{}", Greeting::now().address(None));

    let children: Vec<String> = match child {
        Some(child) => vec![child.to_string()],
        None => state.ledger().children().into_iter().map(str::to_string).collect(),
    };

    let now = Utc::now();
    for child_id in &children {
        let summary = state.coin_summary(child_id);
        println!();
        println!(
            "{}: {} coins ({} today)",
            child_id, summary.total_coins, summary.earned_today
        );
        for row in state.recent_history(child_id, now) {
            println!(
                "  {:>10}  {:<20} {:<40} {}",
                row.points_label, row.category_label, row.description, row.when
            );
        }
    }

    let errors = state.ledger().verify_balances();
    if !errors.is_empty() {
        bail!("Ledger balances are inconsistent: {}", errors.join("; "));
    }
    Ok(())
}

fn child_or_active(state: &DashboardState, child: Option<String>) -> anyhow::Result<String> {
    match child.or_else(|| state.active_child().map(str::to_string)) {
        Some(child) => Ok(child),
        None => bail!("No child selected, pass --child"),
    }
}

async fn fetch(state: &DashboardState, target: FetchTarget) -> anyhow::Result<()> {
    match target {
        FetchTarget::Profile => print_resource(state.use_profile()).await,
        FetchTarget::Children => print_resource(state.use_children()).await,
        FetchTarget::Progress { child } => {
            let child = child_or_active(state, child)?;
            print_resource(state.use_progress(&child)).await
        }
        FetchTarget::Bookings { child } => {
            let child = child_or_active(state, child)?;
            print_resource(state.use_bookings(&child)).await
        }
        FetchTarget::Homework { child, status } => {
            let child = child_or_active(state, child)?;
            print_resource(state.use_homework(&child, status.map(Into::into))).await
        }
        FetchTarget::Leaderboard { period, limit } => {
            print_resource(state.use_leaderboard(period.into(), limit)).await
        }
        FetchTarget::Tickets => print_resource(state.use_support_tickets()).await,
        FetchTarget::Ticket { id } => print_resource(state.use_support_ticket(&id)).await,
    }
}

async fn print_resource<T>(mut resource: Resource<T>) -> anyhow::Result<()>
where
    T: Serialize + Clone + Send + 'static,
{
    resource.load().await;
    let snapshot = resource.snapshot();
    if let Some(error) = snapshot.error {
        bail!("Failed to fetch {}: {}", resource.name(), error);
    }
    let data = snapshot
        .data
        .with_context(|| format!("No {} data returned", resource.name()))?;
    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(())
}
