//! `fleetops` — operator console for the fleet-management backend.
//!
//! Every subcommand maps onto one service call; `--json` switches the output
//! from tables to raw JSON for scripting.

use std::sync::Arc;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use futures::FutureExt;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use fleetops_client::{ClientConfig, FetchOptions, FleetClient, GatedFetcher};
use fleetops_core::depot::{plan_move, DepotLayout};
use fleetops_core::induction;
use fleetops_core::model::{
    JobCard, JobCardPriority, JobCardStatus, Kpi, Train, TrainStatus, WorkType,
};
use fleetops_core::roster::{self, JobCardFilter};

#[derive(Parser)]
#[command(name = "fleetops", version, about = "Operator console for the fleet-management backend")]
struct Cli {
    /// Backend base URL (overrides FLEETOPS_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Emit raw JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fleet roster
    Trains {
        #[command(subcommand)]
        command: TrainsCommand,
    },
    /// Maintenance job cards
    Jobcards {
        #[command(subcommand)]
        command: JobcardsCommand,
    },
    /// Fitness certificates
    Certificates {
        #[command(subcommand)]
        command: CertificatesCommand,
    },
    /// Branding contracts and assignments
    Branding {
        #[command(subcommand)]
        command: BrandingCommand,
    },
    /// Cleaning schedule
    Cleaning {
        #[command(subcommand)]
        command: CleaningCommand,
    },
    /// Depot track map derived from live train state
    Depot,
    /// Dashboard KPI tiles
    Kpis,
    /// Induction ranking profiles
    Induction,
    /// Backend connectivity
    Health {
        #[command(subcommand)]
        command: HealthCommand,
    },
}

#[derive(Subcommand)]
enum TrainsCommand {
    /// List trains, optionally filtered
    List {
        /// Lifecycle status (IN_SERVICE, MAINTENANCE, ACTIVE, RETIRED)
        #[arg(long)]
        status: Option<TrainStatus>,
        /// Job-card filter: all, open, none, completed
        #[arg(long)]
        jobs: Option<JobCardFilter>,
    },
    /// One train in full
    Show { id: i64 },
    /// Transition a train's lifecycle status
    SetStatus { id: i64, status: TrainStatus },
    /// Move a train to a depot track (persists location + implied status)
    Move { id: i64, track: String },
    /// Maintenance / cleaning / mileage / service readiness for one train
    Due { id: i64 },
}

#[derive(Subcommand)]
enum JobcardsCommand {
    /// All job cards
    List,
    /// Outstanding cards only
    Open,
    /// CRITICAL-priority cards
    Critical,
    /// Cards past their target completion
    Overdue,
    /// Cards for one train
    ForTrain { id: i64 },
    /// Open a new card
    Create {
        #[arg(long)]
        train: i64,
        #[arg(long)]
        summary: String,
        #[arg(long, default_value = "")]
        details: String,
        #[arg(long, default_value = "MEDIUM")]
        priority: JobCardPriority,
        #[arg(long, default_value = "CORRECTIVE")]
        work_type: WorkType,
        #[arg(long, default_value = "GENERAL")]
        asset_component: String,
        #[arg(long, default_value = "Team-A")]
        assigned_to: String,
    },
    /// Begin work
    Start { id: String },
    /// Mark work done
    Complete { id: String },
    /// Close the ticket
    Close { id: String },
}

#[derive(Subcommand)]
enum CertificatesCommand {
    List,
    /// Certificates expiring soon
    Expiring,
    Expired,
    ForTrain { id: i64 },
    Revoke { id: String },
}

#[derive(Subcommand)]
enum BrandingCommand {
    Contracts,
    Active,
    /// Contracts at risk of missing exposure SLAs
    AtRisk,
    /// Attach a train to a contract
    Assign {
        #[arg(long)]
        train: i64,
        #[arg(long)]
        contract: String,
    },
    /// Exposure report for a contract
    Report { contract: String },
}

#[derive(Subcommand)]
enum CleaningCommand {
    List,
    Today,
    Due,
    /// Ask the backend to lay out today's schedule
    ScheduleDaily,
    /// Tasks scheduled on a date (YYYY-MM-DD)
    Scheduled { date: NaiveDate },
    Start { id: String },
    Complete { id: String },
}

#[derive(Subcommand)]
enum HealthCommand {
    /// Probe once
    Check,
    /// Poll until ready or timeout
    Wait {
        /// Humantime duration, e.g. "60s"
        #[arg(long, default_value = "60s")]
        timeout: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = cli.api_url.clone() {
        config.base_url = url;
    }
    tracing::debug!(base_url = %config.base_url, "resolved configuration");
    let fleet = FleetClient::new(&config);

    run(cli, config, fleet).await
}

async fn run(cli: Cli, config: ClientConfig, fleet: FleetClient) -> anyhow::Result<()> {
    let json = cli.json;
    match cli.command {
        Command::Trains { command } => trains(command, &fleet, json).await,
        Command::Jobcards { command } => jobcards(command, &fleet, json).await,
        Command::Certificates { command } => certificates(command, &fleet, json).await,
        Command::Branding { command } => branding(command, &fleet, json).await,
        Command::Cleaning { command } => cleaning(command, &fleet, json).await,
        Command::Depot => {
            let trains = fleet.trains.all().await?;
            let layout = DepotLayout::derive(&trains);
            if json {
                return print_json(&layout);
            }
            for track in &layout.tracks {
                let occupants = if track.trains.is_empty() {
                    "-".to_string()
                } else {
                    track.trains.join(", ")
                };
                println!(
                    "{:<4} {:<12} {:>4}m  {}",
                    track.id,
                    format!("{:?}", track.track_type),
                    track.length,
                    occupants
                );
            }
            Ok(())
        }
        Command::Kpis => {
            // The dashboard goes through the health gate like the web UI
            // does: fail fast with an explanation while the backend boots.
            let dashboard = fleet.dashboard.clone();
            let fetcher = GatedFetcher::new(
                Arc::clone(&fleet.health),
                FetchOptions::default(),
                move || {
                    let dashboard = dashboard.clone();
                    async move { dashboard.kpis().await }.boxed()
                },
            );
            let snapshot = fetcher.load().await;
            let kpis: Vec<Kpi> = match snapshot.data {
                Some(kpis) => kpis,
                None => anyhow::bail!(snapshot
                    .error
                    .unwrap_or_else(|| "dashboard fetch failed".to_string())),
            };
            if json {
                return print_json(&kpis);
            }
            for kpi in &kpis {
                println!("{:<20} {:>6}  {}", kpi.title, kpi.value, kpi.description);
            }
            Ok(())
        }
        Command::Induction => {
            let trains = fleet.trains.all().await?;
            let today = Local::now().date_naive();
            let profiles = induction::profiles(&trains, today);
            print_json(&profiles)
        }
        Command::Health { command } => match command {
            HealthCommand::Check => {
                let health = fleet.health.check().await;
                println!("{:?}: {}", health.status, health.message);
                if !health.is_healthy() {
                    std::process::exit(1);
                }
                Ok(())
            }
            HealthCommand::Wait { timeout } => {
                let timeout = humantime_parse(&timeout)?;
                let health = fleet.health.wait_until_ready(timeout).await?;
                println!("{}", health.message);
                Ok(())
            }
        },
    }
    .with_context(|| format!("backend: {}", config.base_url))
}

fn humantime_parse(raw: &str) -> anyhow::Result<std::time::Duration> {
    // Bare numbers mean seconds, for muscle-memory compatibility.
    if let Ok(secs) = raw.parse::<u64>() {
        return Ok(std::time::Duration::from_secs(secs));
    }
    humantime::parse_duration(raw).with_context(|| format!("invalid duration: {raw}"))
}

async fn trains(command: TrainsCommand, fleet: &FleetClient, json: bool) -> anyhow::Result<()> {
    match command {
        TrainsCommand::List { status, jobs } => {
            let trains: Vec<Train> = fleet
                .cache
                .get_or_fetch("all-trains", || fleet.trains.all())
                .await?;
            let filtered: Vec<_> = match (status, jobs) {
                (Some(status), None) => roster::filter_by_status(&trains, status)
                    .into_iter()
                    .cloned()
                    .collect(),
                (status, Some(filter)) => {
                    let cards: Vec<JobCard> = fleet
                        .cache
                        .get_or_fetch("all-job-cards", || fleet.job_cards.all())
                        .await?;
                    roster::filter_trains(&trains, &cards, filter)
                        .into_iter()
                        .filter(|t| status.map_or(true, |s| t.status == s))
                        .cloned()
                        .collect()
                }
                (None, None) => trains,
            };
            if json {
                return print_json(&filtered);
            }
            for train in &filtered {
                println!(
                    "{:<4} {:<8} {:<12} {:<14} {:>10.1} km",
                    train.train_id,
                    train.train_number,
                    train.status,
                    train.depot_location.as_deref().unwrap_or("-"),
                    train.current_odometer
                );
            }
            Ok(())
        }
        TrainsCommand::Show { id } => print_json(&fleet.trains.by_id(id).await?),
        TrainsCommand::SetStatus { id, status } => {
            let train = fleet.trains.update_status(id, status).await?;
            println!("{} -> {}", train.train_number, train.status);
            Ok(())
        }
        TrainsCommand::Move { id, track } => {
            let trains = fleet.trains.all().await?;
            let train = trains
                .iter()
                .find(|t| t.train_id == id)
                .with_context(|| format!("train {id} not found"))?;
            let layout = DepotLayout::derive(&trains);
            match plan_move(train, &layout, &track) {
                Some(update) => {
                    let moved = fleet.trains.update(id, &update).await?;
                    println!(
                        "{} -> {} ({})",
                        moved.train_number,
                        track,
                        moved.status
                    );
                }
                None => println!("{} already on {}", train.train_number, track),
            }
            Ok(())
        }
        TrainsCommand::Due { id } => {
            let (maintenance, cleaning, mileage, validation) = tokio::join!(
                fleet.trains.maintenance_due(id),
                fleet.trains.cleaning_due(id),
                fleet.trains.mileage_balance(id),
                fleet.trains.validate_for_service(id),
            );
            print_json(&serde_json::json!({
                "maintenance": maintenance?,
                "cleaning": cleaning?,
                "mileage": mileage?,
                "serviceValidation": validation?,
            }))
        }
    }
}

async fn jobcards(command: JobcardsCommand, fleet: &FleetClient, json: bool) -> anyhow::Result<()> {
    let list = |cards: Vec<JobCard>| -> anyhow::Result<()> {
        if json {
            return print_json(&cards);
        }
        for card in &cards {
            println!(
                "{:<16} train {:<3} {:<11} {:<8} {}",
                card.job_card_id, card.train_id, card.status, card.priority, card.summary
            );
        }
        Ok(())
    };
    match command {
        JobcardsCommand::List => list(fleet.job_cards.all().await?),
        JobcardsCommand::Open => list(fleet.job_cards.open().await?),
        JobcardsCommand::Critical => list(fleet.job_cards.critical().await?),
        JobcardsCommand::Overdue => list(fleet.job_cards.overdue().await?),
        JobcardsCommand::ForTrain { id } => list(fleet.job_cards.by_train(id).await?),
        JobcardsCommand::Create {
            train,
            summary,
            details,
            priority,
            work_type,
            asset_component,
            assigned_to,
        } => {
            let now = Local::now().naive_local();
            let card = JobCard {
                job_card_id: format!("JC-{}", now.and_utc().timestamp_millis()),
                train_id: train,
                trainset_id: None,
                asset_component,
                work_type,
                priority,
                status: JobCardStatus::Open,
                reported_date: Some(now),
                target_completion_date: Some(now),
                actual_start: None,
                actual_end: None,
                summary,
                details,
                labor_hours_logged: 0.0,
                assigned_to,
                supervisor_override: false,
                last_updated: Some(now),
            };
            let created = fleet.job_cards.create(&card).await?;
            println!("created {}", created.job_card_id);
            Ok(())
        }
        JobcardsCommand::Start { id } => transition(fleet.job_cards.start(&id).await?),
        JobcardsCommand::Complete { id } => transition(fleet.job_cards.complete(&id).await?),
        JobcardsCommand::Close { id } => transition(fleet.job_cards.close(&id).await?),
    }
}

fn transition(card: JobCard) -> anyhow::Result<()> {
    println!("{} -> {}", card.job_card_id, card.status);
    Ok(())
}

async fn certificates(
    command: CertificatesCommand,
    fleet: &FleetClient,
    json: bool,
) -> anyhow::Result<()> {
    let certs = match command {
        CertificatesCommand::List => fleet.certificates.all().await?,
        CertificatesCommand::Expiring => fleet.certificates.expiring_soon().await?,
        CertificatesCommand::Expired => fleet.certificates.expired().await?,
        CertificatesCommand::ForTrain { id } => fleet.certificates.by_train(id).await?,
        CertificatesCommand::Revoke { id } => {
            let cert = fleet.certificates.revoke(&id).await?;
            println!("revoked {}", cert.certificate_id);
            return Ok(());
        }
    };
    if json {
        return print_json(&certs);
    }
    for cert in &certs {
        println!(
            "{:<10} {:<12} {:?}  expires {}",
            cert.certificate_id,
            cert.certificate_number,
            cert.status,
            cert.expiry_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "-".to_string())
        );
    }
    Ok(())
}

async fn branding(command: BrandingCommand, fleet: &FleetClient, json: bool) -> anyhow::Result<()> {
    match command {
        BrandingCommand::Contracts => print_json(&fleet.branding.contracts().await?),
        BrandingCommand::Active => print_json(&fleet.branding.active_contracts().await?),
        BrandingCommand::AtRisk => print_json(&fleet.branding.contracts_at_risk().await?),
        BrandingCommand::Assign { train, contract } => {
            let assignment = fleet.branding.assign_train(train, &contract).await?;
            println!("train {} assigned to {}", assignment.train_id, assignment.contract_id);
            Ok(())
        }
        BrandingCommand::Report { contract } => {
            let report = fleet.branding.exposure_report_by_contract(&contract).await?;
            if json {
                return print_json(&report);
            }
            println!(
                "{}: {:.1}h logged / {} required",
                contract,
                report.total_hours_logged,
                report
                    .required_hours
                    .map(|h| format!("{h:.1}h"))
                    .unwrap_or_else(|| "?".to_string())
            );
            Ok(())
        }
    }
}

async fn cleaning(command: CleaningCommand, fleet: &FleetClient, json: bool) -> anyhow::Result<()> {
    let tasks = match command {
        CleaningCommand::List => fleet.cleaning.all().await?,
        CleaningCommand::Today => fleet.cleaning.today().await?,
        CleaningCommand::Due => fleet.cleaning.due().await?,
        CleaningCommand::ScheduleDaily => fleet.cleaning.schedule_daily().await?,
        CleaningCommand::Scheduled { date } => fleet.cleaning.scheduled_for(date).await?,
        CleaningCommand::Start { id } => {
            let task = fleet.cleaning.start(&id).await?;
            println!("started {}", task.task_id.as_deref().unwrap_or(&id));
            return Ok(());
        }
        CleaningCommand::Complete { id } => {
            let task = fleet.cleaning.complete(&id).await?;
            println!("completed {}", task.task_id.as_deref().unwrap_or(&id));
            return Ok(());
        }
    };
    if json {
        return print_json(&tasks);
    }
    for task in &tasks {
        println!(
            "{:<8} bay {:<6} {:?} {:?}",
            task.task_id.as_deref().unwrap_or("-"),
            task.bay_id,
            task.cleaning_type,
            task.status
        );
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
