use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use sqlx::postgres::PgPoolOptions;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

mod db;
mod goals;
mod models;
mod performance;
mod ranking;
mod report;
mod stats;
mod validate;

use models::SortKey;

#[derive(Parser)]
#[command(name = "sales-leaderboard")]
#[command(about = "Sales performance leaderboard over employees, sales, and goals", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    OverallScore,
    QuantitySold,
    TotalValueSold,
    AttainmentAverage,
    Name,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::OverallScore => SortKey::OverallScore,
            SortArg::QuantitySold => SortKey::QuantitySold,
            SortArg::TotalValueSold => SortKey::TotalValueSold,
            SortArg::AttainmentAverage => SortKey::AttainmentAverage,
            SortArg::Name => SortKey::Name,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Load realistic seed data
    Seed,
    /// Import sales from a CSV file
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Rank employees by attainment for a period
    Ranking {
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
        #[arg(long, value_enum, default_value_t = SortArg::OverallScore)]
        sort_by: SortArg,
        #[arg(long, default_value_t = 10)]
        limit: usize,
        #[arg(long)]
        json: bool,
    },
    /// Show one employee's performance for a period
    #[command(group(
        ArgGroup::new("who")
            .args(["employee", "name"])
            .required(true)
            .multiple(false)
    ))]
    Performance {
        #[arg(long)]
        employee: Option<Uuid>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Summarize the population for a period
    Stats {
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Generate a markdown report
    Report {
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let database_url = std::env::var("DATABASE_URL")
        .context("DATABASE_URL must be set to a production Postgres instance")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("failed to connect to Postgres")?;

    match cli.command {
        Commands::InitDb => {
            db::init_db(&pool).await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            db::seed(&pool).await?;
            println!("Seed data inserted.");
        }
        Commands::Import { csv } => {
            let inserted = db::import_csv(&pool, &csv).await?;
            println!("Inserted {inserted} sales from {}.", csv.display());
        }
        Commands::Ranking {
            from,
            to,
            sort_by,
            limit,
            json,
        } => {
            let period = validate::validate_period(from, to)?;
            let employees = db::fetch_employees(&pool).await?;
            let sales = db::fetch_sales(&pool, period).await?;
            let goals = db::fetch_goals(&pool).await?;
            debug!(
                employees = employees.len(),
                sales = sales.len(),
                goals = goals.len(),
                "snapshot loaded"
            );

            let leaderboard =
                ranking::assemble_ranking(&employees, &sales, &goals, period, sort_by.into());

            if leaderboard.is_empty() {
                println!("No employees on record.");
                return Ok(());
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&leaderboard)?);
                return Ok(());
            }

            println!("Leaderboard for {}:", report::period_label(period));
            for entry in leaderboard.iter().take(limit) {
                println!(
                    "{:>3}. {} score {:.2} across {} sales totaling {:.2}, targets met: {}",
                    entry.position,
                    entry.employee.name,
                    entry.performance.overall_score,
                    entry.performance.quantity_sold,
                    entry.performance.total_value_sold,
                    if entry.performance.all_targets_met {
                        "yes"
                    } else {
                        "no"
                    }
                );
            }
        }
        Commands::Performance {
            employee,
            name,
            from,
            to,
        } => {
            let period = validate::validate_period(from, to)?;
            let employees = db::fetch_employees(&pool).await?;
            let sales = db::fetch_sales(&pool, period).await?;
            let goals = db::fetch_goals(&pool).await?;

            let employee_id = match employee {
                Some(id) => Some(id),
                None => name.as_deref().and_then(|name| {
                    employees.iter().find(|e| e.name == name).map(|e| e.id)
                }),
            };

            let record = employee_id.and_then(|id| {
                ranking::employee_performance(&employees, &sales, &goals, id, period)
            });

            match record {
                None => println!("No matching employee found."),
                Some(record) => {
                    println!("Performance for {}:", report::period_label(period));
                    println!(
                        "- Sales: {} totaling {:.2}",
                        record.quantity_sold, record.total_value_sold
                    );
                    println!(
                        "- Targets: {:.2} count, {:.2} revenue",
                        record.quantity_target, record.value_target
                    );
                    println!(
                        "- Attainment: {:.2}% quantity, {:.2}% value",
                        record.quantity_percent, record.value_percent
                    );
                    println!(
                        "- Overall score {:.2}, attainment average {:.2}",
                        record.overall_score, record.attainment_average
                    );
                    println!(
                        "- All targets met: {}",
                        if record.all_targets_met { "yes" } else { "no" }
                    );
                }
            }
        }
        Commands::Stats { from, to } => {
            let period = validate::validate_period(from, to)?;
            let employees = db::fetch_employees(&pool).await?;
            let sales = db::fetch_sales(&pool, period).await?;
            let goals = db::fetch_goals(&pool).await?;

            let leaderboard = ranking::assemble_ranking(
                &employees,
                &sales,
                &goals,
                period,
                SortKey::OverallScore,
            );
            let summary = stats::summarize(&leaderboard, period);

            if !summary.has_data {
                println!("No employees on record for this window.");
                return Ok(());
            }

            println!("Statistics for {}:", report::period_label(period));
            println!("- Employees: {}", summary.total_employees);
            println!(
                "- Sales: {} totaling {:.2}",
                summary.total_quantity_sold, summary.total_sales_value
            );
            println!(
                "- Average sales value per employee: {:.2}",
                summary.average_sales_per_employee
            );
            println!("- Average attainment: {:.2}%", summary.average_attainment);
            println!(
                "- Meeting all targets: {} of {} ({:.2}%)",
                summary.employees_meeting_all_targets,
                summary.total_employees,
                summary.percent_meeting_targets
            );
            println!(
                "- Best overall score {:.2}, worst {:.2}",
                summary.best_overall_score, summary.worst_overall_score
            );
        }
        Commands::Report { from, to, out } => {
            let period = validate::validate_period(from, to)?;
            let employees = db::fetch_employees(&pool).await?;
            let sales = db::fetch_sales(&pool, period).await?;
            let goals = db::fetch_goals(&pool).await?;

            let report = report::build_report(period, &employees, &sales, &goals);
            std::fs::write(&out, report)?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
