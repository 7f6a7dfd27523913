use anyhow::{bail, Context};
use chrono::{NaiveDate, Utc};
use sqlx::{PgPool, Row};
use tracing::debug;
use uuid::Uuid;

use crate::models::{Employee, Goal, IndicatorKind, Period, SaleRecord};
use crate::validate;

pub async fn init_db(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

fn indicator_kind_from_column(value: &str) -> anyhow::Result<IndicatorKind> {
    match value {
        "count" => Ok(IndicatorKind::Count),
        "revenue" => Ok(IndicatorKind::Revenue),
        other => bail!("unknown indicator kind '{other}' in goals snapshot"),
    }
}

/// Employees in insertion order, so ranking tie-breaks are reproducible.
pub async fn fetch_employees(pool: &PgPool) -> anyhow::Result<Vec<Employee>> {
    let rows = sqlx::query(
        "SELECT id, name FROM sales_leaderboard.employees ORDER BY created_at, id",
    )
    .fetch_all(pool)
    .await
    .context("failed to load employees")?;

    Ok(rows
        .into_iter()
        .map(|row| Employee {
            id: row.get("id"),
            name: row.get("name"),
        })
        .collect())
}

pub async fn fetch_sales(pool: &PgPool, period: Period) -> anyhow::Result<Vec<SaleRecord>> {
    let mut query = String::from(
        "SELECT s.id, s.employee_id, e.name AS employee_name, s.amount, s.sold_on, \
         s.description \
         FROM sales_leaderboard.sales s \
         JOIN sales_leaderboard.employees e ON e.id = s.employee_id",
    );

    match (period.start, period.end) {
        (Some(_), Some(_)) => query.push_str(" WHERE s.sold_on >= $1 AND s.sold_on <= $2"),
        (Some(_), None) => query.push_str(" WHERE s.sold_on >= $1"),
        (None, Some(_)) => query.push_str(" WHERE s.sold_on <= $1"),
        (None, None) => {}
    }
    query.push_str(" ORDER BY s.sold_on, s.id");

    let mut rows = sqlx::query(&query);
    if let Some(start) = period.start {
        rows = rows.bind(start);
    }
    if let Some(end) = period.end {
        rows = rows.bind(end);
    }

    let records = rows.fetch_all(pool).await.context("failed to load sales")?;
    debug!(count = records.len(), "sales snapshot loaded");

    Ok(records
        .into_iter()
        .map(|row| SaleRecord {
            id: row.get("id"),
            employee_id: row.get("employee_id"),
            employee_name: row.get("employee_name"),
            amount: row.get("amount"),
            sold_on: row.get("sold_on"),
            description: row.get("description"),
        })
        .collect())
}

/// All goals with their indicator joined on. Window filtering is left to
/// the resolver; this loader never applies period bounds.
pub async fn fetch_goals(pool: &PgPool) -> anyhow::Result<Vec<Goal>> {
    let rows = sqlx::query(
        "SELECT g.id, g.indicator_id, i.name AS indicator_name, i.kind, \
         g.target_value, g.starts_on, g.ends_on, g.active \
         FROM sales_leaderboard.goals g \
         JOIN sales_leaderboard.indicators i ON i.id = g.indicator_id \
         ORDER BY g.starts_on, g.id",
    )
    .fetch_all(pool)
    .await
    .context("failed to load goals")?;

    let mut goals = Vec::new();
    for row in rows {
        let kind: String = row.get("kind");
        goals.push(Goal {
            id: row.get("id"),
            indicator_id: row.get("indicator_id"),
            indicator_name: row.get("indicator_name"),
            kind: indicator_kind_from_column(&kind)?,
            target_value: row.get("target_value"),
            starts_on: row.get("starts_on"),
            ends_on: row.get("ends_on"),
            active: row.get("active"),
        });
    }

    debug!(count = goals.len(), "goals snapshot loaded");
    Ok(goals)
}

pub async fn seed(pool: &PgPool) -> anyhow::Result<()> {
    let employees = vec![
        (
            Uuid::parse_str("7f3b2a61-9f84-4a52-b1f2-5b2a0d9c41e7")?,
            "Ana Souza",
        ),
        (
            Uuid::parse_str("2c91d3b5-60ef-4a4e-9f0a-7d4f8e21c9ab")?,
            "Bruno Lima",
        ),
        (
            Uuid::parse_str("a84e6f02-1d37-4c6b-8a9e-0f52c7b3d614")?,
            "Carla Mendes",
        ),
    ];

    for (id, name) in employees {
        sqlx::query(
            r#"
            INSERT INTO sales_leaderboard.employees (id, name)
            VALUES ($1, $2)
            ON CONFLICT (name) DO UPDATE
            SET updated_at = NOW()
            "#,
        )
        .bind(id)
        .bind(name)
        .execute(pool)
        .await?;
    }

    let indicators = vec![
        (
            Uuid::parse_str("51c0a7d9-3e62-4b18-9c45-f20d86ab1375")?,
            "Monthly Sales Count",
            "count",
        ),
        (
            Uuid::parse_str("e7294c10-8b5f-4d3a-a1c6-94d07f53b8e2")?,
            "Monthly Revenue",
            "revenue",
        ),
    ];

    for (id, name, kind) in indicators {
        sqlx::query(
            r#"
            INSERT INTO sales_leaderboard.indicators (id, name, kind)
            VALUES ($1, $2, $3)
            ON CONFLICT (name) DO UPDATE
            SET kind = EXCLUDED.kind, updated_at = NOW()
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(kind)
        .execute(pool)
        .await?;
    }

    let goals = vec![
        (
            Uuid::parse_str("0b7d4e92-5a13-4f86-b2c0-6e98d1a4c753")?,
            "Monthly Sales Count",
            5.0_f64,
            NaiveDate::from_ymd_opt(2026, 7, 1).context("invalid date")?,
            NaiveDate::from_ymd_opt(2026, 7, 31),
            true,
        ),
        (
            Uuid::parse_str("c3f81b60-2d97-44ae-8f45-1a0b6c92e5d8")?,
            "Monthly Revenue",
            2000.0_f64,
            NaiveDate::from_ymd_opt(2026, 7, 1).context("invalid date")?,
            NaiveDate::from_ymd_opt(2026, 7, 31),
            true,
        ),
        (
            Uuid::parse_str("9a52e7c4-6b08-4d91-a3f7-8c14d02b6e95")?,
            "Monthly Revenue",
            1500.0_f64,
            NaiveDate::from_ymd_opt(2026, 1, 1).context("invalid date")?,
            NaiveDate::from_ymd_opt(2026, 3, 31),
            true,
        ),
    ];

    for (id, indicator_name, target_value, starts_on, ends_on, active) in goals {
        validate::validate_goal(target_value, starts_on, ends_on)?;

        let indicator_id: Uuid = sqlx::query(
            "SELECT id FROM sales_leaderboard.indicators WHERE name = $1",
        )
        .bind(indicator_name)
        .fetch_one(pool)
        .await?
        .get("id");

        sqlx::query(
            r#"
            INSERT INTO sales_leaderboard.goals
            (id, indicator_id, target_value, starts_on, ends_on, active)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE
            SET target_value = EXCLUDED.target_value,
                starts_on = EXCLUDED.starts_on,
                ends_on = EXCLUDED.ends_on,
                active = EXCLUDED.active,
                updated_at = NOW()
            "#,
        )
        .bind(id)
        .bind(indicator_id)
        .bind(target_value)
        .bind(starts_on)
        .bind(ends_on)
        .bind(active)
        .execute(pool)
        .await?;
    }

    let sales = vec![
        (
            "seed-001",
            "Ana Souza",
            650.0_f64,
            "Two workstation bundles",
            NaiveDate::from_ymd_opt(2026, 7, 3).context("invalid date")?,
        ),
        (
            "seed-002",
            "Ana Souza",
            820.0_f64,
            "Server upgrade",
            NaiveDate::from_ymd_opt(2026, 7, 14).context("invalid date")?,
        ),
        (
            "seed-003",
            "Ana Souza",
            740.0_f64,
            "Annual license renewal",
            NaiveDate::from_ymd_opt(2026, 7, 27).context("invalid date")?,
        ),
        (
            "seed-004",
            "Bruno Lima",
            480.0_f64,
            "Peripheral restock",
            NaiveDate::from_ymd_opt(2026, 7, 9).context("invalid date")?,
        ),
        (
            "seed-005",
            "Bruno Lima",
            910.0_f64,
            "Conference room fit-out",
            NaiveDate::from_ymd_opt(2026, 7, 22).context("invalid date")?,
        ),
        (
            "seed-006",
            "Carla Mendes",
            390.0_f64,
            "Starter kit",
            NaiveDate::from_ymd_opt(2026, 7, 18).context("invalid date")?,
        ),
    ];

    let today = Utc::now().date_naive();
    for (source_key, employee_name, amount, description, sold_on) in sales {
        validate::validate_sale(amount, sold_on, today)?;

        let employee_id: Uuid = sqlx::query(
            "SELECT id FROM sales_leaderboard.employees WHERE name = $1",
        )
        .bind(employee_name)
        .fetch_one(pool)
        .await?
        .get("id");

        sqlx::query(
            r#"
            INSERT INTO sales_leaderboard.sales
            (id, employee_id, amount, sold_on, description, source_key)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (source_key) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(employee_id)
        .bind(amount)
        .bind(sold_on)
        .bind(description)
        .bind(source_key)
        .execute(pool)
        .await?;
    }

    Ok(())
}

pub async fn import_csv(pool: &PgPool, csv_path: &std::path::Path) -> anyhow::Result<usize> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        employee: String,
        amount: f64,
        sold_on: NaiveDate,
        description: Option<String>,
        source_key: Option<String>,
    }

    let mut reader = csv::Reader::from_path(csv_path)?;
    let today = Utc::now().date_naive();
    let mut inserted = 0usize;

    for result in reader.deserialize::<CsvRow>() {
        let row = result?;
        validate::validate_employee_name(&row.employee)?;
        validate::validate_sale(row.amount, row.sold_on, today)?;

        let employee_id: Uuid = sqlx::query(
            r#"
            INSERT INTO sales_leaderboard.employees (id, name)
            VALUES ($1, $2)
            ON CONFLICT (name) DO UPDATE
            SET updated_at = NOW()
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(row.employee.trim())
        .fetch_one(pool)
        .await?
        .get("id");

        let source_key = row
            .source_key
            .unwrap_or_else(|| format!("import-{}", Uuid::new_v4()));

        let result = sqlx::query(
            r#"
            INSERT INTO sales_leaderboard.sales
            (id, employee_id, amount, sold_on, description, source_key)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (source_key) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(employee_id)
        .bind(row.amount)
        .bind(row.sold_on)
        .bind(row.description.unwrap_or_default())
        .bind(source_key)
        .execute(pool)
        .await?;

        if result.rows_affected() > 0 {
            inserted += 1;
        }
    }

    Ok(inserted)
}
