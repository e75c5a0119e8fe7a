//! `shelfwatch` — run the risk & recommendation engine over a catalog
//! snapshot and print the dashboard report.
//!
//! Usage: `shelfwatch <catalog.json> [--csv <out.csv>]`
//!
//! The snapshot is a JSON array of product records. The cosmetic role flag
//! comes from `SHELFWATCH_ROLE` (admin|staff, default staff).

mod report;
mod role;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::Local;

use shelfwatch_catalog::{Catalog, export};
use shelfwatch_engine::{analyze, compute_analytics, recommend_procurement, suggest_discounts};

use crate::role::UserRole;

struct Args {
    catalog_path: PathBuf,
    csv_path: Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut catalog_path = None;
    let mut csv_path = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--csv" => {
                let path = args.next().context("--csv requires a path")?;
                csv_path = Some(PathBuf::from(path));
            }
            path if catalog_path.is_none() => catalog_path = Some(PathBuf::from(path)),
            other => bail!("unexpected argument: {other}"),
        }
    }

    Ok(Args {
        catalog_path: catalog_path.context("usage: shelfwatch <catalog.json> [--csv <out.csv>]")?,
        csv_path,
    })
}

fn user_role() -> UserRole {
    match std::env::var("SHELFWATCH_ROLE") {
        Ok(raw) => raw.parse().unwrap_or_else(|e| {
            tracing::warn!("{e}; falling back to staff");
            UserRole::Staff
        }),
        Err(_) => UserRole::Staff,
    }
}

fn main() -> Result<()> {
    shelfwatch_observability::init();

    let args = parse_args()?;
    let role = user_role();
    let today = Local::now().date_naive();

    let raw = fs::read_to_string(&args.catalog_path)
        .with_context(|| format!("reading catalog {}", args.catalog_path.display()))?;
    let catalog: Catalog = serde_json::from_str(&raw)
        .with_context(|| format!("parsing catalog {}", args.catalog_path.display()))?;

    tracing::info!(
        products = catalog.len(),
        active = catalog.active().count(),
        role = ?role,
        %today,
        "catalog loaded"
    );

    let products = catalog.products();
    report::print_risk_alerts(&analyze(products, today));
    report::print_discounts(&suggest_discounts(products, today), role);
    report::print_procurement(&recommend_procurement(products, today));
    report::print_analytics(&compute_analytics(products, today));

    if let Some(csv_path) = args.csv_path {
        let csv = export::render_csv(products);
        fs::write(&csv_path, csv)
            .with_context(|| format!("writing report {}", csv_path.display()))?;
        tracing::info!(path = %csv_path.display(), "CSV report written");
    } else {
        tracing::debug!(
            suggested_name = %export::report_file_name(today),
            "no --csv path given; skipping export"
        );
    }

    Ok(())
}
