//! Aggregate wager reports.

use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::command::ReportDimension;
use crate::adapter::inbound::cli::output;
use crate::application::LedgerService;
use crate::domain::report::{
    by_league, by_market, by_methodology, by_team, discover_teams, half_split, ranked_by_profit,
    under_matrix, Rollup,
};
use crate::domain::{Breakdown, ProjectId, Wager};
use crate::error::{Result, StoreError};
use crate::port::BookStore;

#[derive(Tabled)]
struct BreakdownRow {
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Bets")]
    count: u32,
    #[tabled(rename = "Profit")]
    profit: String,
    #[tabled(rename = "Win rate")]
    win_rate: String,
    #[tabled(rename = "ROI")]
    roi: String,
    #[tabled(rename = "Losses")]
    losses: u32,
}

impl BreakdownRow {
    fn new(label: impl Into<String>, b: &Breakdown) -> Self {
        Self {
            label: label.into(),
            count: b.count,
            profit: output::signed(b.profit),
            win_rate: output::percent(b.win_rate()),
            roi: output::percent(b.roi()),
            losses: b.loss_events,
        }
    }
}

#[derive(Serialize)]
struct RankedRow<'a> {
    label: &'a str,
    #[serde(flatten)]
    breakdown: &'a Breakdown,
}

fn scoped<S: BookStore>(service: &LedgerService<S>, project: Option<&str>) -> Result<Vec<Wager>> {
    let wagers = service.store().wagers()?;
    let Some(id) = project else {
        return Ok(wagers);
    };
    let id = ProjectId::new(id);
    let project = service
        .store()
        .project(&id)?
        .ok_or(StoreError::NotFound(id))?;
    Ok(project.owned(&wagers).into_iter().cloned().collect())
}

fn print_rollup(title: &str, rollup: &Rollup) -> Result<()> {
    let ranked = ranked_by_profit(rollup);

    if output::is_json() {
        let rows: Vec<_> = ranked
            .iter()
            .map(|&(label, breakdown)| RankedRow { label, breakdown })
            .collect();
        output::json_output(&rows)?;
        return Ok(());
    }

    output::section(title);
    if ranked.is_empty() {
        output::warning("No wagers to report");
        return Ok(());
    }
    let mut table = Table::new(
        ranked
            .iter()
            .map(|&(label, breakdown)| BreakdownRow::new(label, breakdown)),
    );
    table.with(Style::rounded());
    output::lines(&table.to_string());
    Ok(())
}

/// Aggregate wagers by `by`, optionally restricted to one project.
pub fn execute<S: BookStore>(
    service: &LedgerService<S>,
    by: ReportDimension,
    project: Option<&str>,
) -> Result<()> {
    let wagers = scoped(service, project)?;

    match by {
        ReportDimension::Market => print_rollup("By market", &by_market(&wagers)),
        ReportDimension::League => print_rollup("By league", &by_league(&wagers)),
        ReportDimension::Methodology => {
            print_rollup("By methodology", &by_methodology(&wagers))
        }
        ReportDimension::Team => {
            let teams = discover_teams(&wagers);
            print_rollup("By team", &by_team(&wagers, &teams))
        }
        ReportDimension::Half => {
            let split = half_split(&wagers);
            if output::is_json() {
                output::json_output(&split)?;
                return Ok(());
            }
            output::section("First half versus full time");
            let mut table = Table::new([
                BreakdownRow::new("First half", &split.first_half),
                BreakdownRow::new("Full time", &split.full_time),
            ]);
            table.with(Style::rounded());
            output::lines(&table.to_string());
            Ok(())
        }
        ReportDimension::Under => {
            let matrix = under_matrix(&wagers);
            if output::is_json() {
                output::json_output(&matrix)?;
                return Ok(());
            }
            output::section("Under lines");
            let mut rows = Vec::new();
            for line in &matrix {
                if let Some(ht) = &line.half_time {
                    rows.push(BreakdownRow::new(format!("{} HT", line.line), ht));
                }
                rows.push(BreakdownRow::new(format!("{} FT", line.line), &line.full_time));
            }
            let mut table = Table::new(rows);
            table.with(Style::rounded());
            output::lines(&table.to_string());
            Ok(())
        }
    }
}
