//! Project commands: listing, ladder, ledger, advancement and summary.

use std::path::Path;

use serde::Deserialize;
use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::output;
use crate::application::{LedgerService, ProjectLedger};
use crate::domain::{Advancement, CycleStatus, Project, ProjectId, ProjectKind, Wager};
use crate::error::Result;
use crate::port::BookStore;

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: &'static str,
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "Bankroll")]
    bankroll: String,
    #[tabled(rename = "Cycle")]
    cycle: String,
}

impl From<&Project> for ProjectRow {
    fn from(project: &Project) -> Self {
        let (kind, cycle) = match project.kind() {
            ProjectKind::Standard { .. } => ("standard", "-".to_string()),
            ProjectKind::GoalCompounding(_) => {
                ("compounding", project.active_cycle().to_string())
            }
        };
        Self {
            id: project.id().to_string(),
            name: project.name().to_string(),
            kind,
            start: project.start_date().to_string(),
            bankroll: output::money(project.kind().start_bankroll()),
            cycle,
        }
    }
}

#[derive(Tabled)]
struct StepRow {
    #[tabled(rename = "#")]
    index: String,
    #[tabled(rename = "Bank")]
    bank: String,
    #[tabled(rename = "Stake")]
    stake: String,
    #[tabled(rename = "Goal")]
    goal: String,
}

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "#")]
    index: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Goal")]
    goal: String,
    #[tabled(rename = "Raw")]
    raw: String,
    #[tabled(rename = "Carry in")]
    incoming: String,
    #[tabled(rename = "Shown")]
    shown: String,
    #[tabled(rename = "Carry out")]
    outgoing: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Balance")]
    balance: String,
}

fn render<T: Tabled>(rows: impl IntoIterator<Item = T>) {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    output::lines(&table.to_string());
}

/// List every project in the book.
pub fn list<S: BookStore>(service: &LedgerService<S>) -> Result<()> {
    let projects = service.store().projects()?;

    if output::is_json() {
        output::json_output(&projects)?;
        return Ok(());
    }

    output::section("Projects");
    if projects.is_empty() {
        output::warning("No projects in the book");
        return Ok(());
    }
    render(projects.iter().map(ProjectRow::from));
    Ok(())
}

/// Show the planned ladder of a compounding project.
pub fn ladder<S: BookStore>(service: &LedgerService<S>, id: &str) -> Result<()> {
    let ledger = service.view(&ProjectId::new(id))?;

    if output::is_json() {
        output::json_output(&json!({
            "project": ledger.project.id(),
            "activeCycle": ledger.project.active_cycle(),
            "ladder": ledger.ladder,
        }))?;
        return Ok(());
    }

    output::section(&format!("Ladder · {}", ledger.project.name()));
    let Some(ladder) = &ledger.ladder else {
        output::warning("Standard projects have no staking ladder");
        return Ok(());
    };

    let active = ledger.project.active_cycle();
    render(ladder.steps().iter().map(|step| StepRow {
        index: if step.index == active {
            format!("{} ◀", step.index)
        } else {
            step.index.to_string()
        },
        bank: output::money(step.bank_at_start),
        stake: output::money(step.planned_stake),
        goal: output::money(step.planned_goal),
    }));
    Ok(())
}

/// Show the reconciled results of every cycle up to the active one.
pub fn ledger<S: BookStore>(service: &LedgerService<S>, id: &str) -> Result<()> {
    let ledger = service.view(&ProjectId::new(id))?;

    if output::is_json() {
        output::json_output(&ledger)?;
        return Ok(());
    }

    output::section(&format!("Ledger · {}", ledger.project.name()));
    if ledger.entries.is_empty() {
        output::warning("Standard projects have no cycle ledger");
        return Ok(());
    }

    render(ledger.entries.iter().map(|e| EntryRow {
        index: e.index.to_string(),
        status: match e.status {
            CycleStatus::Closed if e.met_goal => "met",
            CycleStatus::Closed => "closed",
            CycleStatus::InProgress => "active",
        },
        goal: output::money(e.planned_goal),
        raw: output::signed(e.raw_profit),
        incoming: output::money(e.incoming_carry),
        shown: output::signed(e.display_profit),
        outgoing: output::money(e.outgoing_carry),
        progress: output::percent(Some(e.progress_pct())),
        balance: output::money(e.final_balance()),
    }));
    gate_fields(&ledger);
    Ok(())
}

fn gate_fields(ledger: &ProjectLedger) {
    if let Some(gate) = ledger.gate {
        output::field(
            "Active days",
            format!("{} / {}", gate.active_days, gate.required),
        );
        if gate.can_advance {
            output::success(&format!("Cycle {} can be closed", gate.cycle));
        }
    }
}

/// Close the active cycle if the gate allows it.
pub fn advance<S: BookStore>(service: &LedgerService<S>, id: &str) -> Result<()> {
    let outcome = service.advance(&ProjectId::new(id))?;

    if output::is_json() {
        let body = match &outcome {
            Advancement::Advanced(next) => json!({
                "advanced": true,
                "activeCycle": next.active_cycle(),
            }),
            Advancement::Rejected {
                active_days,
                required,
            } => json!({
                "advanced": false,
                "reason": "insufficient_activity",
                "activeDays": active_days,
                "required": required,
            }),
            Advancement::NotCompounding => json!({
                "advanced": false,
                "reason": "not_compounding",
            }),
        };
        output::json_output(&body)?;
        return Ok(());
    }

    match outcome {
        Advancement::Advanced(next) => {
            output::success(&format!("Cycle {} is now active", next.active_cycle()));
        }
        Advancement::Rejected {
            active_days,
            required,
        } => output::warning(&format!(
            "Cycle not closed: {active_days} of {required} betting days"
        )),
        Advancement::NotCompounding => {
            output::warning("Standard projects have no cycles to advance");
        }
    }
    Ok(())
}

/// Show the headline figures of a project.
pub fn summary<S: BookStore>(service: &LedgerService<S>, id: &str) -> Result<()> {
    let ledger = service.view(&ProjectId::new(id))?;
    let summary = &ledger.summary;

    if output::is_json() {
        output::json_output(summary)?;
        return Ok(());
    }

    output::section(&format!("Summary · {}", ledger.project.name()));
    output::field("Wagers", summary.wager_count);
    output::field("Profit", output::signed(summary.settled_profit));
    output::field("Bankroll", output::money(summary.current_bankroll));
    output::field("Win rate", output::percent(summary.win_rate));
    output::field("ROI", output::percent(summary.roi));
    if let Some(stake) = summary.working_stake {
        output::field("Working stake", output::money(stake));
    }
    output::field("Progress", output::percent(Some(summary.progress)));
    gate_fields(&ledger);
    Ok(())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WagerFile {
    Many(Vec<Wager>),
    One(Box<Wager>),
}

/// Record the wagers held in a JSON file.
pub fn record<S: BookStore>(service: &LedgerService<S>, path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(path)?;
    let wagers = match serde_json::from_str::<WagerFile>(&content)? {
        WagerFile::Many(wagers) => wagers,
        WagerFile::One(wager) => vec![*wager],
    };

    let mut recorded = Vec::with_capacity(wagers.len());
    for wager in wagers {
        recorded.push(service.record_wager(wager)?);
    }

    if output::is_json() {
        output::json_output(&recorded)?;
        return Ok(());
    }
    output::success(&format!("Recorded {} wager(s)", recorded.len()));
    Ok(())
}
