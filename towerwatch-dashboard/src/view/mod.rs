//! Terminal view
//!
//! Pure projection of a snapshot into text. Nothing here touches the store
//! or the network.

mod table;

use chrono::{DateTime, Utc};
use colored::{Color, Colorize};
use towerwatch_core::domain::job::{JobRecord, JobStatus};
use towerwatch_core::domain::runner::RunnerRecord;
use towerwatch_core::domain::snapshot::Snapshot;

use table::{Cell, Table};

/// Renders the runners table followed by the jobs table
pub fn render(snapshot: &Snapshot) -> String {
    render_at(snapshot, Utc::now())
}

/// Like [`render`], computing heartbeat ages relative to `now`
pub fn render_at(snapshot: &Snapshot, now: DateTime<Utc>) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{}\n",
        format!(
            "Runners ({} registered, {} busy)",
            snapshot.runners.len(),
            snapshot.busy_runners()
        )
        .bold()
    ));
    if snapshot.runners.is_empty() {
        out.push_str(&format!("{}\n", "No runners registered.".yellow()));
    } else {
        out.push_str(&runners_table(snapshot.runners.values(), now).render());
    }

    out.push('\n');

    out.push_str(&format!(
        "{}\n",
        format!("Jobs ({})", snapshot.jobs.len()).bold()
    ));
    if snapshot.jobs.is_empty() {
        out.push_str(&format!("{}\n", "No jobs submitted.".yellow()));
    } else {
        out.push_str(&jobs_table(&snapshot.jobs).render());
    }

    out
}

fn runners_table<'a>(
    runners: impl Iterator<Item = &'a RunnerRecord>,
    now: DateTime<Utc>,
) -> Table {
    let mut table = Table::new(&["ID", "Address", "Port", "LastSeen", "IsBusy"]);
    for runner in runners {
        let busy = if runner.is_busy {
            Cell::colored("yes", Color::Yellow)
        } else {
            Cell::colored("no", Color::Green)
        };
        table.push(vec![
            Cell::plain(&runner.id),
            Cell::plain(&runner.address),
            Cell::plain(runner.port.to_string()),
            Cell::plain(last_seen(runner, now)),
            busy,
        ]);
    }
    table
}

fn jobs_table(jobs: &[JobRecord]) -> Table {
    let mut table = Table::new(&["ID", "Repo", "Job", "Status", "Created"]);
    for job in jobs {
        table.push(vec![
            Cell::plain(&job.id),
            Cell::plain(job.repo_slug()),
            Cell::plain(&job.job_name),
            Cell::colored(&job.status, status_color(&job.status_kind())),
            Cell::plain(&job.created_at),
        ]);
    }
    table
}

/// Raw heartbeat time, with its age appended when it parses
fn last_seen(runner: &RunnerRecord, now: DateTime<Utc>) -> String {
    match runner.last_seen_at() {
        Some(seen) => format!("{} ({})", runner.last_seen, age(now - seen)),
        None => runner.last_seen.clone(),
    }
}

fn age(elapsed: chrono::TimeDelta) -> String {
    let secs = elapsed.num_seconds();
    if secs < 0 {
        "in the future".to_string()
    } else if secs < 60 {
        format!("{}s ago", secs)
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else {
        format!("{}h ago", secs / 3600)
    }
}

fn status_color(status: &JobStatus) -> Color {
    match status {
        JobStatus::Queued => Color::White,
        JobStatus::Dispatched => Color::Cyan,
        JobStatus::Running => Color::Yellow,
        JobStatus::Success => Color::Green,
        JobStatus::Failed => Color::Red,
        JobStatus::Other(_) => Color::Magenta,
    }
}
