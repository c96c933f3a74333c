//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `projecthub_core` linkage by seeding the demo workspace.
//! - Print a short, line-oriented dashboard summary.

use projecthub_core::{core_version, DashboardService, RecordStore, SearchService, SystemClock};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("projecthub_core version={}", core_version());

    let store = match RecordStore::with_demo_data(SystemClock) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("failed to seed demo workspace: {err}");
            return ExitCode::FAILURE;
        }
    };

    let summary = DashboardService::new(&store).dashboard();
    println!(
        "projects total={} active={}",
        summary.total_projects, summary.active_projects
    );
    println!(
        "tasks completed={} pending={}",
        summary.completed_tasks, summary.pending_tasks
    );
    println!("team members={}", summary.team_members);
    for progress in &summary.project_progress {
        println!(
            "project name=\"{}\" progress={}% tasks={}/{}",
            progress.name, progress.progress, progress.completed_tasks, progress.total_tasks
        );
    }
    for task in &summary.upcoming_deadlines {
        println!("deadline task=\"{}\" status={:?}", task.title, task.status);
    }

    let service = DashboardService::new(&store);
    println!("tasks completion_rate={}%", service.task_stats().completion_rate);
    for member in service.team_performance() {
        println!(
            "member name=\"{}\" tasks={}/{} rate={}%",
            member.name, member.completed_tasks, member.assigned_tasks, member.completion_rate
        );
    }

    if let Some(query) = std::env::args().nth(1) {
        let hits = SearchService::new(&store).global_search(&query);
        println!(
            "search query=\"{query}\" projects={} tasks={} users={}",
            hits.projects.len(),
            hits.tasks.len(),
            hits.users.len()
        );
    }

    ExitCode::SUCCESS
}
