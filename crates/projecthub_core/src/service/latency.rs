//! Simulated request latency.
//!
//! Services pause before answering so hosts can exercise loading states
//! against the in-memory store. The default profile never sleeps.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Service operations that carry a simulated delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListProjects,
    GetProject,
    CreateProject,
    UpdateProject,
    DeleteProject,
    ListTasks,
    GetTask,
    ListProjectTasks,
    CreateTask,
    UpdateTask,
    DeleteTask,
    EditTaskChildren,
    ListUsers,
    GetUser,
    CurrentUser,
    CreateUser,
    UpdateUser,
    DeleteUser,
    RecentActivity,
    ProjectActivity,
    Dashboard,
    ProjectStats,
    TaskStats,
    TeamPerformance,
    GlobalSearch,
    Board,
}

impl Operation {
    /// Baseline delay in milliseconds at scale `1.0`.
    pub fn baseline_ms(self) -> u64 {
        match self {
            Self::ListProjects => 500,
            Self::GetProject => 300,
            Self::CreateProject => 800,
            Self::UpdateProject => 500,
            Self::DeleteProject => 400,
            Self::ListTasks => 400,
            Self::GetTask | Self::ListProjectTasks => 300,
            Self::CreateTask => 600,
            Self::UpdateTask | Self::DeleteTask | Self::EditTaskChildren => 400,
            Self::ListUsers => 300,
            Self::GetUser | Self::CurrentUser => 200,
            Self::CreateUser | Self::UpdateUser | Self::DeleteUser => 400,
            Self::RecentActivity | Self::ProjectActivity => 300,
            Self::Dashboard => 600,
            Self::ProjectStats | Self::TaskStats | Self::TeamPerformance | Self::Board => 400,
            Self::GlobalSearch => 500,
        }
    }
}

/// Multiplier applied to every operation's baseline delay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyProfile {
    /// `0.0` disables delays, `1.0` uses the baseline table.
    pub scale: f64,
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self::none()
    }
}

impl LatencyProfile {
    pub fn none() -> Self {
        Self { scale: 0.0 }
    }

    pub fn simulated() -> Self {
        Self { scale: 1.0 }
    }

    pub fn scaled(scale: f64) -> Self {
        Self { scale }
    }

    pub fn is_enabled(&self) -> bool {
        self.scale.is_finite() && self.scale > 0.0
    }

    pub fn delay_for(&self, operation: Operation) -> Duration {
        if !self.is_enabled() {
            return Duration::ZERO;
        }
        let millis = operation.baseline_ms() as f64 * self.scale;
        Duration::from_micros((millis * 1000.0).round() as u64)
    }

    /// Blocks the calling thread for the operation's delay.
    pub fn pause(&self, operation: Operation) {
        let delay = self.delay_for(operation);
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}
