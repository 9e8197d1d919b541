//! Task pool and daily task generator.

mod catalog;
mod generator;

pub use catalog::{templates, TaskTemplate, TASKS_PER_PILLAR};
pub use generator::{completed_count, generate_daily_tasks, remaining_points, Task};
