pub mod board;
pub mod calendar;
pub mod filter;
pub mod group;
pub mod matrix;
pub mod pomodoro;
pub mod quick_add;
pub mod seed;
pub mod task_ops;
pub mod timeline;
pub mod view_data;
