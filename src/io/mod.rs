pub mod atomic;
pub mod config_io;
pub mod state_io;
