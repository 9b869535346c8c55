pub mod config;
pub mod model_file;
pub mod startup;
pub mod state;
