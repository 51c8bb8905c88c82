pub mod utils;
pub mod position;
pub mod neural;
pub mod engine;
pub mod dataset;
