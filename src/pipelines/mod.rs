pub mod sentiment;
pub mod stats;
pub mod utils;
