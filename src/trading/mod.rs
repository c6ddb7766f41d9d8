pub mod cache;
pub mod indicator;
pub mod model;
pub mod task;
pub mod utils;
