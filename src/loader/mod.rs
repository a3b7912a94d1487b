pub mod plan;

pub use plan::{load_plan, save_plan};
