pub mod plan;

pub use plan::{ConfigNode, PlanDocument, PropertyValue};
