pub mod generalize;
pub mod plan;
