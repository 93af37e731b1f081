pub mod compute;
pub mod duplicates;
pub mod matrices;
pub mod project;
