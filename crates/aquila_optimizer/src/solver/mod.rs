pub mod evolutionary;
pub mod exact;
pub mod heuristic;
