pub mod candidate;
pub mod forest;
pub mod span;
