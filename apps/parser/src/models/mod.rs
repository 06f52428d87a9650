pub mod candidate;
pub mod ids;
pub mod job;
