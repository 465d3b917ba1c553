pub mod communication;
pub mod job;
pub mod project;
pub mod proposal;
pub mod skill_gap;
pub mod user;
