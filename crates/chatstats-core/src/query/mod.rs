pub mod guards;
pub mod planner;
pub mod rankings;
pub mod report;
pub mod words;
