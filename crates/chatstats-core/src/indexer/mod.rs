pub mod ledger;
pub mod pipeline;
pub mod qa;
pub mod resolver;
