pub mod calculate;
pub mod scenarios;
pub mod setup;
pub mod ui;
