//! American roulette: wager validation, spins and settlement, with a
//! Discord front-end and a JSON-backed balance ledger.

pub mod amount;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod ledger;
pub mod roulette;
pub mod settlement;
pub mod slip;
pub mod validator;
pub mod wheel;
