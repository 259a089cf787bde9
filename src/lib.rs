pub mod bar;
pub mod bar_reader;
pub mod catalog;
pub mod client;
pub mod cocktail;
pub mod config;
pub mod constants;
pub mod container;
pub mod dashboard;
pub mod employee;
pub mod errors;
pub mod events;
pub mod ingredient;
pub mod ledger;
pub mod order;
pub mod orders_queue;
pub mod preparation_slots;
pub mod preparer;
pub mod roster;
pub mod scheduler;
