#![doc = "The `taskdeck` library crate."]
#![doc = ""]
#![doc = "Contains the domain models, stores, authentication mechanisms, routing"]
#![doc = "configuration, and error handling for the TaskDeck API. The main binary"]
#![doc = "(`main.rs`) uses it to construct and run the application."]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
