#[macro_use]
extern crate rust_i18n;

pub mod api;
pub mod attendance;
pub mod calendar;
pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod grading;
pub mod models;
pub mod notify;
pub mod repository;
pub mod startup;
pub mod utils;

// Initialize i18n
i18n!("locales", fallback = "en");
