//! Kisan Mitra: plant health reports, daily tips and a farming assistant
//! chat, in English, Hindi and Bengali.

pub mod chat;
pub mod cli;
pub mod client;
pub mod config;
pub mod context;
pub mod diagnose;
pub mod display;
pub mod error;
pub mod logging;
pub mod preferences;
pub mod report;
pub mod tips;
