//! BizCore admin console: session-aware management of users, roles and
//! permissions over the BizCore REST API, drawn in the terminal.

pub mod api;
pub mod app;
pub mod config;
pub mod i18n;
pub mod menu;
pub mod models;
pub mod permissions;
pub mod session;
pub mod table;
pub mod ui;
pub mod utils;
