//! Library crate for clubhouse-back, exposing modules for binaries and tests.

pub mod calendar;
pub mod config;
pub mod dao;
mod dto;
mod error;
pub mod routes;
pub mod services;
pub mod state;
