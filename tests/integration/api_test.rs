//! API endpoint integration tests
//!
//! Drives the full router over in-memory storage: registration, login,
//! user lookup and organisation management.

#![allow(dead_code)]

mod auth;
mod common;
mod organisations;
mod users;
