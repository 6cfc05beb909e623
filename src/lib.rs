// src/lib.rs

pub mod common;
pub mod config;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repo;
pub mod routes;
pub mod services;
