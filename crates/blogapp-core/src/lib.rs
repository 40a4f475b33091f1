//! Core BlogApp library (session lifecycle, API bindings, screen controllers).

pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod gate;
pub mod navigation;
pub mod screens;
pub mod session;
