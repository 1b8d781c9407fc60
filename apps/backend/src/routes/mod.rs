//! HTTP route handlers

pub mod study;
