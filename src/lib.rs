#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod clipboard;
pub mod config;
pub mod controller;
pub mod model;
pub mod storage;
pub mod submit;
pub mod tui;
