//! Common test utilities for surf-climate.
//!
//! This module provides shared utilities for testing the surf-climate server.

#![allow(dead_code)]

pub mod assertions;
pub mod http_client;
pub mod test_data;
