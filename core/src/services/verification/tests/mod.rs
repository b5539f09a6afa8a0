//! Tests for verification service

#[cfg(test)]
mod service_tests;
