//! Test suite for the sync module.

mod domain_tests;
mod support;
