//! Live-server integration tests

mod api_tests;
