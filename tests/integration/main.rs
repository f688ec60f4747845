//! End-to-end tests for the HTTP API, run against an in-process router
//! with a canned escalation backend.

mod helpers;

mod access_test;
mod rules_test;
mod table_test;
