//! Tests for syncer services
//!
//! Exercises the reqwest feed client against a wiremock server and the row
//! parser against malformed payloads.
