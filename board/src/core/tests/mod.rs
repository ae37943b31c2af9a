//! Unit tests for the coordination shell and visibility tracker
