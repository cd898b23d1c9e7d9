//! Unit tests for the attribute XML codec and VOC annotation files.
//!
//! These tests verify that attribute blocks survive a write/read cycle and
//! that damaged blocks never break loading the surrounding document.

mod voc_tests;
