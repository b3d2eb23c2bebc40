#![cfg(test)]

pub mod common;
pub mod open_tests;
