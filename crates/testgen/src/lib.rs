//! Random schema generation for tests, benchmarks and the `generate` command.

pub mod generator;
