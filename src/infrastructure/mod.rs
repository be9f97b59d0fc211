pub mod iso8601;
pub mod persistence;
pub mod sources;
