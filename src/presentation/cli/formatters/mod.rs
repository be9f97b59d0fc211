pub mod alert_fmt;
pub mod snapshot_fmt;
pub mod table_fmt;
