pub mod alerts;
pub mod export;
pub mod readings;
pub mod run;
