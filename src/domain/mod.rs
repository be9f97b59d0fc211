pub mod entities;
pub mod ports;
pub mod rules;
pub mod stats;
pub mod value_objects;
pub mod window;
