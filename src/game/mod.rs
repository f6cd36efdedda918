pub mod field;
pub mod logic;
pub mod types;
pub mod view;
