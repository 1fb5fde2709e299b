pub mod history;
pub mod trainer;
