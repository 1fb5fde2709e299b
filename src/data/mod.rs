pub mod crops;
pub mod download;
pub mod features;
pub mod preprocessing;
