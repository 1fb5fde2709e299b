pub mod classifier;
pub mod recommender;
