pub mod dataset;
pub mod matching;
pub mod models;
pub mod normalize;
pub mod search;
pub mod similarity;
pub mod utils;
