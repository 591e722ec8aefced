pub mod coverage;
pub mod data_core;
pub mod error;
pub mod merge;
pub mod mutation;
pub mod path;
pub mod performance;
pub mod shadow_tree;
pub mod split;
pub mod tree;
