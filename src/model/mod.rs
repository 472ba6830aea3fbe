//! 数据层：叶子模型、展平、重建、运行报告

pub mod data_core;
pub mod flatten;
pub mod leaf;
pub mod performance;
pub mod reconstruct;
