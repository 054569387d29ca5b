pub mod constituent_service;
pub mod resampler;
pub mod returns;
pub mod summary;
pub mod weighted_average;
