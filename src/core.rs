pub mod formulation;
pub mod generator;
pub mod grid;
pub mod histogram;
pub mod model;
pub mod package;
pub mod report;
pub mod sample;
pub mod sampler;
