pub mod extractor;
pub mod pipeline;
pub mod runner;
pub mod writer;
