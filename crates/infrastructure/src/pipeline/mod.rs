pub mod unordered;

pub use unordered::UnorderedPipeline;
