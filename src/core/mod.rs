//! Core scanning pipeline: archive traversal, classification, line counting,
//! tree building, graph assembly and the orchestrating [`Scanner`].

pub mod archive;
pub mod classifier;
pub mod graph_assembler;
pub mod line_counter;
pub mod parallel;
pub mod scanner;
pub mod tree_builder;

#[cfg(test)]
pub(crate) mod test_support;

pub use archive::{ArchiveEntry, ArchiveWalker};
pub use graph_assembler::GraphAssembler;
pub use parallel::ProgressUpdate;
pub use scanner::{ProgressCallback, Scanner};
pub use tree_builder::TreeBuilder;
