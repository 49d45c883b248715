pub(crate) mod display;
mod knowledge_graph;
mod qa;
mod summarize;

pub use knowledge_graph::KnowledgeGraphForm;
pub use qa::QaForm;
pub use summarize::SummarizeForm;
