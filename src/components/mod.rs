pub mod engine_status;
pub mod force_graph;
pub mod forms;
