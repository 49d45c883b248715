mod component;
mod handle;
mod render;
pub mod scale;
mod state;
mod types;

pub use component::GraphCanvas;
pub use handle::{GraphError, GraphHandle};
pub use types::GraphElements;
