pub mod common;
pub mod community;

pub use common::{GraphView, NodeId};
pub use community::{louvain, LouvainResult};
