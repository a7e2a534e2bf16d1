//! Scene graphs: the decoded node tree handed over by a mesh provider and
//! the flattened, world-space arena the viewer keeps for its active model.

mod graph;
mod node;

pub use graph::{GraphNode, ModelGraph, NodeId, RayHit};
pub use node::{Mesh, SceneNode};
