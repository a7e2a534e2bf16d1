use glam::Vec3;

use crate::geometry::Aabb;
use crate::scene::{ModelGraph, NodeId};

/// Box outline drawn around the focused sub-object.
///
/// Lives outside the model graph, so it is never pickable and is dropped
/// independently of the model.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionHighlight {
    /// Focused node of the active model.
    pub node: NodeId,
    /// World-space box the outline traces.
    pub aabb: Aabb,
    /// Linear RGB outline color.
    pub color: [f32; 3],
}

/// Corner index pairs of the 12 box edges, matching [`Aabb::corners`].
const EDGES: [(usize, usize); 12] = [
    (0, 1),
    (2, 3),
    (4, 5),
    (6, 7),
    (0, 2),
    (1, 3),
    (4, 6),
    (5, 7),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

impl SelectionHighlight {
    /// Outline the subtree rooted at `node`.
    #[must_use]
    pub fn for_node(graph: &ModelGraph, node: NodeId, color: [f32; 3]) -> Self {
        let aabb = graph.subtree_aabb(node);
        Self { node, aabb, color }
    }

    /// Line segments of the outline. An empty box yields twelve
    /// zero-length segments at the origin.
    #[must_use]
    pub fn edges(&self) -> [(Vec3, Vec3); 12] {
        let corners = if self.aabb.is_empty() {
            [Vec3::ZERO; 8]
        } else {
            self.aabb.corners()
        };
        EDGES.map(|(a, b)| (corners[a], corners[b]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Mesh, SceneNode};

    #[test]
    fn edges_have_box_side_lengths() {
        let scene = SceneNode::with_mesh(
            "box",
            Mesh::cuboid(Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0)),
        );
        let graph = ModelGraph::from_scene(scene);
        let highlight =
            SelectionHighlight::for_node(&graph, graph.root(), [1.0, 0.0, 0.0]);

        let mut lengths: Vec<f32> = highlight
            .edges()
            .iter()
            .map(|(a, b)| a.distance(*b))
            .collect();
        lengths.sort_by(f32::total_cmp);
        assert!(lengths[..4].iter().all(|l| (l - 2.0).abs() < 1e-5));
        assert!(lengths[4..8].iter().all(|l| (l - 4.0).abs() < 1e-5));
        assert!(lengths[8..].iter().all(|l| (l - 6.0).abs() < 1e-5));
    }

    #[test]
    fn empty_node_outline_is_zero_length_at_origin() {
        let graph = ModelGraph::from_scene(SceneNode::group("empty"));
        let highlight =
            SelectionHighlight::for_node(&graph, graph.root(), [1.0, 0.0, 0.0]);
        assert!(highlight
            .edges()
            .iter()
            .all(|&(a, b)| a == Vec3::ZERO && b == Vec3::ZERO));
    }
}
