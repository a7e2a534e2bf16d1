use glam::{Mat4, Vec3};
use rustc_hash::FxHashMap;

use super::node::{Mesh, SceneNode};
use crate::geometry::{Aabb, Bounds, Ray};

/// Stable handle to a node inside a [`ModelGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Arena index of this node.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A flattened scene-graph node with its world transform resolved.
#[derive(Debug, Clone)]
pub struct GraphNode {
    /// Display name carried over from the decoded scene.
    pub name: String,
    /// Parent node, `None` for the root.
    pub parent: Option<NodeId>,
    /// Direct children in document order.
    pub children: Vec<NodeId>,
    /// Local-to-world transform.
    pub world: Mat4,
    /// Local-space geometry, if this node is renderable.
    pub mesh: Option<Mesh>,
    /// Mesh vertices transformed to world space (empty without a mesh).
    world_positions: Vec<Vec3>,
}

/// Nearest ray hit against a [`ModelGraph`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Mesh node that was hit.
    pub node: NodeId,
    /// Distance along the ray.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3,
}

/// Arena form of a decoded scene, kept by the viewer while the model is
/// active. The root is always [`ModelGraph::root`].
#[derive(Debug, Clone)]
pub struct ModelGraph {
    nodes: Vec<GraphNode>,
    /// World-space bounds of every node that owns a non-empty mesh.
    mesh_bounds: FxHashMap<NodeId, Aabb>,
}

impl ModelGraph {
    /// Flatten a decoded scene, resolving world transforms top-down.
    #[must_use]
    pub fn from_scene(root: SceneNode) -> Self {
        let mut nodes: Vec<GraphNode> = Vec::with_capacity(1 + root.descendant_count());
        let mut mesh_bounds = FxHashMap::default();

        // (node, parent, parent world transform)
        let mut stack = vec![(root, None::<NodeId>, Mat4::IDENTITY)];
        while let Some((scene_node, parent, parent_world)) = stack.pop() {
            let id = NodeId(nodes.len() as u32);
            let world = parent_world * scene_node.transform;

            let world_positions: Vec<Vec3> = scene_node
                .mesh
                .as_ref()
                .map(|m| m.positions.iter().map(|p| world.transform_point3(*p)).collect())
                .unwrap_or_default();
            if !world_positions.is_empty() {
                let _ = mesh_bounds.insert(id, Aabb::from_points(world_positions.iter().copied()));
            }

            if let Some(parent) = parent {
                nodes[parent.index()].children.push(id);
            }

            // Reverse so children pop in document order.
            for child in scene_node.children.into_iter().rev() {
                stack.push((child, Some(id), world));
            }

            nodes.push(GraphNode {
                name: scene_node.name,
                parent,
                children: Vec::new(),
                world,
                mesh: scene_node.mesh,
                world_positions,
            });
        }

        Self { nodes, mesh_bounds }
    }

    /// Handle of the root node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Total node count, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a graph holds at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(id.index())
    }

    /// First node whose name equals `name`, in document order.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.name == name)
            .map(|i| NodeId(i as u32))
    }

    /// `id` and every node below it, in document order.
    #[must_use]
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            let Some(node) = self.node(next) else {
                continue;
            };
            out.push(next);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// Nodes that carry a non-empty mesh.
    pub fn mesh_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len())
            .map(|i| NodeId(i as u32))
            .filter(|id| self.mesh_bounds.contains_key(id))
    }

    /// World-space bounds of the mesh owned directly by `id`.
    #[must_use]
    pub fn mesh_aabb(&self, id: NodeId) -> Option<Aabb> {
        self.mesh_bounds.get(&id).copied()
    }

    /// World-space bounds of `id` and all of its descendants. A subtree
    /// without geometry collapses to a zero-size bound at the node's world
    /// origin.
    #[must_use]
    pub fn subtree_bounds(&self, id: NodeId) -> Bounds {
        let aabb = self.subtree_aabb(id);
        let origin = self
            .node(id)
            .map_or(Vec3::ZERO, |n| n.world.transform_point3(Vec3::ZERO));
        Bounds::from_aabb(&aabb, origin)
    }

    /// Raw union of the mesh bounds under `id` (may be empty).
    #[must_use]
    pub fn subtree_aabb(&self, id: NodeId) -> Aabb {
        self.subtree(id)
            .into_iter()
            .filter_map(|n| self.mesh_aabb(n))
            .fold(Aabb::EMPTY, Aabb::union)
    }

    /// Intersect `ray` with every mesh node and return the closest hit.
    ///
    /// Each node is rejected cheaply by its world bounds before its
    /// triangles are tested.
    #[must_use]
    pub fn raycast(&self, ray: &Ray) -> Option<RayHit> {
        self.mesh_nodes()
            .filter(|id| {
                self.mesh_aabb(*id)
                    .is_some_and(|aabb| ray.intersect_aabb(&aabb).is_some())
            })
            .filter_map(|id| {
                let distance = self.nearest_triangle_hit(id, ray)?;
                Some(RayHit {
                    node: id,
                    distance,
                    point: ray.at(distance),
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    fn nearest_triangle_hit(&self, id: NodeId, ray: &Ray) -> Option<f32> {
        let node = self.node(id)?;
        let mesh = node.mesh.as_ref()?;
        (0..mesh.triangles.len())
            .filter_map(|i| mesh.triangle(i, &node.world_positions))
            .filter_map(|tri| ray.intersect_triangle(tri))
            .min_by(f32::total_cmp)
    }
}
