use glam::{Mat4, Vec3};

// ---------------------------------------------------------------------------
// Mesh
// ---------------------------------------------------------------------------

/// Indexed triangle mesh in node-local space.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Triangles as indices into `positions`.
    pub triangles: Vec<[u32; 3]>,
}

impl Mesh {
    /// Create a mesh from raw positions and triangle indices.
    #[must_use]
    pub fn new(positions: Vec<Vec3>, triangles: Vec<[u32; 3]>) -> Self {
        Self {
            positions,
            triangles,
        }
    }

    /// Axis-aligned box spanning `center ± half_extents`, twelve triangles
    /// wound counter-clockwise when seen from outside.
    #[must_use]
    pub fn cuboid(center: Vec3, half_extents: Vec3) -> Self {
        let h = half_extents;
        let positions = [
            Vec3::new(-h.x, -h.y, -h.z),
            Vec3::new(h.x, -h.y, -h.z),
            Vec3::new(h.x, h.y, -h.z),
            Vec3::new(-h.x, h.y, -h.z),
            Vec3::new(-h.x, -h.y, h.z),
            Vec3::new(h.x, -h.y, h.z),
            Vec3::new(h.x, h.y, h.z),
            Vec3::new(-h.x, h.y, h.z),
        ]
        .iter()
        .map(|p| *p + center)
        .collect();

        let triangles = vec![
            // -Z
            [0, 2, 1],
            [0, 3, 2],
            // +Z
            [4, 5, 6],
            [4, 6, 7],
            // -X
            [0, 4, 7],
            [0, 7, 3],
            // +X
            [1, 2, 6],
            [1, 6, 5],
            // -Y
            [0, 1, 5],
            [0, 5, 4],
            // +Y
            [3, 7, 6],
            [3, 6, 2],
        ];

        Self {
            positions,
            triangles,
        }
    }

    /// Whether the mesh has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Resolve triangle `index` against `positions`, either this mesh's own
    /// vertices or a transformed copy of them. Returns `None` when the
    /// triangle or any of its vertex indices is out of range.
    #[must_use]
    pub fn triangle(&self, index: usize, positions: &[Vec3]) -> Option<[Vec3; 3]> {
        let [a, b, c] = *self.triangles.get(index)?;
        Some([
            *positions.get(a as usize)?,
            *positions.get(b as usize)?,
            *positions.get(c as usize)?,
        ])
    }
}

// ---------------------------------------------------------------------------
// SceneNode
// ---------------------------------------------------------------------------

/// A node of a decoded scene graph, as produced by a
/// [`MeshProvider`](crate::viewer::MeshProvider).
///
/// Transforms are local (relative to the parent). Nodes without a mesh are
/// plain grouping nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    /// Display name of the node (may be empty).
    pub name: String,
    /// Local transform relative to the parent node.
    pub transform: Mat4,
    /// Renderable geometry attached to this node.
    pub mesh: Option<Mesh>,
    /// Child nodes in document order.
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    /// Empty grouping node with an identity transform.
    #[must_use]
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Mat4::IDENTITY,
            mesh: None,
            children: Vec::new(),
        }
    }

    /// Leaf node carrying `mesh`.
    #[must_use]
    pub fn with_mesh(name: impl Into<String>, mesh: Mesh) -> Self {
        Self {
            mesh: Some(mesh),
            ..Self::group(name)
        }
    }

    /// Replace the local transform.
    #[must_use]
    pub fn with_transform(mut self, transform: Mat4) -> Self {
        self.transform = transform;
        self
    }

    /// Append a child and return `self` for chaining.
    #[must_use]
    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    /// Append a child in place.
    pub fn add_child(&mut self, child: SceneNode) {
        self.children.push(child);
    }

    /// Number of nodes below this one (not counting itself).
    #[must_use]
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|c| 1 + c.descendant_count())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cuboid_has_closed_box_topology() {
        let mesh = Mesh::cuboid(Vec3::ZERO, Vec3::ONE);
        assert_eq!(mesh.positions.len(), 8);
        assert_eq!(mesh.triangles.len(), 12);
        for i in 0..mesh.triangles.len() {
            assert!(mesh.triangle(i, &mesh.positions).is_some());
        }
    }

    #[test]
    fn triangle_out_of_range_is_none() {
        let mesh = Mesh::new(vec![Vec3::ZERO, Vec3::X], vec![[0, 1, 2]]);
        assert!(mesh.triangle(0, &mesh.positions).is_none());
        assert!(mesh.triangle(5, &mesh.positions).is_none());
    }

    #[test]
    fn descendant_count_walks_nested_children() {
        let root = SceneNode::group("root")
            .with_child(SceneNode::group("a").with_child(SceneNode::group("a1")))
            .with_child(SceneNode::group("b"));
        assert_eq!(root.descendant_count(), 3);
        assert_eq!(SceneNode::group("leaf").descendant_count(), 0);
    }
}
