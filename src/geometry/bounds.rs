//! Axis-aligned bounding volumes and the center/size/extent summary used
//! for camera framing.

use glam::{Mat4, Vec3};

use crate::scene::SceneNode;

/// Axis-aligned bounding box. An empty box has `min > max` on every axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// The empty box; the identity for [`Aabb::union`].
    pub const EMPTY: Self = Self {
        min: Vec3::INFINITY,
        max: Vec3::NEG_INFINITY,
    };

    /// Box spanning two corners given in any order.
    #[must_use]
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Smallest box containing every point (empty for no points).
    #[must_use]
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        points.into_iter().fold(Self::EMPTY, |mut acc, p| {
            acc.extend(p);
            acc
        })
    }

    /// Whether the box contains no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }

    /// Grow the box to contain `point`.
    pub fn extend(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Smallest box containing both operands.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Midpoint, or the origin for an empty box.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            (self.min + self.max) * 0.5
        }
    }

    /// Edge lengths, zero for an empty box.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            self.max - self.min
        }
    }

    /// The eight corners, bit `i` of the index selecting max on axis `i`.
    #[must_use]
    pub fn corners(&self) -> [Vec3; 8] {
        std::array::from_fn(|i| {
            Vec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            )
        })
    }

    /// Bounds of this box after an affine transform.
    #[must_use]
    pub fn transformed(&self, transform: &Mat4) -> Self {
        if self.is_empty() {
            return *self;
        }
        Self::from_points(self.corners().map(|c| transform.transform_point3(c)))
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Framing summary of a bounding volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Box center in world space.
    pub center: Vec3,
    /// Edge lengths along x, y and z.
    pub size: Vec3,
    /// Largest of the three edge lengths; never negative.
    pub max_extent: f32,
}

impl Bounds {
    /// Zero-size bounds at `center`.
    #[must_use]
    pub fn degenerate(center: Vec3) -> Self {
        Self {
            center,
            size: Vec3::ZERO,
            max_extent: 0.0,
        }
    }

    /// Summarize `aabb`; an empty box becomes a degenerate bound at
    /// `fallback_center`.
    #[must_use]
    pub fn from_aabb(aabb: &Aabb, fallback_center: Vec3) -> Self {
        if aabb.is_empty() {
            return Self::degenerate(fallback_center);
        }
        let size = aabb.size();
        Self {
            center: aabb.center(),
            size,
            max_extent: size.max_element().max(0.0),
        }
    }
}

/// World-space bounds of `node` and all of its descendants.
///
/// `node.transform` is treated as its world transform. A subtree with no
/// geometry yields zero-size bounds at the node's origin.
#[must_use]
pub fn compute_bounds(node: &SceneNode) -> Bounds {
    let mut aabb = Aabb::EMPTY;
    accumulate(node, Mat4::IDENTITY, &mut aabb);
    Bounds::from_aabb(&aabb, node.transform.transform_point3(Vec3::ZERO))
}

fn accumulate(node: &SceneNode, parent_world: Mat4, aabb: &mut Aabb) {
    let world = parent_world * node.transform;
    if let Some(mesh) = &node.mesh {
        for p in &mesh.positions {
            aabb.extend(world.transform_point3(*p));
        }
    }
    for child in &node.children {
        accumulate(child, world, aabb);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Mesh;

    #[test]
    fn empty_node_has_zero_bounds() {
        let bounds = compute_bounds(&SceneNode::group("empty"));
        assert_eq!(bounds.size, Vec3::ZERO);
        assert_eq!(bounds.center, Vec3::ZERO);
        assert_eq!(bounds.max_extent, 0.0);
    }

    #[test]
    fn bounds_include_transformed_descendants() {
        let node = SceneNode::group("root").with_child(
            SceneNode::with_mesh("box", Mesh::cuboid(Vec3::ZERO, Vec3::ONE))
                .with_transform(Mat4::from_scale(Vec3::new(1.0, 2.0, 0.5))),
        );
        let bounds = compute_bounds(&node);
        assert_eq!(bounds.center, Vec3::ZERO);
        assert_eq!(bounds.size, Vec3::new(2.0, 4.0, 1.0));
        assert_eq!(bounds.max_extent, 4.0);
    }

    #[test]
    fn max_extent_is_never_negative() {
        let single_point = SceneNode::with_mesh(
            "point",
            Mesh::new(vec![Vec3::new(3.0, -1.0, 2.0)], Vec::new()),
        );
        let bounds = compute_bounds(&single_point);
        assert!(bounds.max_extent >= 0.0);
        assert_eq!(bounds.center, Vec3::new(3.0, -1.0, 2.0));
    }

    #[test]
    fn union_with_empty_is_identity() {
        let a = Aabb::new(Vec3::ONE, Vec3::NEG_ONE);
        assert_eq!(a.union(Aabb::EMPTY), a);
        assert!(Aabb::EMPTY.is_empty());
        assert_eq!(Aabb::EMPTY.size(), Vec3::ZERO);
    }

    #[test]
    fn rotated_box_bounds_grow() {
        let a = Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        let rotated = a.transformed(&Mat4::from_rotation_y(std::f32::consts::FRAC_PI_4));
        let expected = 2.0_f32.sqrt();
        assert!((rotated.max.x - expected).abs() < 1e-5);
        assert!((rotated.max.y - 1.0).abs() < 1e-5);
    }
}
