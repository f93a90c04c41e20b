use glam::DVec3;

use crate::BaseIcosahedron;

/// Index of a node within a [`NodeArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One triangular patch of the subdivided sphere.
///
/// Corners are unit-sphere directions in planet-local space; scaling by the
/// planet radius and height displacement happen downstream. Children and
/// parent are arena indices, never owning references, so the tree is free of
/// cycles and drops in one deallocation.
#[derive(Clone, Debug)]
pub struct PatchNode {
    pub a: DVec3,
    pub b: DVec3,
    pub c: DVec3,
    pub level: u8,
    pub parent: Option<NodeId>,
    pub children: Option<[NodeId; 4]>,
}

impl PatchNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn corners(&self) -> [DVec3; 3] {
        [self.a, self.b, self.c]
    }
}

/// Flat arena holding one traversal pass's subdivision tree.
///
/// Roots are the 20 base icosahedron faces; `split` appends four children per
/// call. A pass builds the arena top-down and discards it whole afterwards.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    nodes: Vec<PatchNode>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Seeds the arena with the 20 base faces as level-0 roots and returns
    /// their ids. The arena is cleared first.
    pub fn seed_base(&mut self, base: &BaseIcosahedron) -> [NodeId; BaseIcosahedron::FACE_COUNT] {
        self.nodes.clear();
        std::array::from_fn(|face| {
            let [a, b, c] = base.face_corners(face);
            self.push(PatchNode {
                a,
                b,
                c,
                level: 0,
                parent: None,
                children: None,
            })
        })
    }

    /// Splits the node into four children: the three edge midpoints are
    /// re-normalized onto the unit sphere and combined with the original
    /// corners so the children exactly partition the parent triangle.
    /// Returns the existing children if the node is already split.
    pub fn split(&mut self, id: NodeId) -> [NodeId; 4] {
        if let Some(children) = self.nodes[id.index()].children {
            return children;
        }

        let (a, b, c, level) = {
            let node = &self.nodes[id.index()];
            (node.a, node.b, node.c, node.level)
        };

        let mid_a = (b + (c - b) * 0.5).normalize();
        let mid_b = (c + (a - c) * 0.5).normalize();
        let mid_c = (a + (b - a) * 0.5).normalize();

        let child_level = level + 1;
        let corners = [
            [mid_c, mid_b, a],
            [b, mid_a, mid_c],
            [mid_b, mid_a, c],
            [mid_a, mid_b, mid_c],
        ];

        let children = corners.map(|[ca, cb, cc]| {
            self.push(PatchNode {
                a: ca,
                b: cb,
                c: cc,
                level: child_level,
                parent: Some(id),
                children: None,
            })
        });

        self.nodes[id.index()].children = Some(children);
        children
    }

    pub fn node(&self, id: NodeId) -> &PatchNode {
        &self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: PatchNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }
}
