//! Arena-backed quadtree of square spatial regions.
//!
//! Nodes live in a flat arena and refer to each other by [`NodeId`] index;
//! collapsed nodes return to a free list for reuse. A node holds either four
//! children or at most one tile handle, never both.

use glam::Vec3;

use crate::pool::TileId;

/// Stable handle to a node in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) position: Vec3,
    pub(crate) size: u32,
    pub(crate) depth: u8,
    pub(crate) children: Option<[NodeId; 4]>,
    pub(crate) tile: Option<TileId>,
}

impl Node {
    /// Influence test: the target is inside when both horizontal axes are
    /// within one node size of the center. The boundary itself counts as
    /// inside, so a target sitting exactly on a cell edge behaves like one
    /// approaching from within.
    pub(crate) fn contains(&self, target: Vec3) -> bool {
        let size = self.size as f32;
        (target.x - self.position.x).abs() <= size && (target.z - self.position.z).abs() <= size
    }
}

/// The quadtree arena.
#[derive(Debug)]
pub struct QuadTree {
    nodes: Vec<Node>,
    free: Vec<NodeId>,
    root: NodeId,
}

impl QuadTree {
    /// A tree with a single root leaf covering `size` world units around
    /// `position`, allowed to subdivide `max_depth` times.
    pub fn new(position: Vec3, size: u32, max_depth: u8) -> Self {
        Self {
            nodes: vec![Node {
                position,
                size,
                depth: max_depth,
                children: None,
                tile: None,
            }],
            free: Vec::new(),
            root: NodeId(0),
        }
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0 as usize]
    }

    /// Center position of a node.
    pub fn position(&self, id: NodeId) -> Vec3 {
        self.node(id).position
    }

    /// Side length of a node's region.
    pub fn size(&self, id: NodeId) -> u32 {
        self.node(id).size
    }

    /// Remaining subdivision depth of a node.
    pub fn depth(&self, id: NodeId) -> u8 {
        self.node(id).depth
    }

    /// Children of a node, if subdivided.
    pub fn children(&self, id: NodeId) -> Option<[NodeId; 4]> {
        self.node(id).children
    }

    /// Tile handle held by a node, if any.
    pub fn tile(&self, id: NodeId) -> Option<TileId> {
        self.node(id).tile
    }

    /// Split a leaf into four children at half size, offset diagonally by a
    /// quarter of the parent size.
    ///
    /// # Panics
    ///
    /// Panics if the node already has children or cannot subdivide further;
    /// the walk only subdivides leaves with positive depth.
    pub(crate) fn subdivide(&mut self, id: NodeId) -> [NodeId; 4] {
        let parent = self.node(id);
        assert!(parent.children.is_none(), "subdividing a branch node");
        assert!(parent.depth > 0, "subdividing at max depth");

        let (position, size, depth) = (parent.position, parent.size, parent.depth);
        let quarter = size as f32 / 4.0;

        let mut children = [NodeId(0); 4];
        let mut slot = 0;
        for i in [-1.0_f32, 1.0] {
            for j in [-1.0_f32, 1.0] {
                let child = Node {
                    position: Vec3::new(
                        position.x + i * quarter,
                        position.y,
                        position.z + j * quarter,
                    ),
                    size: size / 2,
                    depth: depth - 1,
                    children: None,
                    tile: None,
                };
                children[slot] = self.alloc(child);
                slot += 1;
            }
        }

        self.node_mut(id).children = Some(children);
        children
    }

    /// Detach and free a node's children, returning every tile handle held
    /// by the subtree.
    pub(crate) fn collapse(&mut self, id: NodeId, released: &mut Vec<TileId>) {
        let Some(children) = self.node_mut(id).children.take() else {
            return;
        };
        for child in children {
            self.collapse(child, released);
            if let Some(tile) = self.node_mut(child).tile.take() {
                released.push(tile);
            }
            self.free.push(child);
        }
    }

    /// Number of live (non-freed) nodes.
    pub fn live_nodes(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    /// Collect every leaf reachable from the root.
    pub fn leaves(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            match self.node(id).children {
                Some(children) => stack.extend(children),
                None => out.push(id),
            }
        }
        out
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        if let Some(id) = self.free.pop() {
            self.nodes[id.0 as usize] = node;
            id
        } else {
            let id = NodeId(self.nodes.len() as u32);
            self.nodes.push(node);
            id
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tree_is_a_single_root_leaf() {
        let tree = QuadTree::new(Vec3::ZERO, 256, 4);
        assert_eq!(tree.leaves(), vec![tree.root()]);
        assert_eq!(tree.size(tree.root()), 256);
        assert_eq!(tree.depth(tree.root()), 4);
    }

    #[test]
    fn test_subdivide_offsets_children_diagonally() {
        let mut tree = QuadTree::new(Vec3::ZERO, 256, 4);
        let root = tree.root();
        let children = tree.subdivide(root);

        let mut positions: Vec<(f32, f32)> = children
            .iter()
            .map(|&c| (tree.position(c).x, tree.position(c).z))
            .collect();
        positions.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(
            positions,
            vec![(-64.0, -64.0), (-64.0, 64.0), (64.0, -64.0), (64.0, 64.0)]
        );
        for &child in &children {
            assert_eq!(tree.size(child), 128);
            assert_eq!(tree.depth(child), 3);
        }
    }

    #[test]
    fn test_collapse_returns_subtree_tiles_and_frees_nodes() {
        let mut tree = QuadTree::new(Vec3::ZERO, 256, 4);
        let root = tree.root();
        let children = tree.subdivide(root);
        let grandchildren = tree.subdivide(children[0]);
        tree.node_mut(children[1]).tile = Some(TileId(7));
        tree.node_mut(grandchildren[2]).tile = Some(TileId(9));

        let before = tree.live_nodes();
        assert_eq!(before, 9);

        let mut released = Vec::new();
        tree.collapse(root, &mut released);
        released.sort_by_key(|t| t.index());
        assert_eq!(released, vec![TileId(7), TileId(9)]);
        assert_eq!(tree.live_nodes(), 1);
        assert_eq!(tree.leaves(), vec![root]);
    }

    #[test]
    fn test_freed_nodes_are_reused() {
        let mut tree = QuadTree::new(Vec3::ZERO, 256, 4);
        let root = tree.root();
        tree.subdivide(root);
        let mut released = Vec::new();
        tree.collapse(root, &mut released);

        let allocated_before = tree.nodes.len();
        tree.subdivide(root);
        assert_eq!(
            tree.nodes.len(),
            allocated_before,
            "resubdividing after a collapse must reuse freed arena slots"
        );
    }

    #[test]
    fn test_contains_is_boundary_inclusive() {
        let tree = QuadTree::new(Vec3::ZERO, 128, 2);
        let node = tree.node(tree.root());
        assert!(node.contains(Vec3::new(128.0, 0.0, 0.0)));
        assert!(node.contains(Vec3::new(-128.0, 0.0, 128.0)));
        assert!(!node.contains(Vec3::new(128.1, 0.0, 0.0)));
    }
}
