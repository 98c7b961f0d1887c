//! The unvisited structure: super-distances over the shrinking forest of
//! unvisited components.
//!
//! A left-to-right DFS over the component tree assigns every leaf a
//! position in the split-findmin universe and every node the position of
//! the rightmost leaf of its subtree (`last_u`). Subtrees are thereby
//! contiguous ranges of the universe, so deleting an expanded root
//! decomposes into one `split` per child, and the minimum super-distance
//! of a component is the list cost at its `last_u` element.

use crate::component_tree::{ComponentTree, NIL};
use crate::split_findmin::{ElementId, SplitFindmin, INFINITE_COST};

#[derive(Debug)]
pub(crate) struct Unvisited {
    /// Vertex → position in the DFS order of the leaves.
    index_of_vertex: Vec<u32>,
    /// Split-findmin handle per DFS position.
    elements: Vec<ElementId>,
    sf: SplitFindmin,
}

impl Unvisited {
    /// Establishes the leaf ordering on the tree (filling in `last_u`) and
    /// builds a fresh split-findmin universe with all costs at infinity.
    pub(crate) fn new(n: usize, tree: &mut ComponentTree) -> Self {
        let mut index_of_vertex = vec![0u32; n];
        let root = tree.root;
        assign_positions(tree, root, 0, &mut index_of_vertex);

        let mut sf = SplitFindmin::new(n);
        let mut elements = Vec::with_capacity(n);
        for position in 0..n {
            elements.push(sf.add(position, INFINITE_COST));
        }
        sf.initialize();

        Self {
            index_of_vertex,
            elements,
            sf,
        }
    }

    /// Replaces the split-findmin instance wholesale for the next query.
    pub(crate) fn reinitialize(&mut self, n: usize) {
        let mut sf = SplitFindmin::new(n);
        self.elements.clear();
        for position in 0..n {
            self.elements.push(sf.add(position, INFINITE_COST));
        }
        sf.initialize();
        self.sf = sf;
    }

    /// Current super-distance of a vertex.
    pub(crate) fn d(&self, vertex: usize) -> i64 {
        self.sf
            .cost(self.elements[self.index_of_vertex[vertex] as usize])
    }

    /// Lowers the super-distance of a vertex.
    pub(crate) fn decrease_d(&mut self, vertex: usize, new_d: i64) {
        self.sf
            .decrease_cost(self.elements[self.index_of_vertex[vertex] as usize], new_d)
            .expect("super-distances are finite and non-negative");
    }

    /// Minimum super-distance over the unvisited leaves of the component,
    /// or -1 when all of them are still at infinity.
    pub(crate) fn min_d_minus(&self, tree: &ComponentTree, node: u32) -> i64 {
        let last = tree.nodes[node as usize].last_u;
        let cost = self.sf.list_cost(self.elements[last as usize]);
        if cost == INFINITE_COST {
            -1
        } else {
            cost
        }
    }

    /// Highest unvisited ancestor of a leaf: the root of the unvisited
    /// forest the leaf currently belongs to.
    pub(crate) fn unvisited_root_of(&self, tree: &ComponentTree, vertex: usize) -> u32 {
        let mut current = vertex as u32;
        loop {
            let parent = tree.nodes[current as usize].parent;
            debug_assert_ne!(parent, NIL, "walked past an unexpanded root");
            if tree.nodes[parent as usize].visited {
                return current;
            }
            current = parent;
        }
    }

    /// Deletes an expanded root from the unvisited forest: the subtree
    /// ranges of its children become independent split-findmin lists.
    pub(crate) fn delete_root(&mut self, tree: &ComponentTree, v: u32) {
        let children = &tree.nodes[v as usize].children;
        for &child in &children[..children.len().saturating_sub(1)] {
            let last = tree.nodes[child as usize].last_u;
            self.sf.split(self.elements[last as usize]);
        }
    }
}

/// Assigns DFS positions to the leaves below `node`, records `last_u` on
/// every node, and returns the next free position.
fn assign_positions(
    tree: &mut ComponentTree,
    node: u32,
    position: u32,
    index_of_vertex: &mut [u32],
) -> u32 {
    if tree.nodes[node as usize].is_leaf() {
        index_of_vertex[tree.nodes[node as usize].index as usize] = position;
        tree.nodes[node as usize].last_u = position;
        return position + 1;
    }
    let mut next = position;
    for k in 0..tree.nodes[node as usize].children.len() {
        let child = tree.nodes[node as usize].children[k];
        next = assign_positions(tree, child, next, index_of_vertex);
    }
    tree.nodes[node as usize].last_u = next - 1;
    next
}
