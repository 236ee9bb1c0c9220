//! Tidy tree placement (Reingold–Tilford with Buchheim's linear-time refinements).
//!
//! Coordinates come out in "size space": `x` spans `[0, breadth]` with the outermost nodes half a
//! separation inside the range, and `y = depth * extent / max_depth`. For a radial layout the
//! breadth is the angular budget in degrees and the extent is the outer radius.

use wordtree_core::{NodeIndex, Tree};

static ROOT_SLOT: [NodeIndex; 1] = [Tree::ROOT];

/// Separation between two adjacent nodes on the same level: siblings sit one unit apart, cousins
/// two, and both shrink with depth so outer rings (which have more circumference) pack tighter.
pub fn separation(tree: &Tree, a: NodeIndex, b: NodeIndex) -> f64 {
    let a_node = tree.node(a);
    let same_parent = a_node.parent == tree.node(b).parent;
    let base = if same_parent { 1.0 } else { 2.0 };
    base / a_node.depth.max(1) as f64
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TidyPosition {
    pub x: f64,
    pub y: f64,
}

struct Walker<'a> {
    tree: &'a Tree,
    /// Index of the synthetic parent above the root.
    sentinel: usize,
    parent: Vec<usize>,
    sibling_index: Vec<usize>,
    prelim: Vec<f64>,
    modifier: Vec<f64>,
    change: Vec<f64>,
    shift: Vec<f64>,
    thread: Vec<Option<usize>>,
    ancestor: Vec<usize>,
    default_ancestor: Vec<Option<usize>>,
}

impl<'a> Walker<'a> {
    fn new(tree: &'a Tree) -> Self {
        let n = tree.len();
        let sentinel = n;
        let mut parent = vec![sentinel; n + 1];
        let mut sibling_index = vec![0usize; n + 1];
        for (idx, node) in tree.nodes().iter().enumerate() {
            for (i, &child) in node.children.iter().enumerate() {
                parent[child] = idx;
                sibling_index[child] = i;
            }
        }
        Self {
            tree,
            sentinel,
            parent,
            sibling_index,
            prelim: vec![0.0; n + 1],
            modifier: vec![0.0; n + 1],
            change: vec![0.0; n + 1],
            shift: vec![0.0; n + 1],
            thread: vec![None; n + 1],
            ancestor: (0..=n).collect(),
            default_ancestor: vec![None; n + 1],
        }
    }

    fn children(&self, v: usize) -> &'a [NodeIndex] {
        if v == self.sentinel {
            &ROOT_SLOT
        } else {
            &self.tree.node(v).children
        }
    }

    fn next_left(&self, v: usize) -> Option<usize> {
        self.children(v).first().copied().or(self.thread[v])
    }

    fn next_right(&self, v: usize) -> Option<usize> {
        self.children(v).last().copied().or(self.thread[v])
    }

    fn next_ancestor(&self, vim: usize, v: usize, ancestor: usize) -> usize {
        let a = self.ancestor[vim];
        if self.parent[a] == self.parent[v] {
            a
        } else {
            ancestor
        }
    }

    fn move_subtree(&mut self, wm: usize, wp: usize, shift: f64) {
        let change = shift / (self.sibling_index[wp] - self.sibling_index[wm]) as f64;
        self.change[wp] -= change;
        self.shift[wp] += shift;
        self.change[wm] += change;
        self.prelim[wp] += shift;
        self.modifier[wp] += shift;
    }

    fn execute_shifts(&mut self, v: usize) {
        let mut shift = 0.0;
        let mut change = 0.0;
        for &w in self.children(v).iter().rev() {
            self.prelim[w] += shift;
            self.modifier[w] += shift;
            change += self.change[w];
            shift += self.shift[w] + change;
        }
    }

    fn first_walk(&mut self, v: usize) {
        let siblings = self.children(self.parent[v]);
        let i = self.sibling_index[v];
        let w = (i > 0).then(|| siblings[i - 1]);

        let children = self.children(v);
        if let (Some(&first), Some(&last)) = (children.first(), children.last()) {
            self.execute_shifts(v);
            let midpoint = (self.prelim[first] + self.prelim[last]) / 2.0;
            match w {
                Some(w) => {
                    self.prelim[v] = self.prelim[w] + separation(self.tree, v, w);
                    self.modifier[v] = self.prelim[v] - midpoint;
                }
                None => self.prelim[v] = midpoint,
            }
        } else if let Some(w) = w {
            self.prelim[v] = self.prelim[w] + separation(self.tree, v, w);
        }

        let p = self.parent[v];
        let ancestor = self.default_ancestor[p].unwrap_or(siblings[0]);
        self.default_ancestor[p] = Some(self.apportion(v, w, ancestor));
    }

    fn apportion(&mut self, v: usize, w: Option<usize>, mut ancestor: usize) -> usize {
        let Some(w) = w else {
            return ancestor;
        };

        let mut vop = v;
        let mut vom = self.children(self.parent[v])[0];
        let mut sip = self.modifier[v];
        let mut sop = self.modifier[v];
        let mut sim = self.modifier[w];
        let mut som = self.modifier[vom];

        let mut next_im = self.next_right(w);
        let mut next_ip = self.next_left(v);
        while let (Some(vim), Some(vip)) = (next_im, next_ip) {
            vom = self.next_left(vom).unwrap_or(vom);
            vop = self.next_right(vop).unwrap_or(vop);
            self.ancestor[vop] = v;

            let shift = self.prelim[vim] + sim - self.prelim[vip] - sip
                + separation(self.tree, vim, vip);
            if shift > 0.0 {
                let wm = self.next_ancestor(vim, v, ancestor);
                self.move_subtree(wm, v, shift);
                sip += shift;
                sop += shift;
            }

            sim += self.modifier[vim];
            sip += self.modifier[vip];
            som += self.modifier[vom];
            sop += self.modifier[vop];

            next_im = self.next_right(vim);
            next_ip = self.next_left(vip);
        }

        if let Some(vim) = next_im {
            if self.next_right(vop).is_none() {
                self.thread[vop] = Some(vim);
                self.modifier[vop] += sim - sop;
            }
        }
        if let Some(vip) = next_ip {
            if self.next_left(vom).is_none() {
                self.thread[vom] = Some(vip);
                self.modifier[vom] += sip - som;
                ancestor = v;
            }
        }
        ancestor
    }

    /// Accumulates modifiers top-down; nodes are stored in pre-order so one forward pass works.
    fn second_walk(&mut self) -> Vec<f64> {
        let n = self.tree.len();
        let mut x = vec![0.0; n];
        for (v, slot) in x.iter_mut().enumerate() {
            let pm = self.modifier[self.parent[v]];
            *slot = self.prelim[v] + pm;
            self.modifier[v] += pm;
        }
        x
    }
}

/// Places every node of `tree`; the result is indexed like `tree.nodes()`.
pub fn tidy_tree(tree: &Tree, breadth: f64, extent: f64) -> Vec<TidyPosition> {
    if tree.is_empty() {
        return Vec::new();
    }

    let mut walker = Walker::new(tree);
    for v in tree.post_order() {
        walker.first_walk(v);
    }
    walker.modifier[walker.sentinel] = -walker.prelim[Tree::ROOT];
    let raw = walker.second_walk();

    let mut left = Tree::ROOT;
    let mut right = Tree::ROOT;
    for (v, &xv) in raw.iter().enumerate() {
        if xv < raw[left] {
            left = v;
        }
        if xv > raw[right] {
            right = v;
        }
    }

    let s = if left == right {
        1.0
    } else {
        separation(tree, left, right) / 2.0
    };
    let tx = s - raw[left];
    let kx = breadth / (raw[right] + s + tx);
    let ky = extent / tree.max_depth().max(1) as f64;

    raw.iter()
        .zip(tree.nodes())
        .map(|(&xv, node)| TidyPosition {
            x: (xv + tx) * kx,
            y: node.depth as f64 * ky,
        })
        .collect()
}
