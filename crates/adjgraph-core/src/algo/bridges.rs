//! Bridges and articulation points of undirected graphs.
//!
//! One low-link depth-first search serves both questions. For every vertex
//! it records `disc` (discovery time) and `low` (the smallest discovery time
//! reachable through the DFS subtree plus one non-tree edge). After a tree
//! edge `v → to` is fully explored:
//!
//! - `low[to] > disc[v]` makes `{v, to}` a bridge;
//! - `low[to] >= disc[v]` makes a non-root `v` an articulation point.
//!
//! A DFS root is an articulation point when it has at least two DFS
//! children.
//!
//! Only the first connection back to the DFS parent is treated as the tree
//! edge. A second, parallel connection to the parent is a back edge, so a
//! doubled edge is never reported as a bridge.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::graph::{Graph, UndirectedGraph, out_connections};
use crate::model::VertexId;

impl<T> UndirectedGraph<T> {
    /// Bridges in detection order, as `(parent, child)` tree edges.
    #[must_use]
    pub fn bridges_iterative(&self) -> Vec<(VertexId, VertexId)> {
        self.low_link(LowLink::run_iterative).bridges
    }

    /// Recursive form of [`Self::bridges_iterative`]; same output.
    #[must_use]
    pub fn bridges_recursive(&self) -> Vec<(VertexId, VertexId)> {
        self.low_link(LowLink::run_recursive).bridges
    }

    /// Cut vertices in detection order, each reported once.
    #[must_use]
    pub fn articulation_points(&self) -> Vec<VertexId> {
        self.low_link(LowLink::run_iterative).cut_vertices
    }

    #[must_use]
    pub fn articulation_points_recursive(&self) -> Vec<VertexId> {
        self.low_link(LowLink::run_recursive).cut_vertices
    }

    fn low_link<F>(&self, mut run: F) -> LowLink
    where
        F: FnMut(&mut LowLink, &Self, VertexId),
    {
        let mut search = LowLink::default();
        for &root in self.vertices().keys() {
            if !search.disc.contains_key(&root) {
                run(&mut search, self, root);
            }
        }
        debug!(
            bridges = search.bridges.len(),
            articulation_points = search.cut_vertices.len(),
            "low-link search finished"
        );
        search
    }
}

#[derive(Debug, Default)]
struct LowLink {
    disc: HashMap<VertexId, usize>,
    low: HashMap<VertexId, usize>,
    time: usize,
    bridges: Vec<(VertexId, VertexId)>,
    cut_vertices: Vec<VertexId>,
    seen_cut: HashSet<VertexId>,
}

struct Frame {
    v: VertexId,
    parent: Option<VertexId>,
    next: usize,
    skipped_parent: bool,
    children: usize,
}

impl Frame {
    const fn new(v: VertexId, parent: Option<VertexId>) -> Self {
        Self {
            v,
            parent,
            next: 0,
            skipped_parent: false,
            children: 0,
        }
    }

    /// `true` the first time the tree edge back to the parent shows up.
    fn skips(&mut self, to: VertexId) -> bool {
        if !self.skipped_parent && self.parent == Some(to) {
            self.skipped_parent = true;
            return true;
        }
        false
    }
}

impl LowLink {
    fn discover(&mut self, v: VertexId) {
        self.disc.insert(v, self.time);
        self.low.insert(v, self.time);
        self.time += 1;
    }

    fn lower(&mut self, v: VertexId, candidate: usize) {
        if let Some(low) = self.low.get_mut(&v) {
            *low = (*low).min(candidate);
        }
    }

    fn mark_cut(&mut self, v: VertexId) {
        if self.seen_cut.insert(v) {
            self.cut_vertices.push(v);
        }
    }

    /// Fold a finished child `to` back into `v`.
    fn child_done(&mut self, v: VertexId, to: VertexId, v_is_root: bool) {
        let child_low = self.low.get(&to).copied().unwrap_or(usize::MAX);
        let disc_v = self.disc.get(&v).copied().unwrap_or(0);
        self.lower(v, child_low);

        if child_low > disc_v {
            self.bridges.push((v, to));
        }
        if !v_is_root && child_low >= disc_v {
            self.mark_cut(v);
        }
    }

    /// Apply a back edge `v → to`; `true` if `to` is new and needs a visit.
    fn examine(&mut self, v: VertexId, to: VertexId) -> bool {
        match self.disc.get(&to) {
            Some(&disc_to) => {
                self.lower(v, disc_to);
                false
            }
            None => true,
        }
    }

    fn finish(&mut self, frame: &Frame) {
        if frame.parent.is_none() && frame.children >= 2 {
            self.mark_cut(frame.v);
        }
    }

    fn run_iterative<T>(&mut self, graph: &UndirectedGraph<T>, root: VertexId) {
        self.discover(root);
        let mut frames = vec![Frame::new(root, None)];

        while let Some(frame) = frames.last_mut() {
            let v = frame.v;
            let Some(c) = out_connections(graph, v).get(frame.next) else {
                let Some(done) = frames.pop() else { break };
                self.finish(&done);
                if let Some(parent) = frames.last() {
                    self.child_done(parent.v, done.v, parent.parent.is_none());
                }
                continue;
            };
            frame.next += 1;

            if frame.skips(c.to) {
                continue;
            }
            if self.examine(v, c.to) {
                frame.children += 1;
                self.discover(c.to);
                frames.push(Frame::new(c.to, Some(v)));
            }
        }
    }

    fn run_recursive<T>(&mut self, graph: &UndirectedGraph<T>, root: VertexId) {
        self.discover(root);
        self.visit(graph, Frame::new(root, None));
    }

    fn visit<T>(&mut self, graph: &UndirectedGraph<T>, mut frame: Frame) {
        let v = frame.v;
        for c in out_connections(graph, v) {
            if frame.skips(c.to) {
                continue;
            }
            if self.examine(v, c.to) {
                frame.children += 1;
                self.discover(c.to);
                self.visit(graph, Frame::new(c.to, Some(v)));
                self.child_done(v, c.to, frame.parent.is_none());
            }
        }
        self.finish(&frame);
    }
}
