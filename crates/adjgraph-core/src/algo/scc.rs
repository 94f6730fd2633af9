//! Strongly connected components.
//!
//! Directed graphs use Tarjan's algorithm. Each vertex records its
//! discovery index, its low-link and whether it is on the component stack.
//! When a vertex finishes with `low == index` it is the root of a component:
//! everything above it on the stack is popped and labelled with the current
//! component number, and the number advances.
//!
//! Components are numbered in the order they complete, which is reverse
//! topological order of the condensation.
//!
//! Undirected graphs have no direction to respect, so their components are
//! the connected components, labelled by BFS from each unlabelled vertex in
//! id order.

use std::collections::{HashMap, VecDeque};

use tracing::debug;

use crate::graph::{DirectedGraph, Graph, UndirectedGraph, out_connections};
use crate::model::{Components, VertexId};

impl<T> DirectedGraph<T> {
    /// Tarjan SCC labelling with an explicit frame stack.
    #[must_use]
    pub fn tarjan_scc_map(&self) -> Components {
        let mut tarjan = Tarjan::default();
        for &root in self.vertices().keys() {
            if !tarjan.state.contains_key(&root) {
                tarjan.run_iterative(self, root);
            }
        }
        tarjan.into_components()
    }

    /// Recursive Tarjan; identical output to [`Self::tarjan_scc_map`].
    ///
    /// Recursion depth equals the longest DFS path, so very deep graphs can
    /// overflow the call stack.
    #[must_use]
    pub fn tarjan_scc_map_recursive(&self) -> Components {
        let mut tarjan = Tarjan::default();
        for &root in self.vertices().keys() {
            if !tarjan.state.contains_key(&root) {
                tarjan.run_recursive(self, root);
            }
        }
        tarjan.into_components()
    }

    /// Members of each component, indexed by component number.
    #[must_use]
    pub fn tarjan_scc_list(&self) -> Vec<Vec<VertexId>> {
        self.tarjan_scc_map().list()
    }

    #[must_use]
    pub fn tarjan_scc_list_recursive(&self) -> Vec<Vec<VertexId>> {
        self.tarjan_scc_map_recursive().list()
    }
}

impl<T> UndirectedGraph<T> {
    /// Connected-component labelling.
    #[must_use]
    pub fn scc_map(&self) -> Components {
        let mut components = Components::default();
        let mut queue: VecDeque<VertexId> = VecDeque::new();

        for &root in self.vertices().keys() {
            if components.membership.contains_key(&root) {
                continue;
            }
            let label = components.count;
            components.membership.insert(root, label);
            queue.push_back(root);

            while let Some(v) = queue.pop_front() {
                for c in out_connections(self, v) {
                    if !components.membership.contains_key(&c.to) {
                        components.membership.insert(c.to, label);
                        queue.push_back(c.to);
                    }
                }
            }
            components.count += 1;
        }

        debug!(components = components.count, "labelled connected components");
        components
    }

    #[must_use]
    pub fn scc_list(&self) -> Vec<Vec<VertexId>> {
        self.scc_map().list()
    }
}

// ---------------------------------------------------------------------------
// Tarjan bookkeeping
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct VertexState {
    index: usize,
    low: usize,
    on_stack: bool,
}

#[derive(Debug, Default)]
struct Tarjan {
    state: HashMap<VertexId, VertexState>,
    stack: Vec<VertexId>,
    next_index: usize,
    components: Components,
}

impl Tarjan {
    fn discover(&mut self, v: VertexId) {
        self.state.insert(
            v,
            VertexState {
                index: self.next_index,
                low: self.next_index,
                on_stack: true,
            },
        );
        self.stack.push(v);
        self.next_index += 1;
    }

    fn lower(&mut self, v: VertexId, candidate: usize) {
        if let Some(s) = self.state.get_mut(&v) {
            s.low = s.low.min(candidate);
        }
    }

    fn low(&self, v: VertexId) -> usize {
        self.state.get(&v).map_or(usize::MAX, |s| s.low)
    }

    /// React to the edge `v → to`: descend if `to` is new (returns `true`),
    /// otherwise fold in its index when it is still on the stack.
    fn examine(&mut self, v: VertexId, to: VertexId) -> bool {
        match self.state.get(&to) {
            None => true,
            Some(s) if s.on_stack => {
                let index = s.index;
                self.lower(v, index);
                false
            }
            Some(_) => false,
        }
    }

    /// Pop the component rooted at `v`, if `v` is a root.
    fn finish(&mut self, v: VertexId) {
        let Some(&VertexState { index, low, .. }) = self.state.get(&v) else {
            return;
        };
        if low != index {
            return;
        }

        let label = self.components.count;
        while let Some(w) = self.stack.pop() {
            if let Some(s) = self.state.get_mut(&w) {
                s.on_stack = false;
            }
            self.components.membership.insert(w, label);
            if w == v {
                break;
            }
        }
        self.components.count += 1;
    }

    fn run_iterative<G>(&mut self, graph: &G, root: VertexId)
    where
        G: Graph + ?Sized,
    {
        self.discover(root);
        let mut frames: Vec<(VertexId, usize)> = vec![(root, 0)];

        while let Some(frame) = frames.last_mut() {
            let v = frame.0;
            if let Some(c) = out_connections(graph, v).get(frame.1) {
                frame.1 += 1;
                if self.examine(v, c.to) {
                    self.discover(c.to);
                    frames.push((c.to, 0));
                }
            } else {
                frames.pop();
                self.finish(v);
                if let Some(&(parent, _)) = frames.last() {
                    let low = self.low(v);
                    self.lower(parent, low);
                }
            }
        }
    }

    fn run_recursive<G>(&mut self, graph: &G, v: VertexId)
    where
        G: Graph + ?Sized,
    {
        self.discover(v);
        for c in out_connections(graph, v) {
            if self.examine(v, c.to) {
                self.run_recursive(graph, c.to);
                let low = self.low(c.to);
                self.lower(v, low);
            }
        }
        self.finish(v);
    }

    fn into_components(self) -> Components {
        debug!(components = self.components.count, "tarjan finished");
        self.components
    }
}
