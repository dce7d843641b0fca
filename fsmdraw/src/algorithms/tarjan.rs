//! Strongly connected components of the state transition graph.
//!
//! The graph is an arena: nodes are addressed by their insertion index and
//! edges are stored as index pairs plus a per-node adjacency list. Tarjan's
//! algorithm runs on an explicit frame stack so deep chains of states cannot
//! exhaust the call stack.

/// Node indices of one strongly connected component, in the order they were
/// popped off the Tarjan stack.
pub type Component = Vec<usize>;

#[derive(Clone, Debug, Default)]
pub struct Graph {
    names: Vec<String>,
    adjacency: Vec<Vec<usize>>,
    edge_count: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(nodes: usize) -> Self {
        Graph {
            names: Vec::with_capacity(nodes),
            adjacency: Vec::with_capacity(nodes),
            edge_count: 0,
        }
    }

    pub fn add_node(&mut self, name: impl Into<String>) -> usize {
        let id = self.names.len();
        self.names.push(name.into());
        self.adjacency.push(Vec::new());
        id
    }

    /// Add a directed edge. Returns false when either endpoint is unknown.
    pub fn add_edge(&mut self, from: usize, to: usize) -> bool {
        if from >= self.names.len() || to >= self.names.len() {
            return false;
        }
        self.adjacency[from].push(to);
        self.edge_count += 1;
        true
    }

    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn name(&self, id: usize) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    pub fn successors(&self, id: usize) -> &[usize] {
        self.adjacency.get(id).map_or(&[], Vec::as_slice)
    }
}

/// Single-use Tarjan runner holding the per-node scratch state.
pub struct Tarjan<'g> {
    graph: &'g Graph,
    next_index: usize,
    index: Vec<Option<usize>>,
    lowlink: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<usize>,
    components: Vec<Component>,
}

impl<'g> Tarjan<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        let n = graph.node_count();
        Tarjan {
            graph,
            next_index: 0,
            index: vec![None; n],
            lowlink: vec![0; n],
            on_stack: vec![false; n],
            stack: Vec::with_capacity(n),
            components: Vec::new(),
        }
    }

    /// Decompose the graph. Components come out in reverse topological
    /// order: every component precedes the components that can reach it.
    pub fn run(mut self) -> Vec<Component> {
        for root in 0..self.graph.node_count() {
            if self.index[root].is_none() {
                self.strongconnect(root);
            }
        }
        self.components
    }

    fn visit(&mut self, v: usize) {
        self.index[v] = Some(self.next_index);
        self.lowlink[v] = self.next_index;
        self.next_index += 1;
        self.stack.push(v);
        self.on_stack[v] = true;
    }

    fn strongconnect(&mut self, root: usize) {
        let graph = self.graph;
        // (node, position of the next successor to examine)
        let mut frames: Vec<(usize, usize)> = vec![(root, 0)];
        self.visit(root);

        while let Some(frame) = frames.last_mut() {
            let (v, pos) = *frame;
            let succ = graph.successors(v);
            if pos < succ.len() {
                frame.1 += 1;
                let w = succ[pos];
                match self.index[w] {
                    None => {
                        self.visit(w);
                        frames.push((w, 0));
                    }
                    Some(w_index) if self.on_stack[w] => {
                        self.lowlink[v] = self.lowlink[v].min(w_index);
                    }
                    Some(_) => {}
                }
                continue;
            }

            frames.pop();
            if let Some(&(parent, _)) = frames.last() {
                self.lowlink[parent] = self.lowlink[parent].min(self.lowlink[v]);
            }
            if Some(self.lowlink[v]) == self.index[v] {
                let mut component = Vec::new();
                while let Some(w) = self.stack.pop() {
                    self.on_stack[w] = false;
                    component.push(w);
                    if w == v {
                        break;
                    }
                }
                self.components.push(component);
            }
        }
    }
}

/// Strongly connected components of `graph` in reverse topological order.
pub fn decompose(graph: &Graph) -> Vec<Component> {
    let components = Tarjan::new(graph).run();
    log::debug!(
        "tarjan: {} nodes, {} edges -> {} components",
        graph.node_count(),
        graph.edge_count(),
        components.len()
    );
    components
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(n: usize, edges: &[(usize, usize)]) -> Graph {
        let mut g = Graph::new();
        for i in 0..n {
            g.add_node(format!("n{i}"));
        }
        for &(a, b) in edges {
            assert!(g.add_edge(a, b));
        }
        g
    }

    #[test]
    fn empty_graph() {
        assert!(decompose(&Graph::new()).is_empty());
    }

    #[test]
    fn three_cycle_is_one_component() {
        let comps = decompose(&graph(3, &[(0, 1), (1, 2), (2, 0)]));
        assert_eq!(comps, vec![vec![2, 1, 0]]);
    }

    #[test]
    fn chain_is_reverse_topological() {
        let comps = decompose(&graph(3, &[(0, 1), (1, 2)]));
        assert_eq!(comps, vec![vec![2], vec![1], vec![0]]);
    }

    #[test]
    fn self_loop_is_singleton() {
        let comps = decompose(&graph(2, &[(0, 0), (0, 1)]));
        assert_eq!(comps, vec![vec![1], vec![0]]);
    }

    #[test]
    fn disconnected_nodes_each_get_a_component() {
        let comps = decompose(&graph(3, &[]));
        assert_eq!(comps, vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn two_cycles_joined_by_a_bridge() {
        // {0,1} -> {2,3}
        let comps = decompose(&graph(4, &[(0, 1), (1, 0), (1, 2), (2, 3), (3, 2)]));
        assert_eq!(comps.len(), 2);
        let mut sink = comps[0].clone();
        sink.sort();
        assert_eq!(sink, vec![2, 3]);
        let mut source = comps[1].clone();
        source.sort();
        assert_eq!(source, vec![0, 1]);
    }

    #[test]
    fn long_chain_does_not_recurse() {
        let n = 200_000;
        let edges: Vec<(usize, usize)> = (0..n - 1).map(|i| (i, i + 1)).collect();
        let comps = decompose(&graph(n, &edges));
        assert_eq!(comps.len(), n);
        assert_eq!(comps[0], vec![n - 1]);
        assert_eq!(comps[n - 1], vec![0]);
    }

    #[test]
    fn unknown_endpoints_are_rejected() {
        let mut g = graph(1, &[]);
        assert!(!g.add_edge(0, 3));
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.name(0), Some("n0"));
        assert!(g.successors(9).is_empty());
    }
}
