use std::collections::HashSet;

/// Undirected neighbour sets, indexed the same way as the snapshot's nodes.
pub struct AdjacencyIndex {
    neighbors: Vec<HashSet<usize>>,
}

impl AdjacencyIndex {
    pub fn build(node_count: usize, edges: &[(usize, usize)]) -> Self {
        let mut neighbors = vec![HashSet::new(); node_count];
        for &(source, target) in edges {
            if source >= node_count || target >= node_count {
                continue;
            }
            neighbors[source].insert(target);
            neighbors[target].insert(source);
        }
        Self { neighbors }
    }

    pub fn neighbors(&self, index: usize) -> Option<&HashSet<usize>> {
        self.neighbors.get(index)
    }

    /// A node always counts as connected to itself.
    pub fn is_connected(&self, a: usize, b: usize) -> bool {
        a == b
            || self
                .neighbors
                .get(a)
                .is_some_and(|neighbors| neighbors.contains(&b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connectivity_is_symmetric_and_reflexive() {
        let edges = [(0, 1), (1, 2), (3, 1), (2, 4)];
        let index = AdjacencyIndex::build(5, &edges);

        for a in 0..5 {
            assert!(index.is_connected(a, a));
            for b in 0..5 {
                assert_eq!(index.is_connected(a, b), index.is_connected(b, a));
            }
        }
    }

    #[test]
    fn chain_does_not_connect_its_ends() {
        let index = AdjacencyIndex::build(3, &[(0, 1), (1, 2)]);

        assert!(index.is_connected(0, 1));
        assert!(index.is_connected(1, 2));
        assert!(!index.is_connected(0, 2));
        assert_eq!(index.neighbors(1).map(HashSet::len), Some(2));
    }

    #[test]
    fn out_of_range_queries_are_not_connected() {
        let index = AdjacencyIndex::build(2, &[(0, 1), (0, 9)]);
        assert!(!index.is_connected(0, 9));
        assert!(!index.is_connected(9, 0));
        assert!(index.neighbors(9).is_none());
    }
}
