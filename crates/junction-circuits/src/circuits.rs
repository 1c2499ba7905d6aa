//! Circuit membership as a disjoint-set forest.
//!
//! Each junction box points at a parent; a box that is its own parent is the
//! root of its circuit and carries the circuit size. Union by size keeps
//! trees shallow and path halving flattens them further on every lookup, so
//! `same_circuit` and `merge` run in amortized near-constant time.
//!
//! Invariants:
//! - circuits partition `0..len()`; sizes of the roots sum to `len()`
//! - circuits only grow: `merge` never splits or shrinks anything
//! - merging two boxes already sharing a circuit changes nothing

/// Disjoint circuits over junction box indices.
#[derive(Debug, Clone)]
pub struct CircuitTracker {
    parent: Vec<usize>,
    /// Circuit size, meaningful only at roots.
    size: Vec<usize>,
    circuits: usize,
}

impl CircuitTracker {
    /// `n` singleton circuits.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
            circuits: n,
        }
    }

    /// Number of junction boxes tracked.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Number of distinct circuits.
    pub fn circuit_count(&self) -> usize {
        self.circuits
    }

    /// Root of the circuit containing `x`, halving the path on the way.
    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            let grandparent = self.parent[self.parent[x]];
            self.parent[x] = grandparent;
            x = grandparent;
        }
        x
    }

    /// Root of the circuit containing `x` without touching the forest.
    fn root(&self, mut x: usize) -> usize {
        while self.parent[x] != x {
            x = self.parent[x];
        }
        x
    }

    /// Whether `a` and `b` currently share a circuit.
    pub fn same_circuit(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    /// Join the circuits of `a` and `b`.
    ///
    /// Returns `false`, leaving everything untouched, when they already share
    /// a circuit.
    pub fn merge(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);

        if ra == rb {
            return false;
        }

        // Larger circuit keeps its root; equal sizes keep the lower index.
        let (keep, absorb) = match self.size[ra].cmp(&self.size[rb]) {
            std::cmp::Ordering::Greater => (ra, rb),
            std::cmp::Ordering::Less => (rb, ra),
            std::cmp::Ordering::Equal => (ra.min(rb), ra.max(rb)),
        };

        self.parent[absorb] = keep;
        self.size[keep] += self.size[absorb];
        self.circuits -= 1;
        true
    }

    /// Size of the circuit containing `x`.
    pub fn circuit_size_of(&self, x: usize) -> usize {
        self.size[self.root(x)]
    }

    /// Sizes of all distinct circuits, in order of their root index.
    pub fn circuit_sizes(&self) -> Vec<usize> {
        (0..self.len())
            .filter(|&x| self.parent[x] == x)
            .map(|root| self.size[root])
            .collect()
    }

    /// One circuit holding every junction box. Never true when empty.
    pub fn is_fully_connected(&self) -> bool {
        self.circuits == 1
    }

    /// Members of every circuit, each list ascending, lists ordered by their
    /// smallest member.
    pub fn circuits(&self) -> Vec<Vec<usize>> {
        let mut slot_of_root = vec![usize::MAX; self.len()];
        let mut members: Vec<Vec<usize>> = Vec::with_capacity(self.circuits);

        for x in 0..self.len() {
            let root = self.root(x);
            if slot_of_root[root] == usize::MAX {
                slot_of_root[root] = members.len();
                members.push(Vec::with_capacity(self.size[root]));
            }
            members[slot_of_root[root]].push(x);
        }

        members
    }
}
