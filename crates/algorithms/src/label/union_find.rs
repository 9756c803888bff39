//! Disjoint-set forest over provisional labels

/// Parent-pointer forest; label 0 is the background and is its own root
#[derive(Debug, Clone)]
pub(crate) struct UnionFind {
    parent: Vec<u32>,
}

impl UnionFind {
    pub(crate) fn new() -> Self {
        Self { parent: vec![0] }
    }

    /// Allocate a fresh singleton label
    pub(crate) fn make_set(&mut self) -> u32 {
        let label = self.parent.len() as u32;
        self.parent.push(label);
        label
    }

    /// Root of `label`, halving the path on the way up
    pub(crate) fn find(&mut self, label: u32) -> u32 {
        let mut current = label as usize;
        while self.parent[current] as usize != current {
            let grandparent = self.parent[self.parent[current] as usize];
            self.parent[current] = grandparent;
            current = grandparent as usize;
        }
        current as u32
    }

    /// Merge two sets; the smaller root becomes the representative
    pub(crate) fn union(&mut self, a: u32, b: u32) -> u32 {
        let ra = self.find(a);
        let rb = self.find(b);
        match ra.cmp(&rb) {
            std::cmp::Ordering::Less => {
                self.parent[rb as usize] = ra;
                ra
            }
            std::cmp::Ordering::Greater => {
                self.parent[ra as usize] = rb;
                rb
            }
            std::cmp::Ordering::Equal => ra,
        }
    }
}
