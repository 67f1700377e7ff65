//! Link storage for [`super::Network`].
//!
//! Keeps one neighbour list per node, in the order links were made, alongside
//! a set of normalised `(low, high)` pairs so duplicate checks do not scan
//! neighbour lists.

use std::collections::HashSet;

#[derive(Clone, Debug, Default)]
pub(crate) struct Adjacency {
    neighbours: Vec<Vec<usize>>,
    pairs: HashSet<(usize, usize)>,
}

#[inline]
fn pair_key(a: usize, b: usize) -> (usize, usize) {
    if a <= b { (a, b) } else { (b, a) }
}

impl Adjacency {
    pub(crate) fn node_count(&self) -> usize {
        self.neighbours.len()
    }

    pub(crate) fn link_count(&self) -> usize {
        self.pairs.len()
    }

    pub(crate) fn contains(&self, a: usize, b: usize) -> bool {
        self.pairs.contains(&pair_key(a, b))
    }

    pub(crate) fn neighbours(&self, node: usize) -> Option<&[usize]> {
        self.neighbours.get(node).map(Vec::as_slice)
    }

    pub(crate) fn degree(&self, node: usize) -> Option<usize> {
        self.neighbours.get(node).map(Vec::len)
    }

    /// Records the link `{a, b}` in both directions.
    ///
    /// Returns `false` without changes when either endpoint has no slot, the
    /// endpoints coincide, or the pair is already linked.
    pub(crate) fn insert(&mut self, a: usize, b: usize) -> bool {
        let len = self.neighbours.len();
        if a == b || a >= len || b >= len {
            return false;
        }
        if !self.pairs.insert(pair_key(a, b)) {
            return false;
        }
        if let Some(list) = self.neighbours.get_mut(a) {
            list.push(b);
        }
        if let Some(list) = self.neighbours.get_mut(b) {
            list.push(a);
        }
        true
    }

    /// Drops every link and sets the slot count to `nodes`.
    pub(crate) fn reset(&mut self, nodes: usize) {
        self.pairs.clear();
        self.neighbours.clear();
        self.neighbours.resize_with(nodes, Vec::new);
    }

    /// Drops every link but keeps the slot count.
    pub(crate) fn clear_links(&mut self) {
        self.pairs.clear();
        for list in &mut self.neighbours {
            list.clear();
        }
    }

    /// Sets the slot count to `nodes`, returning how many links were removed.
    ///
    /// Slots are dropped from the highest index down. Each dropped node first
    /// has its incident links detached from the surviving side.
    pub(crate) fn resize(&mut self, nodes: usize) -> usize {
        let mut removed = 0;
        while self.neighbours.len() > nodes {
            let node = self.neighbours.len() - 1;
            removed += self.detach(node);
            self.neighbours.pop();
        }
        if self.neighbours.len() < nodes {
            self.neighbours.resize_with(nodes, Vec::new);
        }
        removed
    }

    /// Removes every link incident to `node` in two phases: the partner list
    /// is taken out of the slot first, then each partner is rewritten.
    fn detach(&mut self, node: usize) -> usize {
        let partners = self
            .neighbours
            .get_mut(node)
            .map(std::mem::take)
            .unwrap_or_default();
        for &partner in &partners {
            self.pairs.remove(&pair_key(node, partner));
            if let Some(list) = self.neighbours.get_mut(partner) {
                list.retain(|&other| other != node);
            }
        }
        partners.len()
    }

    /// Iterates every link once as `(low, high)`, grouped by the low endpoint.
    pub(crate) fn links(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.neighbours
            .iter()
            .enumerate()
            .flat_map(|(node, list)| {
                list.iter()
                    .copied()
                    .filter(move |&other| other > node)
                    .map(move |other| (node, other))
            })
    }

    /// Iterates every stored directed entry as `(origin, target)`.
    pub(crate) fn directed_entries(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.neighbours
            .iter()
            .enumerate()
            .flat_map(|(node, list)| list.iter().map(move |&other| (node, other)))
    }

    pub(crate) fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.pairs.iter().copied()
    }

    #[cfg(test)]
    pub(crate) fn push_directed_unchecked(&mut self, origin: usize, target: usize) {
        if let Some(list) = self.neighbours.get_mut(origin) {
            list.push(target);
        }
    }

    #[cfg(test)]
    pub(crate) fn insert_pair_unchecked(&mut self, a: usize, b: usize) {
        self.pairs.insert(pair_key(a, b));
    }
}
