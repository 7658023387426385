//! Enumeration of fixed-weight boolean masks.

/// Iterator over every arrangement of exactly `k` mines among `n` slots.
///
/// Each item is a boolean mask of length `n` with exactly `k` entries set.
/// Masks are produced in lexicographic order of the chosen slot indices, so
/// `[true, true, false, ..]` comes first. `k > n` yields no arrangements and
/// `k == 0` yields the single all-false mask.
#[derive(Debug, Clone)]
pub(crate) struct Combinations {
    n: usize,
    k: usize,
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl Combinations {
    pub(crate) fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            k,
            indices: Vec::new(),
            started: false,
            done: k > n,
        }
    }

    fn mask(&self) -> Vec<bool> {
        let mut mask = vec![false; self.n];
        for &i in &self.indices {
            mask[i] = true;
        }
        mask
    }
}

impl Iterator for Combinations {
    type Item = Vec<bool>;

    fn next(&mut self) -> Option<Vec<bool>> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            self.indices = (0..self.k).collect();
            return Some(self.mask());
        }

        // Advance the rightmost index that still has room, then pack the
        // tail right behind it.
        let mut i = self.k;
        loop {
            if i == 0 {
                self.done = true;
                return None;
            }
            i -= 1;
            if self.indices[i] < self.n - self.k + i {
                break;
            }
        }
        self.indices[i] += 1;
        for j in i + 1..self.k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        Some(self.mask())
    }
}
