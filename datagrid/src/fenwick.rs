use alloc::vec::Vec;

/// Binary indexed tree over row heights.
#[derive(Clone, Debug, Default)]
pub(crate) struct Fenwick {
    tree: Vec<u64>, // 1-indexed
    top_bit: usize,
}

impl Fenwick {
    pub(crate) fn from_heights(heights: &[u32]) -> Self {
        let n = heights.len();
        let mut tree = alloc::vec![0u64; n + 1];
        for i in 1..=n {
            tree[i] = tree[i].saturating_add(heights[i - 1] as u64);
            let parent = i + lsb(i);
            if parent <= n {
                tree[parent] = tree[parent].saturating_add(tree[i]);
            }
        }
        Self {
            tree,
            top_bit: top_bit(n),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.tree.len().saturating_sub(1)
    }

    pub(crate) fn add(&mut self, index: usize, delta: i64) {
        let n = self.len();
        let mut i = index + 1;
        while i <= n {
            self.tree[i] = self.tree[i].saturating_add_signed(delta);
            i += lsb(i);
        }
    }

    /// Sum of the first `count` heights.
    pub(crate) fn prefix_sum(&self, count: usize) -> u64 {
        let mut i = count.min(self.len());
        let mut sum = 0u64;
        while i > 0 {
            sum = sum.saturating_add(self.tree[i]);
            i &= i - 1;
        }
        sum
    }

    /// Largest `count` such that `prefix_sum(count) <= target`.
    pub(crate) fn count_within(&self, mut target: u64) -> usize {
        let n = self.len();
        let mut idx = 0usize;
        let mut bit = self.top_bit;
        while bit != 0 {
            let next = idx + bit;
            if next <= n && self.tree[next] <= target {
                target -= self.tree[next];
                idx = next;
            }
            bit >>= 1;
        }
        idx
    }
}

fn lsb(i: usize) -> usize {
    i & i.wrapping_neg()
}

fn top_bit(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    1usize << (usize::BITS - 1 - n.leading_zeros())
}
