/// Value and keep tables for one solve, indexed by (prefix length, capacity).
///
/// Row `n` describes the first `n` unit items, so there are `units + 1` rows
/// and row 0 is never written. Unset value cells hold [`UNSET`], which no
/// real value can equal because values are never negative.
pub(crate) struct Tables {
    width: usize,
    best: Vec<i64>,
    keep: Vec<bool>,
}

pub(crate) const UNSET: i64 = -1;

impl Tables {
    pub fn new(units: usize, capacity: usize) -> Self {
        let width = capacity + 1;
        let cells = (units + 1) * width;
        Self {
            width,
            best: vec![UNSET; cells],
            keep: vec![false; cells],
        }
    }

    #[inline]
    fn cell(&self, n: usize, w: usize) -> usize {
        n * self.width + w
    }

    pub fn best(&self, n: usize, w: usize) -> Option<i64> {
        match self.best[self.cell(n, w)] {
            UNSET => None,
            v => Some(v),
        }
    }

    pub fn keep(&self, n: usize, w: usize) -> bool {
        self.keep[self.cell(n, w)]
    }

    pub fn record(&mut self, n: usize, w: usize, value: i64, keep: bool) {
        debug_assert!(value >= 0);
        let cell = self.cell(n, w);
        self.best[cell] = value;
        self.keep[cell] = keep;
    }
}
