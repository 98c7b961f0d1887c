//! A cached table of Ackermann values `A(i, j)` bounded by `n`.
//!
//! `A(1, 1) = 2`, `A(1, j) = 2·A(1, j−1)`, `A(i, j) = A(i−1, A(i, j−1))`.
//! Only entries that are `n` or less are materialized, so the table stays
//! tiny for any practical `n`. The split-findmin structure consults the
//! inverse to pick recursion levels and superelement sizes.

/// Cached values of Ackermann's function that are `n` or less.
#[derive(Debug, Clone)]
pub struct AckermannTable {
    /// `rows[i - 1][j - 1]` holds `A(i, j)`; rows are filled densely from
    /// `j = 1` until the next value would exceed the bound.
    rows: Vec<Vec<i32>>,
}

impl AckermannTable {
    /// Computes all values of `A(i, j)` that are `n` or less.
    pub fn new(n: i32) -> Self {
        let mut table = Self { rows: Vec::new() };
        let bound = i64::from(n);

        table.push_value(1, 1, 2);
        let mut i = 1;
        let mut j = 2;

        loop {
            let new_value = if i == 1 {
                match table.value(1, j - 1) {
                    -1 => -1,
                    v => 2 * i64::from(v),
                }
            } else {
                i64::from(table.value(i - 1, table.value(i, j - 1)))
            };

            if new_value == -1 || new_value > bound {
                if j == 1 {
                    // no entry fits in this row, the table is complete
                    return table;
                }
                i += 1;
                j = 1;
            } else {
                table.push_value(i, j, new_value as i32);
                j += 1;
            }
        }
    }

    /// Returns `A(i, j)` if it is cached, and `-1` otherwise.
    /// `A(i, 0) = 2` for every `i` by convention.
    pub fn value(&self, i: i32, j: i32) -> i32 {
        if j == 0 {
            return 2;
        }
        if i < 1 || j < 1 {
            return -1;
        }
        self.rows
            .get((i - 1) as usize)
            .and_then(|row| row.get((j - 1) as usize))
            .copied()
            .unwrap_or(-1)
    }

    /// Inverse lookup `α(m, n)`.
    ///
    /// For `n ≥ 4` this is the greatest `j` with `2·A(m, j) ≤ n`; for
    /// `m ≥ n` it is the least `i` for which `A(i, ⌊m/n⌋)` is no longer
    /// cached; `-1` otherwise.
    pub fn inverse(&self, m: i32, n: i32) -> i32 {
        if n >= 4 {
            let mut j = 0;
            while self.value(m, j) != -1 && 2 * i64::from(self.value(m, j)) <= i64::from(n) {
                j += 1;
            }
            j - 1
        } else if m >= n {
            let mut i = 1;
            while self.value(i, m / n) != -1 {
                i += 1;
            }
            i
        } else {
            -1
        }
    }

    fn push_value(&mut self, i: i32, j: i32, value: i32) {
        let i = i as usize;
        while self.rows.len() < i {
            self.rows.push(Vec::new());
        }
        debug_assert_eq!(self.rows[i - 1].len(), (j - 1) as usize);
        self.rows[i - 1].push(value);
    }
}
