//! Contingency statistics for pattern/label correlation.

/// 2×2 counts of `(class, presence)` pairs across one corpus.
///
/// Rows are the positive (label 1) and negative (label 0) classes; columns
/// are pattern presence and absence. Tables are transient, rebuilt per
/// candidate, and never persisted.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ContingencyTable {
    present_pos: u64,
    absent_pos: u64,
    present_neg: u64,
    absent_neg: u64,
}

impl ContingencyTable {
    /// Creates a table from explicit cell counts, row-major:
    /// `[[present∧pos, absent∧pos], [present∧neg, absent∧neg]]`.
    #[must_use]
    pub const fn new(present_pos: u64, absent_pos: u64, present_neg: u64, absent_neg: u64) -> Self {
        Self {
            present_pos,
            absent_pos,
            present_neg,
            absent_neg,
        }
    }

    /// Increments the cell selected by `(positive, present)`.
    pub fn record(&mut self, positive: bool, present: bool) {
        let cell = match (positive, present) {
            (true, true) => &mut self.present_pos,
            (true, false) => &mut self.absent_pos,
            (false, true) => &mut self.present_neg,
            (false, false) => &mut self.absent_neg,
        };
        *cell += 1;
    }

    /// Returns the number of recorded observations.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.present_pos + self.absent_pos + self.present_neg + self.absent_neg
    }

    /// Pearson's chi-square statistic for independence of class and
    /// presence, with one degree of freedom and Yates' continuity
    /// correction.
    ///
    /// The correction matches the reference behavior of
    /// `scipy.stats.chi2_contingency` on 2×2 tables, except that a per-cell
    /// deviation smaller than the correction clamps to zero instead of
    /// reflecting; such tables are nearly independent and score ≈ 0 under
    /// either convention.
    ///
    /// Returns `None` for a degenerate table — any zero row or column
    /// margin leaves the statistic undefined. Callers choose the fallback;
    /// the selector maps it to a score of `0.0`.
    ///
    /// # Examples
    /// ```
    /// use kasago_core::ContingencyTable;
    ///
    /// // A pattern present in every positive and no negative example.
    /// let table = ContingencyTable::new(2, 0, 0, 2);
    /// assert_eq!(table.chi_square(), Some(1.0));
    ///
    /// // A pattern present in every graph: degenerate.
    /// assert_eq!(ContingencyTable::new(2, 0, 2, 0).chi_square(), None);
    /// ```
    #[expect(
        clippy::cast_precision_loss,
        clippy::float_arithmetic,
        reason = "Pearson's statistic requires floating-point arithmetic."
    )]
    #[must_use]
    pub fn chi_square(&self) -> Option<f64> {
        let row_pos = self.present_pos + self.absent_pos;
        let row_neg = self.present_neg + self.absent_neg;
        let col_present = self.present_pos + self.present_neg;
        let col_absent = self.absent_pos + self.absent_neg;
        if row_pos == 0 || row_neg == 0 || col_present == 0 || col_absent == 0 {
            return None;
        }

        let total = self.total() as f64;
        let cells = [
            (self.present_pos, row_pos, col_present),
            (self.absent_pos, row_pos, col_absent),
            (self.present_neg, row_neg, col_present),
            (self.absent_neg, row_neg, col_absent),
        ];

        let mut statistic = 0.0_f64;
        for (observed, row, column) in cells {
            let expected = (row as f64) * (column as f64) / total;
            let deviation = ((observed as f64) - expected).abs();
            let corrected = (deviation - 0.5).max(0.0);
            statistic += corrected * corrected / expected;
        }
        Some(statistic)
    }
}
