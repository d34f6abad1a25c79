//! Line patterns and line detection.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::grid::{Cells, Mark};

/// One of the eight index triples that form a line on a 3×3 grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinePattern(pub [usize; 3]);

impl LinePattern {
    /// The three cell indices of this line.
    #[must_use]
    pub const fn cells(self) -> [usize; 3] {
        self.0
    }

    /// The mark filling all three cells, if any. A pattern reaching off
    /// the board has no owner.
    #[must_use]
    pub fn owner(self, cells: &Cells) -> Option<Mark> {
        let [a, b, c] = self.0;
        let cell = |i: usize| cells.get(i).copied().flatten();
        match cell(a) {
            Some(mark) if cell(b) == Some(mark) && cell(c) == Some(mark) => Some(mark),
            _ => None,
        }
    }
}

impl std::fmt::Display for LinePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "[{a},{b},{c}]")
    }
}

/// Rows, then columns, then diagonals.
pub const LINE_PATTERNS: [LinePattern; 8] = [
    LinePattern([0, 1, 2]),
    LinePattern([3, 4, 5]),
    LinePattern([6, 7, 8]),
    LinePattern([0, 3, 6]),
    LinePattern([1, 4, 7]),
    LinePattern([2, 5, 8]),
    LinePattern([0, 4, 8]),
    LinePattern([2, 4, 6]),
];

/// A line found complete, with the mark that completed it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedLine {
    pub pattern: LinePattern,
    pub mark: Mark,
}

/// Every line complete at evaluation time, in `LINE_PATTERNS` order.
///
/// A single placement completes at most four lines (through the center),
/// so the inline capacity covers the common cases without allocating.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineCheck {
    lines: SmallVec<[CompletedLine; 2]>,
}

impl LineCheck {
    /// True if no line is complete.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of complete lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// All complete lines.
    #[must_use]
    pub fn lines(&self) -> &[CompletedLine] {
        &self.lines
    }

    /// Patterns of all complete lines.
    pub fn patterns(&self) -> impl Iterator<Item = LinePattern> + '_ {
        self.lines.iter().map(|l| l.pattern)
    }

    /// Patterns completed by one mark.
    #[must_use]
    pub fn patterns_for(&self, mark: Mark) -> Vec<LinePattern> {
        self.lines
            .iter()
            .filter(|l| l.mark == mark)
            .map(|l| l.pattern)
            .collect()
    }

    /// Marks that completed at least one line, X first.
    pub fn scorers(&self) -> impl Iterator<Item = Mark> + '_ {
        Mark::ALL
            .into_iter()
            .filter(|&mark| self.lines.iter().any(|l| l.mark == mark))
    }
}

/// Scan all eight patterns and collect every complete one.
#[must_use]
pub fn completed_lines(cells: &Cells) -> LineCheck {
    let lines = LINE_PATTERNS
        .iter()
        .filter_map(|&pattern| pattern.owner(cells).map(|mark| CompletedLine { pattern, mark }))
        .collect();
    LineCheck { lines }
}

/// The mark of the first complete line, if any. Used by search, which only
/// needs to know whether the position is decided.
#[must_use]
pub fn first_completed(cells: &Cells) -> Option<Mark> {
    LINE_PATTERNS.iter().find_map(|pattern| pattern.owner(cells))
}
