//! Summary rollup: the four counter categories shown at the top of every
//! non-source page, as text and as chart payloads.

use serde::Serialize;

use crate::model::{Counter, CounterKind, CoverageNode};

/// The categories shown in a rollup, in display order.
pub const ROLLUP_KINDS: [CounterKind; 4] = [
    CounterKind::Line,
    CounterKind::Branch,
    CounterKind::Method,
    CounterKind::Class,
];

/// Covered percentage rounded to two decimals. An empty counter yields 0.
#[must_use]
pub fn percent(counter: Counter) -> f64 {
    let pct = counter.covered_ratio().unwrap_or(0.0) * 100.0;
    if pct.is_finite() {
        (pct * 100.0).round() / 100.0
    } else {
        0.0
    }
}

/// Display label for a counter category.
pub fn label(kind: CounterKind) -> &'static str {
    match kind {
        CounterKind::Instruction => "Instruction",
        CounterKind::Branch => "Branch",
        CounterKind::Line => "Line",
        CounterKind::Complexity => "Complexity",
        CounterKind::Method => "Method",
        CounterKind::Class => "Class",
    }
}

/// Column and list heading for a counter category.
pub fn plural_label(kind: CounterKind) -> &'static str {
    match kind {
        CounterKind::Instruction => "Instructions",
        CounterKind::Branch => "Branches",
        CounterKind::Line => "Lines",
        CounterKind::Complexity => "Complexity",
        CounterKind::Method => "Methods",
        CounterKind::Class => "Classes",
    }
}

/// One counter category, ready for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CounterSummary {
    #[serde(skip)]
    pub kind: CounterKind,
    pub covered: u64,
    pub missed: u64,
    pub total: u64,
    pub percent: f64,
}

impl CounterSummary {
    pub fn new(kind: CounterKind, counter: Counter) -> Self {
        Self {
            kind,
            covered: counter.covered,
            missed: counter.missed,
            total: counter.total(),
            percent: percent(counter),
        }
    }

    /// e.g. `Line coverage: 12/20`
    #[must_use]
    pub fn text(&self) -> String {
        format!(
            "{} coverage: {}/{}",
            label(self.kind),
            self.covered,
            self.total
        )
    }
}

/// Line, branch, method and class counters of one node.
#[derive(Debug, Clone, PartialEq)]
pub struct Rollup {
    pub entries: Vec<CounterSummary>,
}

impl Rollup {
    pub fn of(node: &dyn CoverageNode) -> Self {
        Self {
            entries: ROLLUP_KINDS
                .iter()
                .map(|&kind| CounterSummary::new(kind, node.counter(kind)))
                .collect(),
        }
    }

    #[must_use]
    pub fn get(&self, kind: CounterKind) -> Option<&CounterSummary> {
        self.entries.iter().find(|e| e.kind == kind)
    }

    /// Structured input for the chart renderer, one entry per category.
    #[must_use]
    pub fn chart_payloads(&self) -> Vec<ChartPayload> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| ChartPayload {
                container: format!("container{}", i + 1),
                title: label(e.kind).to_string(),
                covered: e.covered,
                missed: e.missed,
                percent: e.percent,
            })
            .collect()
    }
}

/// What the chart renderer needs to draw one donut.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPayload {
    pub container: String,
    pub title: String,
    pub covered: u64,
    pub missed: u64,
    pub percent: f64,
}
