//! In-memory coverage tree handed to the report renderer. The tree is
//! produced by an analysis step (see `parsers::jacoco`) and is treated as
//! read-only here: every node already carries its precomputed counters.
//! Subtrees are reference counted so report pages can hold on to the part
//! they render and drop it independently.

use std::rc::Rc;

/// Compute a coverage rate, returning 0.0 when the total is zero.
#[must_use]
pub fn rate(covered: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        covered as f64 / total as f64
    }
}

/// The counter categories a coverage node exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterKind {
    Instruction,
    Branch,
    Line,
    Complexity,
    Method,
    Class,
}

impl CounterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CounterKind::Instruction => "instruction",
            CounterKind::Branch => "branch",
            CounterKind::Line => "line",
            CounterKind::Complexity => "complexity",
            CounterKind::Method => "method",
            CounterKind::Class => "class",
        }
    }
}

impl std::str::FromStr for CounterKind {
    type Err = crate::error::ReportError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "INSTRUCTION" => Ok(CounterKind::Instruction),
            "BRANCH" => Ok(CounterKind::Branch),
            "LINE" => Ok(CounterKind::Line),
            "COMPLEXITY" => Ok(CounterKind::Complexity),
            "METHOD" => Ok(CounterKind::Method),
            "CLASS" => Ok(CounterKind::Class),
            _ => Err(crate::error::ReportError::Parse(format!(
                "Unknown counter type: '{}'",
                s
            ))),
        }
    }
}

/// Covered/missed pair for one counter category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counter {
    pub missed: u64,
    pub covered: u64,
}

impl Counter {
    pub fn new(missed: u64, covered: u64) -> Self {
        Self { missed, covered }
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.missed + self.covered
    }

    /// Covered ratio in `0.0..=1.0`, or `None` when there is nothing to cover.
    #[must_use]
    pub fn covered_ratio(&self) -> Option<f64> {
        if self.total() == 0 {
            None
        } else {
            Some(rate(self.covered, self.total()))
        }
    }
}

/// The full set of counters attached to every node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub instruction: Counter,
    pub branch: Counter,
    pub line: Counter,
    pub complexity: Counter,
    pub method: Counter,
    pub class: Counter,
}

impl Counters {
    #[must_use]
    pub fn get(&self, kind: CounterKind) -> Counter {
        match kind {
            CounterKind::Instruction => self.instruction,
            CounterKind::Branch => self.branch,
            CounterKind::Line => self.line,
            CounterKind::Complexity => self.complexity,
            CounterKind::Method => self.method,
            CounterKind::Class => self.class,
        }
    }

    pub fn set(&mut self, kind: CounterKind, counter: Counter) {
        match kind {
            CounterKind::Instruction => self.instruction = counter,
            CounterKind::Branch => self.branch = counter,
            CounterKind::Line => self.line = counter,
            CounterKind::Complexity => self.complexity = counter,
            CounterKind::Method => self.method = counter,
            CounterKind::Class => self.class = counter,
        }
    }

    /// Whether any instrumentable code is counted here.
    #[must_use]
    pub fn contains_code(&self) -> bool {
        self.instruction.total() > 0 || self.line.total() > 0
    }
}

/// Read-only view shared by every level of the coverage tree.
pub trait CoverageNode {
    fn name(&self) -> &str;
    fn counters(&self) -> &Counters;

    fn counter(&self, kind: CounterKind) -> Counter {
        self.counters().get(kind)
    }

    fn contains_code(&self) -> bool {
        self.counters().contains_code()
    }

    /// A childless copy holding only the name and counters.
    fn plain_copy(&self) -> NodeSummary {
        NodeSummary {
            name: self.name().to_string(),
            counters: *self.counters(),
        }
    }
}

/// Name and counters of a node, detached from its children.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeSummary {
    pub name: String,
    pub counters: Counters,
}

impl CoverageNode for NodeSummary {
    fn name(&self) -> &str {
        &self.name
    }

    fn counters(&self) -> &Counters {
        &self.counters
    }
}

/// A single method; the leaves of the tree.
#[derive(Debug, Clone, Default)]
pub struct MethodCoverage {
    pub name: String,
    /// JVM method descriptor, e.g. `(ILjava/lang/String;)V`.
    pub desc: String,
    /// First executable line, when known.
    pub first_line: Option<u32>,
    pub counters: Counters,
}

/// A class with its methods. Names use `/` as the package separator.
#[derive(Debug, Clone, Default)]
pub struct ClassCoverage {
    pub name: String,
    pub source_file: Option<String>,
    pub methods: Vec<MethodCoverage>,
    pub counters: Counters,
}

/// Coverage status of one source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStatus {
    Empty,
    NotCovered,
    PartlyCovered,
    FullyCovered,
}

impl LineStatus {
    /// Style class used for the line in annotated source listings.
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            LineStatus::Empty => None,
            LineStatus::NotCovered => Some("nc"),
            LineStatus::PartlyCovered => Some("pc"),
            LineStatus::FullyCovered => Some("fc"),
        }
    }
}

/// Instruction and branch coverage of one source line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineCoverage {
    pub line_number: u32,
    pub instructions: Counter,
    pub branches: Counter,
}

impl LineCoverage {
    #[must_use]
    pub fn status(&self) -> LineStatus {
        let ins = self.instructions;
        let br = self.branches;
        if ins.total() == 0 {
            LineStatus::Empty
        } else if ins.covered == 0 {
            LineStatus::NotCovered
        } else if ins.missed > 0 || br.missed > 0 {
            LineStatus::PartlyCovered
        } else {
            LineStatus::FullyCovered
        }
    }
}

/// Line-level coverage for one source file of a package.
#[derive(Debug, Clone, Default)]
pub struct SourceFileCoverage {
    pub name: String,
    pub lines: Vec<LineCoverage>,
    pub counters: Counters,
}

impl SourceFileCoverage {
    #[must_use]
    pub fn line(&self, nr: u32) -> Option<&LineCoverage> {
        self.lines.iter().find(|l| l.line_number == nr)
    }
}

/// A package; the empty name is the default package.
#[derive(Debug, Clone, Default)]
pub struct PackageCoverage {
    pub name: String,
    pub classes: Vec<Rc<ClassCoverage>>,
    pub source_files: Vec<Rc<SourceFileCoverage>>,
    pub counters: Counters,
}

/// The top-level aggregate of one report.
#[derive(Debug, Clone, Default)]
pub struct BundleCoverage {
    pub name: String,
    pub packages: Vec<Rc<PackageCoverage>>,
    pub counters: Counters,
}

macro_rules! coverage_node {
    ($($ty:ty),*) => {
        $(
            impl CoverageNode for $ty {
                fn name(&self) -> &str {
                    &self.name
                }

                fn counters(&self) -> &Counters {
                    &self.counters
                }
            }
        )*
    };
}

coverage_node!(
    MethodCoverage,
    ClassCoverage,
    SourceFileCoverage,
    PackageCoverage,
    BundleCoverage
);
