//! Coverage table shared by the bundle, package and class pages.

use crate::html::Element;
use crate::model::{Counters, CounterKind};
use crate::summary::{self, CounterSummary};

/// Counter columns, in display order.
pub const COLUMNS: [CounterKind; 5] = [
    CounterKind::Instruction,
    CounterKind::Branch,
    CounterKind::Line,
    CounterKind::Method,
    CounterKind::Class,
];

/// One table line: a linked label plus the counters of the entity.
#[derive(Debug, Clone)]
pub struct TableRow {
    pub label: String,
    pub link: Option<String>,
    pub counters: Counters,
}

fn counter_cells(tr: &mut Element, counters: &Counters, cell: &str) {
    for kind in COLUMNS {
        let s = CounterSummary::new(kind, counters.get(kind));
        tr.child(cell)
            .attr("data-value", s.missed.to_string())
            .text(format!("{}/{}", s.covered, s.total));
        tr.child(cell)
            .attr("data-value", s.percent.to_string())
            .text(format!("{:.2}%", s.percent));
    }
}

/// Append a sortable coverage table with `rows` in the given order and a
/// footer holding `total`.
pub fn coverage_table(
    parent: &mut Element,
    id: &str,
    first_column: &str,
    rows: &[TableRow],
    total: &Counters,
) {
    let table = parent.child_with_class("table", "coverage");
    table.attr("id", id);

    let header = table.child("thead").child("tr");
    header.child("td").text(first_column);
    for kind in COLUMNS {
        header.child("td").text(summary::plural_label(kind));
        header.child("td").text("Cov.");
    }

    let foot = table.child("tfoot").child("tr");
    foot.child("td").text("Total");
    counter_cells(foot, total, "td");

    let body = table.child("tbody");
    for row in rows {
        let tr = body.child("tr");
        tr.child("td")
            .a_or_span(row.link.as_deref(), "el")
            .text(row.label.as_str());
        counter_cells(tr, &row.counters, "td");
    }
}
