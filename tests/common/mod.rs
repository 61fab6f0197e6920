#![allow(dead_code)]

use std::rc::Rc;

use covpages::context::{DisplayMetadata, ReportContext};
use covpages::model::{
    BundleCoverage, ClassCoverage, Counter, Counters, LineCoverage, MethodCoverage,
    PackageCoverage, SourceFileCoverage,
};

/// Counters with instruction and line totals, enough to count as code.
pub fn counters(missed: u64, covered: u64) -> Counters {
    let mut c = Counters::default();
    c.instruction = Counter::new(missed * 3, covered * 3);
    c.line = Counter::new(missed, covered);
    c.method = Counter::new(0, 1);
    c.class = Counter::new(0, 1);
    c
}

pub fn method(name: &str, desc: &str, first_line: u32, missed: u64, covered: u64) -> MethodCoverage {
    MethodCoverage {
        name: name.to_string(),
        desc: desc.to_string(),
        first_line: Some(first_line),
        counters: counters(missed, covered),
    }
}

pub fn class(name: &str, source: Option<&str>, methods: Vec<MethodCoverage>) -> Rc<ClassCoverage> {
    let (missed, covered) = methods.iter().fold((0, 0), |(m, c), meth| {
        (m + meth.counters.line.missed, c + meth.counters.line.covered)
    });
    Rc::new(ClassCoverage {
        name: name.to_string(),
        source_file: source.map(str::to_string),
        counters: if methods.is_empty() {
            Counters::default()
        } else {
            counters(missed, covered)
        },
        methods,
    })
}

pub fn source_file(name: &str, lines: &[(u32, u64, u64)]) -> Rc<SourceFileCoverage> {
    let lines: Vec<LineCoverage> = lines
        .iter()
        .map(|&(nr, mi, ci)| LineCoverage {
            line_number: nr,
            instructions: Counter::new(mi, ci),
            branches: Counter::default(),
        })
        .collect();
    let missed = lines.iter().filter(|l| l.instructions.covered == 0).count() as u64;
    let covered = lines.len() as u64 - missed;
    Rc::new(SourceFileCoverage {
        name: name.to_string(),
        lines,
        counters: counters(missed, covered),
    })
}

pub fn package(
    name: &str,
    classes: Vec<Rc<ClassCoverage>>,
    source_files: Vec<Rc<SourceFileCoverage>>,
) -> Rc<PackageCoverage> {
    let has_code = classes.iter().any(|c| c.counters.contains_code());
    Rc::new(PackageCoverage {
        name: name.to_string(),
        classes,
        source_files,
        counters: if has_code {
            counters(1, 1)
        } else {
            Counters::default()
        },
    })
}

pub fn bundle(name: &str, packages: Vec<Rc<PackageCoverage>>) -> BundleCoverage {
    BundleCoverage {
        name: name.to_string(),
        packages,
        counters: counters(1, 1),
    }
}

/// A bundle "App" with one class with code in the default package and an
/// empty package `com/x`.
pub fn app_bundle() -> BundleCoverage {
    bundle(
        "App",
        vec![
            package(
                "",
                vec![class(
                    "Main",
                    Some("Main.java"),
                    vec![method("main", "([Ljava/lang/String;)V", 3, 1, 1)],
                )],
                vec![source_file("Main.java", &[(3, 0, 2), (4, 2, 0)])],
            ),
            package("com/x", vec![], vec![]),
        ],
    )
}

pub fn context() -> ReportContext {
    ReportContext::new(DisplayMetadata {
        project: "Demo".to_string(),
        app: "svc".to_string(),
        env: "test".to_string(),
        time: "2024-01-01".to_string(),
    })
}

/// Resolve a relative link written in `from_path` against the report root.
pub fn resolve(from_path: &str, link: &str) -> String {
    let link = link.split('#').next().unwrap_or(link);
    let mut parts: Vec<&str> = from_path.split('/').collect();
    parts.pop();
    for seg in link.split('/') {
        match seg {
            ".." => {
                parts.pop();
            }
            "" | "." => {}
            s => parts.push(s),
        }
    }
    parts.join("/")
}

/// Every `href="..."` value in a rendered page.
pub fn hrefs(html: &str) -> Vec<String> {
    html.split("href=\"")
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .map(str::to_string)
        .collect()
}
