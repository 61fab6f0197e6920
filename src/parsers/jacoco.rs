/// Parser for JaCoCo XML coverage reports.
///
/// JaCoCo XML structure:
///   <report name="...">
///     <sessioninfo id="..." start="..." dump="..."/>
///     <group name="...">            (optional, may nest)
///       <package name="com/example">
///         <class name="com/example/Foo" sourcefilename="Foo.java">
///           <method name="doStuff" desc="()V" line="10">
///             <counter type="INSTRUCTION" missed="0" covered="5"/>
///             ...
///           </method>
///           <counter type="LINE" missed="1" covered="5"/>
///           ...
///         </class>
///         <sourcefile name="Foo.java">
///           <line nr="10" mi="0" ci="3" mb="0" cb="2"/>
///           ...
///           <counter type="LINE" missed="1" covered="5"/>
///         </sourcefile>
///         <counter .../>
///       </package>
///     </group>
///     <counter .../>
///   </report>
///
/// Counters always belong to the innermost open entity. Groups are
/// flattened: their packages become packages of the bundle and their own
/// counters are ignored, since the report-level counters already cover them.
use std::path::Path;
use std::rc::Rc;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use super::{get_attr, get_num, xml_err, Parser};
use crate::error::Result;
use crate::model::*;

/// JaCoCo XML format parser.
pub struct JacocoParser;

impl Parser for JacocoParser {
    fn parse(&self, input: &[u8]) -> Result<BundleCoverage> {
        parse(input)
    }
}

/// Read and parse a JaCoCo XML file.
pub fn parse_file(path: &Path) -> Result<BundleCoverage> {
    let content = std::fs::read(path)?;
    parse(&content)
}

/// Whether the content looks like a JaCoCo XML report.
pub fn looks_like_jacoco(content: &[u8]) -> bool {
    let head_len = content.len().min(4096);
    let head = String::from_utf8_lossy(&content[..head_len]);
    head.contains("<report")
        && (head.contains("JACOCO") || head.contains("<package") || head.contains("<sessioninfo"))
}

#[derive(Default)]
struct TreeBuilder {
    bundle: BundleCoverage,
    group_depth: usize,
    package: Option<PackageCoverage>,
    class: Option<ClassCoverage>,
    method: Option<MethodCoverage>,
    source: Option<SourceFileCoverage>,
}

impl TreeBuilder {
    fn open(&mut self, e: &BytesStart<'_>) {
        match e.name().as_ref() {
            b"report" => {
                self.bundle.name = get_attr(e, b"name").unwrap_or_default();
            }
            b"group" => self.group_depth += 1,
            b"package" => {
                self.package = Some(PackageCoverage {
                    name: get_attr(e, b"name").unwrap_or_default(),
                    ..Default::default()
                });
            }
            b"class" => {
                self.class = Some(ClassCoverage {
                    name: get_attr(e, b"name").unwrap_or_default(),
                    source_file: get_attr(e, b"sourcefilename"),
                    ..Default::default()
                });
            }
            b"method" => {
                self.method = Some(MethodCoverage {
                    name: get_attr(e, b"name").unwrap_or_default(),
                    desc: get_attr(e, b"desc").unwrap_or_default(),
                    first_line: get_attr(e, b"line")
                        .and_then(|v| v.parse::<u32>().ok())
                        .filter(|&l| l > 0),
                    ..Default::default()
                });
            }
            b"sourcefile" => {
                self.source = Some(SourceFileCoverage {
                    name: get_attr(e, b"name").unwrap_or_default(),
                    ..Default::default()
                });
            }
            b"line" => {
                if let Some(source) = self.source.as_mut() {
                    let Some(nr) = get_attr(e, b"nr").and_then(|v| v.parse::<u32>().ok()) else {
                        return;
                    };
                    source.lines.push(LineCoverage {
                        line_number: nr,
                        instructions: Counter::new(get_num(e, b"mi"), get_num(e, b"ci")),
                        branches: Counter::new(get_num(e, b"mb"), get_num(e, b"cb")),
                    });
                }
            }
            b"counter" => self.counter(e),
            _ => {}
        }
    }

    fn counter(&mut self, e: &BytesStart<'_>) {
        let Some(kind) = get_attr(e, b"type").and_then(|t| t.parse::<CounterKind>().ok()) else {
            return;
        };
        let counter = Counter::new(get_num(e, b"missed"), get_num(e, b"covered"));

        let counters = if let Some(m) = self.method.as_mut() {
            &mut m.counters
        } else if let Some(c) = self.class.as_mut() {
            &mut c.counters
        } else if let Some(s) = self.source.as_mut() {
            &mut s.counters
        } else if let Some(p) = self.package.as_mut() {
            &mut p.counters
        } else if self.group_depth == 0 {
            &mut self.bundle.counters
        } else {
            return;
        };
        counters.set(kind, counter);
    }

    fn close(&mut self, name: &[u8]) {
        match name {
            b"group" => self.group_depth = self.group_depth.saturating_sub(1),
            b"method" => {
                if let (Some(method), Some(class)) = (self.method.take(), self.class.as_mut()) {
                    class.methods.push(method);
                }
            }
            b"class" => {
                if let (Some(class), Some(pkg)) = (self.class.take(), self.package.as_mut()) {
                    pkg.classes.push(Rc::new(class));
                }
            }
            b"sourcefile" => {
                if let (Some(mut source), Some(pkg)) = (self.source.take(), self.package.as_mut()) {
                    source.lines.sort_by_key(|l| l.line_number);
                    pkg.source_files.push(Rc::new(source));
                }
            }
            b"package" => {
                if let Some(pkg) = self.package.take() {
                    self.bundle.packages.push(Rc::new(pkg));
                }
            }
            _ => {}
        }
    }
}

/// Parse JaCoCo XML coverage data from raw bytes.
pub fn parse(input: &[u8]) -> Result<BundleCoverage> {
    let mut xml = Reader::from_reader(input);
    xml.trim_text(true);
    let mut buf = Vec::new();
    let mut builder = TreeBuilder::default();

    loop {
        match xml.read_event_into(&mut buf) {
            Err(e) => return Err(xml_err(e, &xml)),
            Ok(Event::Eof) => break,
            Ok(Event::Start(ref e)) => builder.open(e),
            Ok(Event::Empty(ref e)) => {
                builder.open(e);
                builder.close(e.name().as_ref());
            }
            Ok(Event::End(ref e)) => builder.close(e.name().as_ref()),
            _ => {}
        }
        buf.clear();
    }

    // Unclosed elements at end of input
    for name in [&b"method"[..], &b"class"[..], &b"sourcefile"[..], &b"package"[..]] {
        builder.close(name);
    }

    Ok(builder.bundle)
}
