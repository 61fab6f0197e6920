//! Display names for packages, classes and methods.
//!
//! The renderer treats label text as opaque: everything it shows for a
//! coverage entity comes through a [`LanguageNames`] implementation.

/// Folder and label used for the unnamed package.
pub const DEFAULT_PACKAGE: &str = "default";

/// Formats VM-internal entity names for display.
pub trait LanguageNames {
    fn package_name(&self, vm_name: &str) -> String;
    fn class_name(&self, vm_name: &str) -> String;
    fn method_name(&self, class_vm_name: &str, method_name: &str, desc: &str) -> String;
}

/// Names in Java source syntax.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaNames;

impl JavaNames {
    fn simple_class_name(vm_name: &str) -> &str {
        vm_name.rsplit('/').next().unwrap_or(vm_name)
    }
}

impl LanguageNames for JavaNames {
    fn package_name(&self, vm_name: &str) -> String {
        if vm_name.is_empty() {
            DEFAULT_PACKAGE.to_string()
        } else {
            vm_name.replace('/', ".")
        }
    }

    fn class_name(&self, vm_name: &str) -> String {
        Self::simple_class_name(vm_name).replace('$', ".")
    }

    fn method_name(&self, class_vm_name: &str, method_name: &str, desc: &str) -> String {
        let name = match method_name {
            "<clinit>" => return "static {...}".to_string(),
            "<init>" => {
                let simple = Self::simple_class_name(class_vm_name);
                simple.rsplit('$').next().unwrap_or(simple).to_string()
            }
            other => other.to_string(),
        };
        format!("{}({})", name, parameter_types(desc).join(", "))
    }
}

/// Simple names of the parameter types in a JVM method descriptor.
/// Malformed descriptors produce whatever prefix could be decoded.
fn parameter_types(desc: &str) -> Vec<String> {
    let params = match desc.strip_prefix('(').and_then(|d| d.split(')').next()) {
        Some(p) => p,
        None => return Vec::new(),
    };

    let mut types = Vec::new();
    let mut chars = params.chars().peekable();
    let mut dims = 0;
    while let Some(c) = chars.next() {
        let base = match c {
            '[' => {
                dims += 1;
                continue;
            }
            'Z' => "boolean".to_string(),
            'B' => "byte".to_string(),
            'C' => "char".to_string(),
            'S' => "short".to_string(),
            'I' => "int".to_string(),
            'J' => "long".to_string(),
            'F' => "float".to_string(),
            'D' => "double".to_string(),
            'L' => {
                let mut class = String::new();
                for ch in chars.by_ref() {
                    if ch == ';' {
                        break;
                    }
                    class.push(ch);
                }
                JavaNames.class_name(&class)
            }
            _ => break,
        };
        types.push(format!("{}{}", base, "[]".repeat(dims)));
        dims = 0;
    }
    types
}
