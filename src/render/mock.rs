//! Mock Python module emitter.
//!
//! Documentation hosts (ReadTheDocs) cannot compile the C++ backend, so the
//! `<package>.cpp.*` extension modules are faked: one generated Python file
//! registers a `ModuleType` per binding module and attaches stub members
//! carrying the real docstrings.

use crate::model::Member;
use crate::paths;
use anyhow::{Context, Result};
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// Descriptor file listing the headers wrapped by one binding module.
const DESCRIPTOR_FILE: &str = "module.i";

static RE_INCLUDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^#include\s+"([^"]+)""#).unwrap());

static RE_IMPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^%import\s*\([^)]*\)\s*"([^"]+)""#).unwrap());

/// Write the mock module file for all binding modules under `module_root`.
///
/// A missing module root is a non-fatal skip: the warning is logged and the
/// rest of the run completes normally.
pub fn write_mock(
    members: &[Member],
    module_root: &Path,
    out_path: &Path,
    package: &str,
    anchor: &str,
) -> Result<()> {
    if !module_root.is_dir() {
        eprintln!(
            "warning: binding-module directory is not present: {}",
            module_root.display()
        );
        eprintln!("warning: no mock Python code will be generated");
        return Ok(());
    }

    // Explicitly sorted: directory-listing order is filesystem-dependent.
    let mut modules: Vec<String> = fs::read_dir(module_root)
        .with_context(|| format!("failed to read module directory: {}", module_root.display()))?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().join(DESCRIPTOR_FILE).is_file())
        .filter_map(|e| e.file_name().to_str().map(|s| s.to_string()))
        .collect();
    modules.sort();

    let mut out = String::new();
    out.push_str("#!/usr/bin/env python\n#\n");
    out.push_str("# This file is AUTO GENERATED!\n");
    out.push_str("# This file is fake, full of mock stubs\n");
    out.push_str("# This file is made by apigen\n#\n\n");
    out.push_str("from __future__ import print_function\n");
    out.push_str("from types import ModuleType\n");
    out.push_str("import sys\n");
    out.push_str("\n\nWARNING = \"This is a mock object!\"\n");

    for module in &modules {
        let descriptor = module_root.join(module).join(DESCRIPTOR_FILE);
        let content = fs::read_to_string(&descriptor)
            .with_context(|| format!("failed to read {}", descriptor.display()))?;
        let headers = included_headers(&content);

        let module_py = format!("_{}", module);
        let full_module_py = format!("{}.cpp.{}", package, module_py);
        out.push_str(&format!("\n\n{}\n", "#".repeat(80)));
        out.push_str(&format!("{} = ModuleType(\"{}\")\n", module_py, full_module_py));
        out.push_str(&format!("sys.modules[\"{}\"] = {}\n\n", full_module_py, module_py));
        println!("    Generating module {}", full_module_py);

        for member in members {
            let short_path = paths::short_path_of(&member.header_path, anchor)
                .with_context(|| format!("bad header path for {}", member.name))?;
            if !headers.contains(&short_path) {
                continue;
            }
            out.push_str(&member.mock_text.replace("${module}", &module_py));
            out.push_str("\n\n");
        }
    }

    fs::write(out_path, out)
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    Ok(())
}

/// Header paths named by `#include "..."` and `%import(...) "..."` directives.
fn included_headers(descriptor: &str) -> BTreeSet<String> {
    let mut headers = BTreeSet::new();
    for line in descriptor.lines() {
        if let Some(caps) = RE_INCLUDE.captures(line) {
            headers.insert(caps[1].to_string());
        } else if let Some(caps) = RE_IMPORT.captures(line) {
            headers.insert(caps[1].to_string());
        }
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MemberKind;

    fn member(name: &str, kind: MemberKind, header: &str) -> Member {
        let short_name = name.rsplit("::").next().unwrap_or(name).to_string();
        let mock_text = format!("${{module}}.{} = None", short_name);
        Member {
            name: name.to_string(),
            short_name,
            kind,
            header_path: header.to_string(),
            rst_text: String::new(),
            stub_text: String::new(),
            mock_text,
        }
    }

    #[test]
    fn directives_are_parsed() {
        let headers = included_headers(
            "%module common\n\
             #include \"dolfin/common/Array.h\"\n\
             %import(module=\"mesh\") \"dolfin/mesh/Mesh.h\"\n\
             // #include \"dolfin/not/this.h\"\n",
        );
        assert!(headers.contains("dolfin/common/Array.h"));
        assert!(headers.contains("dolfin/mesh/Mesh.h"));
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn members_are_matched_by_short_path() {
        let root = tempfile::TempDir::new().unwrap();
        fs::create_dir(root.path().join("mesh")).unwrap();
        fs::write(
            root.path().join("mesh").join("module.i"),
            "#include \"dolfin/mesh/Bar.h\"\n",
        )
        .unwrap();

        let out_file = root.path().join("mock.py");
        let members = vec![
            member("dolfin::Bar", MemberKind::Class, "/src/dolfin/mesh/Bar.h"),
            member("dolfin::Form", MemberKind::Class, "/src/dolfin/fem/Form.h"),
        ];
        write_mock(&members, root.path(), &out_file, "dolfin", "dolfin").unwrap();

        let out = fs::read_to_string(out_file).unwrap();
        assert!(out.contains("_mesh = ModuleType(\"dolfin.cpp._mesh\")"));
        assert!(out.contains("sys.modules[\"dolfin.cpp._mesh\"] = _mesh"));
        assert!(out.contains("_mesh.Bar = None"));
        assert!(!out.contains("Form"));
    }

    #[test]
    fn directories_without_descriptor_are_skipped() {
        let root = tempfile::TempDir::new().unwrap();
        fs::create_dir(root.path().join("notamodule")).unwrap();
        let out_file = root.path().join("mock.py");
        write_mock(&[], root.path(), &out_file, "dolfin", "dolfin").unwrap();
        let out = fs::read_to_string(out_file).unwrap();
        assert!(!out.contains("notamodule"));
    }

    #[test]
    fn missing_module_root_is_a_non_fatal_skip() {
        let dir = tempfile::TempDir::new().unwrap();
        let out_file = dir.path().join("mock.py");
        write_mock(&[], &dir.path().join("absent"), &out_file, "dolfin", "dolfin").unwrap();
        assert!(!out_file.exists());
    }
}
