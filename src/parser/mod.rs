//! XML input reading — aggregates members from a directory of Doxygen files.

pub mod doxygen;

use crate::model::Namespace;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Read every `*.xml` file in `xml_dir` and collect the documented members of
/// the requested namespaces.
///
/// Files are processed in sorted name order so the result never depends on
/// directory-listing order. The caller is responsible for checking that
/// `xml_dir` exists; a missing directory is a policy decision (fatal vs.
/// `--allow-empty-xml`), not a parser concern.
pub fn read_xml_dir(xml_dir: &Path, namespaces: &[&str]) -> Result<BTreeMap<String, Namespace>> {
    let mut result: BTreeMap<String, Namespace> = namespaces
        .iter()
        .map(|ns| (ns.to_string(), Namespace::new(ns)))
        .collect();

    let mut files: Vec<_> = fs::read_dir(xml_dir)
        .with_context(|| format!("failed to read XML directory: {}", xml_dir.display()))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().and_then(|e| e.to_str()) == Some("xml"))
        .collect();
    files.sort();

    for path in files {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        doxygen::parse_compound(&content, &mut result)
            .with_context(|| format!("failed to parse {}", path.display()))?;
    }

    Ok(result)
}
