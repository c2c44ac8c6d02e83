//! Doxygen compound-XML parsing.
//!
//! One compound file holds either a namespace (`<compounddef kind="namespace">`
//! with free functions, typedefs, enums and variables as `<memberdef>`s) or a
//! single class/struct (`<compounddef kind="class|struct">`). Index files and
//! other compound kinds contribute nothing.
//!
//! The RST, SWIG and mock payloads are rendered here, once, so downstream
//! emitters only concatenate text.

use crate::model::{Member, MemberKind, Namespace};
use anyhow::Result;
use roxmltree::Node;
use std::collections::BTreeMap;

/// Parse one compound XML document and insert its members into the matching
/// namespaces. Unknown namespaces and member kinds are skipped silently.
pub fn parse_compound(content: &str, namespaces: &mut BTreeMap<String, Namespace>) -> Result<()> {
    let doc = roxmltree::Document::parse(content)?;

    for compound in doc
        .root_element()
        .children()
        .filter(|n| n.has_tag_name("compounddef"))
    {
        match compound.attribute("kind") {
            Some("namespace") => parse_namespace_compound(compound, namespaces),
            Some("class") => parse_record_compound(compound, MemberKind::Class, namespaces),
            Some("struct") => parse_record_compound(compound, MemberKind::Struct, namespaces),
            _ => {}
        }
    }

    Ok(())
}

/// Free members of a namespace compound: typedefs, enums, functions, variables.
fn parse_namespace_compound(compound: Node, namespaces: &mut BTreeMap<String, Namespace>) {
    let Some(ns_name) = child_text(compound, "compoundname") else {
        return;
    };
    let Some(ns) = namespaces.get_mut(&ns_name) else {
        return;
    };

    for section in compound.children().filter(|n| n.has_tag_name("sectiondef")) {
        for memberdef in section.children().filter(|n| n.has_tag_name("memberdef")) {
            let Some(kind) = memberdef.attribute("kind").and_then(MemberKind::from_doxygen)
            else {
                continue;
            };
            let Some(short_name) = child_text(memberdef, "name") else {
                continue;
            };
            // Undocumented locations happen for compiler-generated members.
            let Some(header) = location_file(memberdef) else {
                continue;
            };
            let name = format!("{}::{}", ns_name, short_name);
            let brief = brief_text(memberdef);
            ns.insert(build_member(name, short_name, kind, header, &brief, &ns_name));
        }
    }
}

/// A class or struct compound; the compound itself is the member.
fn parse_record_compound(
    compound: Node,
    kind: MemberKind,
    namespaces: &mut BTreeMap<String, Namespace>,
) {
    let Some(name) = child_text(compound, "compoundname") else {
        return;
    };
    let Some((ns_name, short_name)) = name.rsplit_once("::") else {
        return;
    };
    let Some(header) = location_file(compound) else {
        return;
    };

    let brief = brief_text(compound);
    let member = build_member(
        name.clone(),
        short_name.to_string(),
        kind,
        header,
        &brief,
        ns_name,
    );
    if let Some(ns) = namespaces.get_mut(ns_name) {
        ns.insert(member);
    }
}

fn build_member(
    name: String,
    short_name: String,
    kind: MemberKind,
    header_path: String,
    brief: &str,
    project: &str,
) -> Member {
    let rst_text = render_rst(&name, kind, project);
    let stub_text = render_stub(&name, brief);
    let mock_text = render_mock(&short_name, kind, brief);
    Member {
        name,
        short_name,
        kind,
        header_path,
        rst_text,
        stub_text,
        mock_text,
    }
}

// -- payload rendering --------------------------------------------------------

/// Breathe directive block for the RST page.
fn render_rst(name: &str, kind: MemberKind, project: &str) -> String {
    let mut out = format!(".. {}:: {}\n   :project: {}\n", kind.directive(), name, project);
    if matches!(kind, MemberKind::Class | MemberKind::Struct) {
        out.push_str("   :members:\n   :undoc-members:\n");
    }
    out
}

/// SWIG docstring fragment.
fn render_stub(name: &str, brief: &str) -> String {
    let escaped = brief.replace('\\', "\\\\").replace('"', "\\\"");
    format!("%feature(\"docstring\") {} \"\n{}\n\";\n", name, escaped)
}

/// Python mock fragment. `${module}` is substituted by the mock emitter.
fn render_mock(short_name: &str, kind: MemberKind, brief: &str) -> String {
    let doc = if brief.is_empty() {
        "Mock docstring".to_string()
    } else {
        brief.replace('\\', "\\\\").replace("\"\"\"", "\\\"\\\"\\\"")
    };
    match kind {
        MemberKind::Function => format!(
            "def {n}(*args, **kwargs):\n    \"\"\"{d}\"\"\"\n    print(WARNING)\n${{module}}.{n} = {n}",
            n = short_name,
            d = doc
        ),
        MemberKind::Class | MemberKind::Struct => format!(
            "class {n}(object):\n    \"\"\"{d}\"\"\"\n    def __init__(self, *args, **kwargs):\n        print(WARNING)\n${{module}}.{n} = {n}",
            n = short_name,
            d = doc
        ),
        MemberKind::Typedef | MemberKind::Enum | MemberKind::Variable => {
            format!("${{module}}.{n} = None", n = short_name)
        }
    }
}

// -- XML helpers --------------------------------------------------------------

fn child_text(node: Node, tag: &str) -> Option<String> {
    node.children()
        .find(|n| n.has_tag_name(tag))
        .and_then(|n| n.text())
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

fn location_file(node: Node) -> Option<String> {
    node.children()
        .find(|n| n.has_tag_name("location"))
        .and_then(|n| n.attribute("file"))
        .map(|f| f.to_string())
}

/// Flatten the `<briefdescription>` element to one whitespace-collapsed line.
fn brief_text(node: Node) -> String {
    let Some(brief) = node.children().find(|n| n.has_tag_name("briefdescription")) else {
        return String::new();
    };
    let raw: String = brief
        .descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
