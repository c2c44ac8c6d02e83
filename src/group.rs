//! Grouping pass: partition namespace members by source subdirectory and kind.

use crate::model::{Member, MemberKind};
use crate::paths;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Members of one subdirectory, bucketed by kind, name-sorted within a bucket.
pub type KindMap = BTreeMap<MemberKind, BTreeMap<String, Member>>;

/// subdirectory name → kind → qualified name → member.
pub type SubdirGroups = BTreeMap<String, KindMap>;

/// Partition `members` into subdirectory/kind buckets.
///
/// Every member lands in exactly one bucket; a header path without the anchor
/// segment aborts the run. The input is already name-sorted (it comes from the
/// namespace map) and the nested maps preserve that order.
pub fn group_members(members: &[Member], anchor: &str) -> Result<SubdirGroups> {
    let mut groups = SubdirGroups::new();
    for member in members {
        let subdir = paths::subdir_of(&member.header_path, anchor)
            .with_context(|| format!("bad header path for {}", member.name))?;
        groups
            .entry(subdir)
            .or_default()
            .entry(member.kind)
            .or_default()
            .insert(member.name.clone(), member.clone());
    }
    Ok(groups)
}

/// Ensure every subdirectory of the package root has a (possibly empty) group,
/// so file generation produces a complete set even for undocumented
/// subdirectories. Used with `--allow-empty-xml`.
pub fn ensure_subdir_groups(groups: &mut SubdirGroups, package_dir: &Path) -> Result<()> {
    let entries = fs::read_dir(package_dir)
        .with_context(|| format!("failed to read package directory: {}", package_dir.display()))?;
    for entry in entries.flatten() {
        if !entry.path().is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            groups.entry(name.to_string()).or_default();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(name: &str, kind: MemberKind, header: &str) -> Member {
        let short_name = name.rsplit("::").next().unwrap_or(name).to_string();
        Member {
            name: name.to_string(),
            short_name,
            kind,
            header_path: header.to_string(),
            rst_text: String::new(),
            stub_text: String::new(),
            mock_text: String::new(),
        }
    }

    #[test]
    fn groups_by_subdir_and_kind() {
        let members = vec![
            member("dolfin::Bar", MemberKind::Class, "/src/dolfin/mesh/Bar.h"),
            member("dolfin::bar_fn", MemberKind::Function, "/src/dolfin/mesh/Bar.h"),
            member("dolfin::Form", MemberKind::Class, "/src/dolfin/fem/Form.h"),
        ];
        let groups = group_members(&members, "dolfin").unwrap();
        assert_eq!(groups.len(), 2);
        assert!(groups["mesh"][&MemberKind::Class].contains_key("dolfin::Bar"));
        assert!(groups["mesh"][&MemberKind::Function].contains_key("dolfin::bar_fn"));
        assert!(groups["fem"][&MemberKind::Class].contains_key("dolfin::Form"));
    }

    #[test]
    fn grouping_is_a_bijection() {
        let members: Vec<Member> = (0..20)
            .map(|i| {
                let sub = ["mesh", "fem", "la"][i % 3];
                member(
                    &format!("dolfin::m{:02}", i),
                    MemberKind::ALL[i % 6],
                    &format!("/src/dolfin/{}/h{}.h", sub, i),
                )
            })
            .collect();
        let groups = group_members(&members, "dolfin").unwrap();

        let mut grouped: Vec<String> = groups
            .values()
            .flat_map(|kinds| kinds.values())
            .flat_map(|bucket| bucket.keys().cloned())
            .collect();
        grouped.sort();
        let mut original: Vec<String> = members.iter().map(|m| m.name.clone()).collect();
        original.sort();
        assert_eq!(grouped, original);
    }

    #[test]
    fn bad_header_path_aborts() {
        let members = vec![member("dolfin::X", MemberKind::Class, "/elsewhere/X.h")];
        let err = group_members(&members, "dolfin").unwrap_err();
        assert!(err.to_string().contains("dolfin::X"));
    }

    #[test]
    fn missing_groups_are_created_from_package_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        for sub in ["mesh", "fem", "la"] {
            fs::create_dir(dir.path().join(sub)).unwrap();
        }
        fs::write(dir.path().join("README"), "not a subdir").unwrap();

        let mut groups = SubdirGroups::new();
        groups
            .entry("mesh".to_string())
            .or_default()
            .entry(MemberKind::Class)
            .or_default()
            .insert(
                "dolfin::Bar".to_string(),
                member("dolfin::Bar", MemberKind::Class, "/src/dolfin/mesh/Bar.h"),
            );

        ensure_subdir_groups(&mut groups, dir.path()).unwrap();
        assert_eq!(groups.len(), 3);
        // Existing groups keep their members.
        assert_eq!(groups["mesh"][&MemberKind::Class].len(), 1);
        assert!(groups["fem"].is_empty());
        assert!(groups["la"].is_empty());
    }
}
