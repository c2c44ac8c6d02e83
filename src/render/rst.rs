//! Sphinx RST page emitter — one `api_gen_<subdir>.rst` per subdirectory.

use crate::group::KindMap;
use crate::model::MemberKind;
use crate::paths;
use crate::render::GENERATED_BY;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Write the RST page for one subdirectory. Returns the written path.
///
/// Creates the output directory if absent and overwrites unconditionally, so
/// regeneration is idempotent. Empty groups still produce a header-only page.
pub fn write_rst(subdir: &str, kinds: &KindMap, out_dir: &Path, anchor: &str) -> Result<PathBuf> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output directory: {}", out_dir.display()))?;
    let rst_path = out_dir.join(format!("api_gen_{}.rst", subdir));

    let content = render(kinds, anchor)?;
    fs::write(&rst_path, content)
        .with_context(|| format!("failed to write {}", rst_path.display()))?;
    Ok(rst_path)
}

fn render(kinds: &KindMap, anchor: &str) -> Result<String> {
    let mut out = String::new();
    out.push_str(&format!(".. {}\n", GENERATED_BY));
    out.push_str("\n.. contents::\n\n\n");

    // The previous-short-name state deliberately spans kind sections, and a
    // short name that repeats noncontiguously gets its sub-heading again.
    // Both match the long-standing generator output; do not "fix" here.
    let mut prev_short_name = "";
    for kind in MemberKind::ALL {
        let Some(bucket) = kinds.get(&kind) else {
            continue;
        };
        if bucket.is_empty() {
            continue;
        }

        out.push_str(&format!("{}\n{}\n\n", kind.section_title(), "-".repeat(70)));

        for member in bucket.values() {
            if member.short_name != prev_short_name {
                out.push_str(&format!("{}\n{}\n\n", member.short_name, "~".repeat(60)));
            }
            prev_short_name = &member.short_name;

            let short_path = paths::short_path_of(&member.header_path, anchor)
                .with_context(|| format!("bad header path for {}", member.name))?;
            out.push_str(&format!(
                "C++ documentation for ``{}`` from ``{}``:\n\n",
                member.short_name, short_path
            ));
            out.push_str(&member.rst_text);
            out.push_str("\n\n");
        }
    }

    Ok(out)
}
