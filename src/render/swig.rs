//! SWIG docstring interface-stub emitter — one `docstrings.i` per subdirectory.

use crate::group::KindMap;
use crate::model::MemberKind;
use crate::render::GENERATED_BY;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Write the interface stub for one subdirectory under
/// `<stub_dir>/<subdir>/<stub_filename>`. Returns the written path.
///
/// Member fragments are emitted in grouped order: kinds in their fixed order,
/// names sorted within a kind — not re-sorted globally across kinds.
pub fn write_stub(
    subdir: &str,
    kinds: &KindMap,
    stub_dir: &Path,
    stub_filename: &str,
    header: &str,
) -> Result<PathBuf> {
    let stub_subdir = stub_dir.join(subdir);
    fs::create_dir_all(&stub_subdir)
        .with_context(|| format!("failed to create stub directory: {}", stub_subdir.display()))?;
    let stub_path = stub_subdir.join(stub_filename);

    let mut out = String::new();
    out.push_str(header);
    out.push_str(&format!("// {}\n\n", GENERATED_BY));
    for kind in MemberKind::ALL {
        let Some(bucket) = kinds.get(&kind) else {
            continue;
        };
        for member in bucket.values() {
            out.push_str(&member.stub_text);
            out.push('\n');
        }
    }

    fs::write(&stub_path, out)
        .with_context(|| format!("failed to write {}", stub_path.display()))?;
    Ok(stub_path)
}
