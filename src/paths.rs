//! Anchor-based header path resolution.
//!
//! Documented members carry absolute header paths like
//! `/path/to/dolfin/mesh/Mesh.h`. The package name (`dolfin`) acts as an
//! anchor segment: the component after it is the subdirectory used to group
//! documentation output, and the suffix from the anchor onward is the "short
//! path" shown to readers and matched against binding-module descriptors.

use thiserror::Error;

/// A header path did not contain the anchor segment (or the anchor was the
/// final component, leaving no subdirectory). Always a malformed input;
/// propagates and aborts the run.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("path {path:?} has no {anchor:?} directory component")]
pub struct AnchorNotFoundError {
    pub path: String,
    pub anchor: String,
}

/// Split on both separator styles; Doxygen reports whatever the host used.
fn components(path: &str) -> Vec<&str> {
    path.split(['/', '\\']).filter(|c| !c.is_empty()).collect()
}

/// Index of the last anchor occurrence that still has a following segment.
fn anchor_index(parts: &[&str], anchor: &str) -> Option<usize> {
    parts
        .iter()
        .enumerate()
        .rev()
        .skip(1)
        .find(|(_, c)| **c == anchor)
        .map(|(i, _)| i)
}

/// Return the subdirectory for a header path: the segment immediately after
/// the anchor, e.g. `mesh` for `/path/to/dolfin/mesh/Mesh.h`.
pub fn subdir_of(path: &str, anchor: &str) -> Result<String, AnchorNotFoundError> {
    let parts = components(path);
    let idx = anchor_index(&parts, anchor).ok_or_else(|| AnchorNotFoundError {
        path: path.to_string(),
        anchor: anchor.to_string(),
    })?;
    Ok(parts[idx + 1].to_string())
}

/// Return the short path for a header path: the suffix from the anchor
/// onward, e.g. `dolfin/mesh/Mesh.h`, always `/`-separated.
pub fn short_path_of(path: &str, anchor: &str) -> Result<String, AnchorNotFoundError> {
    let parts = components(path);
    let idx = anchor_index(&parts, anchor).ok_or_else(|| AnchorNotFoundError {
        path: path.to_string(),
        anchor: anchor.to_string(),
    })?;
    Ok(parts[idx..].join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subdir_from_absolute_path() {
        assert_eq!(
            subdir_of("/path/to/dolfin/mesh/Mesh.h", "dolfin").unwrap(),
            "mesh"
        );
    }

    #[test]
    fn short_path_from_absolute_path() {
        assert_eq!(
            short_path_of("/path/to/dolfin/mesh/Mesh.h", "dolfin").unwrap(),
            "dolfin/mesh/Mesh.h"
        );
    }

    #[test]
    fn windows_separators_are_normalized() {
        assert_eq!(
            subdir_of(r"C:\src\dolfin\la\Vector.h", "dolfin").unwrap(),
            "la"
        );
        assert_eq!(
            short_path_of(r"C:\src\dolfin\la\Vector.h", "dolfin").unwrap(),
            "dolfin/la/Vector.h"
        );
    }

    #[test]
    fn last_anchor_occurrence_wins() {
        assert_eq!(
            subdir_of("/home/dolfin/build/dolfin/fem/Form.h", "dolfin").unwrap(),
            "fem"
        );
        assert_eq!(
            short_path_of("/home/dolfin/build/dolfin/fem/Form.h", "dolfin").unwrap(),
            "dolfin/fem/Form.h"
        );
    }

    #[test]
    fn missing_anchor_is_an_error() {
        let err = subdir_of("/path/to/other/mesh/Mesh.h", "dolfin").unwrap_err();
        assert_eq!(err.anchor, "dolfin");
        assert!(short_path_of("/path/to/other/mesh/Mesh.h", "dolfin").is_err());
    }

    #[test]
    fn anchor_in_final_position_is_an_error() {
        // No segment follows the anchor, so there is no subdirectory.
        assert!(subdir_of("/path/to/dolfin", "dolfin").is_err());
    }
}
