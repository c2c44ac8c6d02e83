//! Data model for documented C++ symbols — format-agnostic.

use std::collections::BTreeMap;

/// Kind of a documented symbol.
///
/// Declaration order is meaningful: it fixes the section order in the
/// generated RST pages and interface stubs (`Ord` follows it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MemberKind {
    Typedef,
    Enum,
    Function,
    Struct,
    Variable,
    Class,
}

impl MemberKind {
    /// All kinds in emission order.
    pub const ALL: [MemberKind; 6] = [
        MemberKind::Typedef,
        MemberKind::Enum,
        MemberKind::Function,
        MemberKind::Struct,
        MemberKind::Variable,
        MemberKind::Class,
    ];

    /// Parse a Doxygen `kind` attribute. Returns `None` for kinds we do not
    /// document (defines, friends, etc.).
    pub fn from_doxygen(kind: &str) -> Option<MemberKind> {
        match kind {
            "typedef" => Some(MemberKind::Typedef),
            "enum" => Some(MemberKind::Enum),
            "function" => Some(MemberKind::Function),
            "struct" => Some(MemberKind::Struct),
            "variable" => Some(MemberKind::Variable),
            "class" => Some(MemberKind::Class),
            _ => None,
        }
    }

    /// Section title used in the RST pages.
    pub fn section_title(self) -> &'static str {
        match self {
            MemberKind::Typedef => "Type definitions",
            MemberKind::Enum => "Enumerations",
            MemberKind::Function => "Functions",
            MemberKind::Struct => "Structures",
            MemberKind::Variable => "Variables",
            MemberKind::Class => "Classes",
        }
    }

    /// Breathe directive for this kind.
    pub fn directive(self) -> &'static str {
        match self {
            MemberKind::Typedef => "doxygentypedef",
            MemberKind::Enum => "doxygenenum",
            MemberKind::Function => "doxygenfunction",
            MemberKind::Struct => "doxygenstruct",
            MemberKind::Variable => "doxygenvariable",
            MemberKind::Class => "doxygenclass",
        }
    }
}

/// One documented symbol. Immutable once parsed; the three text payloads are
/// rendered at parse time so the emitters only concatenate.
#[derive(Debug, Clone)]
pub struct Member {
    /// Fully qualified name, e.g. `dolfin::Mesh`.
    pub name: String,
    /// Unqualified name, e.g. `Mesh`.
    pub short_name: String,
    pub kind: MemberKind,
    /// Originating header path as reported by Doxygen.
    pub header_path: String,
    /// Breathe directive block for the RST page.
    pub rst_text: String,
    /// SWIG `%feature("docstring")` fragment.
    pub stub_text: String,
    /// Python mock fragment; `${module}` is substituted by the mock emitter.
    pub mock_text: String,
}

/// A named collection of members, keyed by qualified name.
///
/// Qualified names are unique within a namespace, so the map both enforces
/// uniqueness and yields the sorted iteration order every downstream pass
/// relies on.
#[derive(Debug, Default)]
pub struct Namespace {
    pub name: String,
    pub members: BTreeMap<String, Member>,
}

impl Namespace {
    pub fn new(name: &str) -> Namespace {
        Namespace {
            name: name.to_string(),
            members: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, member: Member) {
        self.members.insert(member.name.clone(), member);
    }
}
