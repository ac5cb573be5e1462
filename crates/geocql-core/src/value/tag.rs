///
/// ValueTag
///
/// Fieldless mirror of the `Value` variants, used in diagnostics and
/// record summaries.
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ValueTag {
    Absent,
    Null,
    Number,
    Text,
    Bool,
    Geometry,
}

impl ValueTag {
    /// Stable human-readable value kind label for diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Absent => "Absent",
            Self::Null => "Null",
            Self::Number => "Number",
            Self::Text => "Text",
            Self::Bool => "Bool",
            Self::Geometry => "Geometry",
        }
    }
}
