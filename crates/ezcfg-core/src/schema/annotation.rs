use crate::types::TypeTag;

/// How a field's serialization strategy is chosen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeSelection {
    /// Infer from the field's declared type
    #[default]
    Auto,
    /// Use this tag verbatim
    Explicit(TypeTag),
}

/// Per-field persistence options.
///
/// An empty `path` means the field's own name. Comment lines are attached
/// above the entry when the document is rendered.
///
/// ```
/// use ezcfg_core::{CfgField, TypeSelection, TypeTag};
///
/// let options = CfgField::auto()
///     .path("display.label")
///     .typed(TypeTag::String)
///     .comment("Shown in the title bar");
///
/// assert_eq!(options.type_selection, TypeSelection::Explicit(TypeTag::String));
/// assert_eq!(options.resolve_path("label"), "display.label");
/// assert_eq!(CfgField::auto().resolve_path("label"), "label");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CfgField {
    pub type_selection: TypeSelection,
    pub path: String,
    pub comment: Vec<String>,
}

impl CfgField {
    /// Inferred type, default path, no comment
    pub fn auto() -> Self {
        Self::default()
    }

    /// Declare an explicit type tag
    pub fn typed(mut self, tag: TypeTag) -> Self {
        self.type_selection = TypeSelection::Explicit(tag);
        self
    }

    /// Override the document path
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Append a comment line
    pub fn comment(mut self, line: impl Into<String>) -> Self {
        self.comment.push(line.into());
        self
    }

    /// The document path for a field with the given name
    pub fn resolve_path(&self, field_name: &str) -> String {
        if self.path.is_empty() {
            field_name.to_string()
        } else {
            self.path.clone()
        }
    }
}
