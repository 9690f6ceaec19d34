pub mod php;

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLang {
    Php,
}

impl SourceLang {
    /// Detect source language from extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "php" => Some(SourceLang::Php),
            _ => None,
        }
    }
}

/// A piece of source text and the 1-based line it sits on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    pub text: String,
    pub line: usize,
}

impl Located {
    pub fn new(text: impl Into<String>, line: usize) -> Self {
        Self {
            text: text.into(),
            line,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Interface,
    Trait,
    Enum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Method,
    Property,
    Constant,
    Case,
}

/// A declaration inside a type body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub kind: MemberKind,
    pub name: Located,
    /// Parameter names (methods only), without the `$` sigil.
    pub params: Vec<Located>,
    /// Lines of a string literal value (constants and backed enum cases).
    pub value: Vec<Located>,
    /// Lines of the preceding doc comment.
    pub doc: Vec<Located>,
}

/// A class, interface, trait or enum declared in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub kind: TypeKind,
    pub name: Located,
    pub doc: Vec<Located>,
    pub members: Vec<Member>,
}

/// The declarations found in one source file, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceOutline {
    pub namespace: Option<String>,
    pub types: Vec<TypeDecl>,
}

impl SourceOutline {
    pub fn find_type(&self, name: &str) -> Option<&TypeDecl> {
        self.types.iter().find(|t| t.name.text == name)
    }

    /// `Namespace\Name` for a type declared in this file.
    pub fn qualified_name(&self, name: &str) -> Option<String> {
        let namespace = self.namespace.as_deref()?;
        self.find_type(name)
            .map(|t| format!("{}\\{}", namespace, t.name.text))
    }
}

/// Outline a file if its language is supported.
pub fn parse_file(path: &Path, content: &str) -> Option<SourceOutline> {
    match SourceLang::from_path(path)? {
        SourceLang::Php => Some(php::parse(content)),
    }
}
