use std::fmt;
use std::path::Path;

/// Editor language of a file, inferred from its extension. Serialises to the
/// identifier the editor widget expects (`"javascript"`, `"plaintext"`, ...).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LanguageId {
    JavaScript,
    TypeScript,
    Python,
    Html,
    Css,
    Json,
    Markdown,
    Rust,
    Go,
    Java,
    C,
    Cpp,
    Yaml,
    Xml,
    Shell,
    Sql,
    #[default]
    PlainText,
}

impl LanguageId {
    pub fn from_name(name: &str) -> Self {
        let Some(ext) = Path::new(name).extension().and_then(|s| s.to_str()) else {
            return Self::PlainText;
        };
        match ext.to_ascii_lowercase().as_str() {
            "js" | "jsx" | "mjs" | "cjs" => Self::JavaScript,
            "ts" | "tsx" | "mts" | "cts" => Self::TypeScript,
            "py" | "pyi" => Self::Python,
            "html" | "htm" => Self::Html,
            "css" => Self::Css,
            "json" => Self::Json,
            "md" | "markdown" => Self::Markdown,
            "rs" => Self::Rust,
            "go" => Self::Go,
            "java" => Self::Java,
            "c" | "h" => Self::C,
            "cc" | "cpp" | "cxx" | "hpp" | "hh" | "hxx" => Self::Cpp,
            "yaml" | "yml" => Self::Yaml,
            "xml" | "svg" => Self::Xml,
            "sh" | "bash" | "zsh" => Self::Shell,
            "sql" => Self::Sql,
            _ => Self::PlainText,
        }
    }

    pub fn language_id(self) -> &'static str {
        match self {
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Python => "python",
            Self::Html => "html",
            Self::Css => "css",
            Self::Json => "json",
            Self::Markdown => "markdown",
            Self::Rust => "rust",
            Self::Go => "go",
            Self::Java => "java",
            Self::C => "c",
            Self::Cpp => "cpp",
            Self::Yaml => "yaml",
            Self::Xml => "xml",
            Self::Shell => "shell",
            Self::Sql => "sql",
            Self::PlainText => "plaintext",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::JavaScript => "JavaScript",
            Self::TypeScript => "TypeScript",
            Self::Python => "Python",
            Self::Html => "HTML",
            Self::Css => "CSS",
            Self::Json => "JSON",
            Self::Markdown => "Markdown",
            Self::Rust => "Rust",
            Self::Go => "Go",
            Self::Java => "Java",
            Self::C => "C",
            Self::Cpp => "C++",
            Self::Yaml => "YAML",
            Self::Xml => "XML",
            Self::Shell => "Shell",
            Self::Sql => "SQL",
            Self::PlainText => "Plain Text",
        }
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.language_id())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/language.rs"]
mod tests;
