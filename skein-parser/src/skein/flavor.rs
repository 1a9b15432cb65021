//! File flavor detection.
//!
//! The flavor of a skein file is decided entirely by its file name and
//! controls key classification and which blocks may open. Parsing into a
//! value tree never consults the flavor; only the token-emitting path does.

use std::fmt;
use std::path::Path;

use serde::Serialize;

/// Dialect of a skein file, detected once from its file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FileFlavor {
    /// `app.skein` - application blueprint (meta, pages, data, deploy).
    Blueprint,
    /// `*.view.skein` - a single page or screen description.
    View,
    /// `*.data.skein` - dataset and schema definitions.
    Data,
    /// `env.skein` - environment variables, upper-case keys.
    Env,
    /// `machine.skein` - host description with locked resource keys.
    Machine,
    /// Any other `.skein` file, and the fallback for unknown names.
    Generic,
}

impl FileFlavor {
    /// Detect the flavor from a file path.
    ///
    /// Only the final path component matters. Exact names win over the
    /// suffix patterns, so `app.view.skein` is a view but `app.skein` is
    /// a blueprint. Blueprint and env files also come in stemmed forms
    /// (`admin.app.skein`, `prod.env.skein`); machine files do not.
    pub fn from_path(path: &str) -> Self {
        let name = Path::new(path)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(path);

        match name {
            "app.skein" => FileFlavor::Blueprint,
            "env.skein" => FileFlavor::Env,
            "machine.skein" => FileFlavor::Machine,
            _ if name.ends_with(".view.skein") => FileFlavor::View,
            _ if name.ends_with(".data.skein") => FileFlavor::Data,
            _ if name.ends_with(".app.skein") => FileFlavor::Blueprint,
            _ if name.ends_with(".env.skein") => FileFlavor::Env,
            _ => FileFlavor::Generic,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileFlavor::Blueprint => "blueprint",
            FileFlavor::View => "view",
            FileFlavor::Data => "data",
            FileFlavor::Env => "env",
            FileFlavor::Machine => "machine",
            FileFlavor::Generic => "generic",
        }
    }

    /// Whether `!` and `*` key modifiers produce tokens in this flavor.
    ///
    /// Modifiers are stripped from keys in every flavor, but only the
    /// blueprint and machine dialects give them meaning worth surfacing.
    pub fn renders_modifiers(&self) -> bool {
        matches!(self, FileFlavor::Blueprint | FileFlavor::Machine)
    }

    /// Whether this flavor has block structure at all.
    ///
    /// Env files are flat key/value listings; block tracking and the
    /// block-relative classification steps are skipped for them.
    pub fn has_blocks(&self) -> bool {
        !matches!(self, FileFlavor::Env)
    }
}

impl fmt::Display for FileFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for FileFlavor {
    fn default() -> Self {
        FileFlavor::Generic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_names() {
        assert_eq!(FileFlavor::from_path("app.skein"), FileFlavor::Blueprint);
        assert_eq!(FileFlavor::from_path("env.skein"), FileFlavor::Env);
        assert_eq!(FileFlavor::from_path("machine.skein"), FileFlavor::Machine);
    }

    #[test]
    fn test_suffix_patterns() {
        assert_eq!(FileFlavor::from_path("home.view.skein"), FileFlavor::View);
        assert_eq!(FileFlavor::from_path("users.data.skein"), FileFlavor::Data);
        assert_eq!(FileFlavor::from_path("admin.app.skein"), FileFlavor::Blueprint);
        assert_eq!(FileFlavor::from_path("prod.env.skein"), FileFlavor::Env);
    }

    #[test]
    fn test_machine_has_no_stemmed_form() {
        assert_eq!(
            FileFlavor::from_path("web1.machine.skein"),
            FileFlavor::Generic
        );
    }

    #[test]
    fn test_exact_name_wins_over_suffix() {
        assert_eq!(FileFlavor::from_path("app.view.skein"), FileFlavor::View);
        assert_eq!(FileFlavor::from_path("app.skein"), FileFlavor::Blueprint);
    }

    #[test]
    fn test_directories_are_ignored() {
        assert_eq!(
            FileFlavor::from_path("/srv/project/app.skein"),
            FileFlavor::Blueprint
        );
        assert_eq!(
            FileFlavor::from_path("nested/dir/pages/home.view.skein"),
            FileFlavor::View
        );
    }

    #[test]
    fn test_fallback_is_generic() {
        assert_eq!(FileFlavor::from_path("notes.skein"), FileFlavor::Generic);
        assert_eq!(FileFlavor::from_path("README.md"), FileFlavor::Generic);
        assert_eq!(FileFlavor::from_path(""), FileFlavor::Generic);
    }
}
