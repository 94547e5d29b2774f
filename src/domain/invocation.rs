//! The result of matching one argument vector against the command tree.

use std::collections::{BTreeMap, BTreeSet};

/// Long name of the root option carrying the installation root path.
pub const ROOT_PATH_OPTION: &str = "ggcRootPath";

/// Option values bound at one level of the command path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    values: BTreeMap<String, Vec<String>>,
    flags: BTreeSet<String>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.values.insert(name.into(), values);
    }

    pub fn set_flag(&mut self, name: impl Into<String>) {
        self.flags.insert(name.into());
    }

    /// First value bound to `name`.
    pub fn get_one(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    /// All values bound to `name`, empty if absent.
    pub fn get_many(&self, name: &str) -> &[String] {
        self.values.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn flag(&self, name: &str) -> bool {
        self.flags.contains(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name) || self.flags.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.flags.is_empty()
    }
}

/// Selected command path plus the bindings of every level.
///
/// The root level is always present; `levels` lines up with `path`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedInvocation {
    root: Bindings,
    path: Vec<String>,
    levels: Vec<Bindings>,
}

impl ParsedInvocation {
    pub fn new(root: Bindings, path: Vec<String>, levels: Vec<Bindings>) -> Self {
        debug_assert_eq!(path.len(), levels.len());
        Self { root, path, levels }
    }

    /// Command names below the root, outermost first.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn root(&self) -> &Bindings {
        &self.root
    }

    /// Bindings of the selected (deepest) command.
    pub fn leaf(&self) -> &Bindings {
        self.levels.last().unwrap_or(&self.root)
    }

    /// Bindings at `depth`, where 0 is the root.
    pub fn level(&self, depth: usize) -> Option<&Bindings> {
        match depth {
            0 => Some(&self.root),
            n => self.levels.get(n - 1),
        }
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    pub fn command_line(&self) -> String {
        self.path.join(" ")
    }
}

/// State threaded from the root command into every constructed handler.
///
/// The root path is passed through as given; nothing here validates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootConfig {
    root_path: Option<String>,
}

impl RootConfig {
    pub fn new(root_path: Option<String>) -> Self {
        Self { root_path }
    }

    pub fn from_bindings(bindings: &Bindings) -> Self {
        Self::new(bindings.get_one(ROOT_PATH_OPTION).map(str::to_string))
    }

    /// Keeps an explicit root path, otherwise takes `fallback`.
    pub fn or_default(self, fallback: Option<String>) -> Self {
        Self {
            root_path: self.root_path.or(fallback),
        }
    }

    pub fn root_path(&self) -> Option<&str> {
        self.root_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings_with(name: &str, values: &[&str]) -> Bindings {
        let mut b = Bindings::new();
        b.insert(name, values.iter().map(|s| s.to_string()).collect());
        b
    }

    #[test]
    fn given_bound_values_when_reading_then_returns_first_and_all() {
        let b = bindings_with("names", &["a", "b"]);

        assert_eq!(b.get_one("names"), Some("a"));
        assert_eq!(b.get_many("names"), ["a", "b"]);
        assert!(b.get_many("missing").is_empty());
        assert!(!b.flag("names"));
    }

    #[test]
    fn given_flag_when_set_then_contained() {
        let mut b = Bindings::new();
        b.set_flag("follow");

        assert!(b.flag("follow"));
        assert!(b.contains("follow"));
        assert!(!b.is_empty());
    }

    #[test]
    fn given_no_subcommand_when_reading_leaf_then_returns_root() {
        let root = bindings_with(ROOT_PATH_OPTION, &["/opt/x"]);
        let invocation = ParsedInvocation::new(root.clone(), vec![], vec![]);

        assert!(invocation.is_root());
        assert_eq!(invocation.leaf(), &root);
        assert_eq!(invocation.level(1), None);
    }

    #[test]
    fn given_nested_path_when_reading_levels_then_lines_up_with_path() {
        let leaf = bindings_with("name", &["x"]);
        let invocation = ParsedInvocation::new(
            Bindings::new(),
            vec!["component".into(), "details".into()],
            vec![Bindings::new(), leaf.clone()],
        );

        assert_eq!(invocation.leaf(), &leaf);
        assert_eq!(invocation.level(2), Some(&leaf));
        assert_eq!(invocation.command_line(), "component details");
    }

    #[test]
    fn given_root_option_when_building_root_config_then_passes_value_through() {
        let root = RootConfig::from_bindings(&bindings_with(ROOT_PATH_OPTION, &["not/validated"]));

        assert_eq!(root.root_path(), Some("not/validated"));
    }

    #[test]
    fn given_explicit_root_when_defaulting_then_explicit_wins() {
        let explicit = RootConfig::new(Some("/cli".into())).or_default(Some("/cfg".into()));
        let fallback = RootConfig::default().or_default(Some("/cfg".into()));

        assert_eq!(explicit.root_path(), Some("/cli"));
        assert_eq!(fallback.root_path(), Some("/cfg"));
    }
}
