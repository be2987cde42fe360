//! Logical to physical index name resolution

use std::fmt;

/// One logical index name or a list of them.
///
/// The shape is preserved through resolution: a single name stays single,
/// a list (even a one-element list) stays a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexTarget {
    One(String),
    Many(Vec<String>),
}

impl IndexTarget {
    /// Parse a path segment; commas separate multiple names.
    pub fn parse(segment: &str) -> Self {
        if segment.contains(',') {
            Self::Many(
                segment
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect(),
            )
        } else {
            Self::One(segment.to_string())
        }
    }

    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::One(name) => vec![name.as_str()],
            Self::Many(names) => names.iter().map(String::as_str).collect(),
        }
    }

    /// True when no usable name is left, e.g. a segment of only commas.
    pub fn is_empty(&self) -> bool {
        self.names().iter().all(|name| name.trim().is_empty())
    }

    /// Comma-joined form used in engine URLs.
    pub fn to_path(&self) -> String {
        self.names().join(",")
    }
}

impl fmt::Display for IndexTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}

impl From<&str> for IndexTarget {
    fn from(name: &str) -> Self {
        Self::One(name.to_string())
    }
}

impl From<String> for IndexTarget {
    fn from(name: String) -> Self {
        Self::One(name)
    }
}

impl From<Vec<String>> for IndexTarget {
    fn from(names: Vec<String>) -> Self {
        Self::Many(names)
    }
}

impl From<Vec<&str>> for IndexTarget {
    fn from(names: Vec<&str>) -> Self {
        Self::Many(names.into_iter().map(String::from).collect())
    }
}

/// Prepends the configured namespace prefix to logical index names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexResolver {
    prefix: String,
}

impl IndexResolver {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn resolve(&self, logical: &str) -> String {
        format!("{}{}", self.prefix, logical)
    }

    pub fn resolve_target(&self, target: &IndexTarget) -> IndexTarget {
        match target {
            IndexTarget::One(name) => IndexTarget::One(self.resolve(name)),
            IndexTarget::Many(names) => {
                IndexTarget::Many(names.iter().map(|n| self.resolve(n)).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_prefix_is_identity() {
        let resolver = IndexResolver::default();
        assert_eq!(resolver.resolve("logs"), "logs");
        assert_eq!(
            resolver.resolve_target(&IndexTarget::from(vec!["a", "b"])),
            IndexTarget::from(vec!["a", "b"])
        );
    }

    #[test]
    fn test_prefix_single() {
        let resolver = IndexResolver::new("testing.");
        assert_eq!(
            resolver.resolve_target(&IndexTarget::from("testlogs")),
            IndexTarget::One("testing.testlogs".to_string())
        );
    }

    #[test]
    fn test_prefix_preserves_list_shape() {
        let resolver = IndexResolver::new("testing.");

        let one_element = resolver.resolve_target(&IndexTarget::from(vec!["testlogs"]));
        assert_eq!(
            one_element,
            IndexTarget::Many(vec!["testing.testlogs".to_string()])
        );

        let many = resolver.resolve_target(&IndexTarget::from(vec!["a", "b"]));
        assert_eq!(many.to_path(), "testing.a,testing.b");
    }

    #[test]
    fn test_parse_segment() {
        assert_eq!(IndexTarget::parse("logs"), IndexTarget::One("logs".into()));
        assert_eq!(
            IndexTarget::parse("logs,metrics"),
            IndexTarget::Many(vec!["logs".into(), "metrics".into()])
        );
        assert_eq!(
            IndexTarget::parse("logs,"),
            IndexTarget::Many(vec!["logs".into()])
        );
    }

    #[test]
    fn test_blank_targets_are_empty() {
        assert!(IndexTarget::parse(",").is_empty());
        assert!(IndexTarget::parse(" , ,").is_empty());
        assert!(IndexTarget::parse(" ").is_empty());
        assert!(!IndexTarget::parse("logs").is_empty());
        assert!(!IndexTarget::parse(",logs").is_empty());

        // Prefixing an empty list must not produce a cluster-wide path
        let resolved = IndexResolver::new("tenant.").resolve_target(&IndexTarget::parse(","));
        assert!(resolved.is_empty());
    }
}
