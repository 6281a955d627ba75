use serde::{Deserialize, Serialize};

/// Envelope schema version (`schema_version` on the wire).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaVersion(String);

impl SchemaVersion {
    /// Version stamped by current producers.
    pub const CURRENT: &'static str = "1.0.0";

    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_current(&self) -> bool {
        self.0 == Self::CURRENT
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self(Self::CURRENT.to_owned())
    }
}

impl core::fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_current() {
        assert!(SchemaVersion::default().is_current());
        assert_eq!(SchemaVersion::default().as_str(), "1.0.0");
        assert!(!SchemaVersion::new("0.9.0").is_current());
    }
}
