//! OS-specific package lists

use crate::error::{ModelError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Packages to install on hosts of the listed OS families
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OsSpecific {
    /// OS family tags this block applies to
    pub os_family: OsFamilySet,

    #[serde(default)]
    pub packages: Vec<Package>,
}

impl OsSpecific {
    /// Exact tag match, no wildcard or prefix handling
    pub fn matches(&self, family: &str) -> bool {
        self.os_family.contains(family)
    }
}

/// Ordered set of OS family tags, written comma-separated (`redhat7,suse12`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OsFamilySet(Vec<String>);

impl OsFamilySet {
    pub fn new<I, S>(tags: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Vec::new();
        for tag in tags {
            let tag = tag.as_ref().trim();
            if !is_family_tag(tag) {
                return Err(ModelError::InvalidOsFamily(tag.to_string()));
            }
            if !set.iter().any(|existing| existing == tag) {
                set.push(tag.to_string());
            }
        }
        Ok(Self(set))
    }

    pub fn contains(&self, family: &str) -> bool {
        self.0.iter().any(|tag| tag == family)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

fn is_family_tag(tag: &str) -> bool {
    !tag.is_empty()
        && tag
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
}

impl FromStr for OsFamilySet {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s.split(',').map(str::trim).filter(|tag| !tag.is_empty()))
    }
}

impl fmt::Display for OsFamilySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(","))
    }
}

impl TryFrom<String> for OsFamilySet {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<OsFamilySet> for String {
    fn from(value: OsFamilySet) -> Self {
        value.to_string()
    }
}

/// An OS package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub name: String,

    /// Leave the package alone during stack upgrades
    #[serde(default)]
    pub skip_upgrade: bool,

    /// Name of an orchestrator-side predicate gating the install
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            skip_upgrade: false,
            condition: None,
        }
    }

    pub fn is_conditional(&self) -> bool {
        self.condition.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_set_parsing() {
        let set: OsFamilySet = "redhat7, redhat6,,suse12,redhat7".parse().unwrap();
        assert_eq!(set.iter().collect::<Vec<_>>(), ["redhat7", "redhat6", "suse12"]);
        assert_eq!(set.to_string(), "redhat7,redhat6,suse12");
        assert!("".parse::<OsFamilySet>().unwrap().is_empty());
        assert!("redhat 7".parse::<OsFamilySet>().is_err());
    }

    #[test]
    fn test_exact_match_only() {
        let block = OsSpecific {
            os_family: "redhat7,debian9".parse().unwrap(),
            packages: vec![Package::new("ambari-logsearch-logfeeder")],
        };
        assert!(block.matches("redhat7"));
        assert!(!block.matches("redhat"));
        assert!(!block.matches("redhat72"));
        assert!(!block.matches("REDHAT7"));
    }
}
