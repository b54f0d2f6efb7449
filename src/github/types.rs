// GitHub API response types.
// Defines structs for the four repository resources and their aggregate.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Owner and name of a repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryIdentity {
    pub owner: String,
    pub name: String,
}

impl RepositoryIdentity {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepositoryIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Repository license.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    pub name: String,
    pub spdx_id: Option<String>,
}

/// GitHub repository metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub html_url: String,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub open_issues_count: u64,
    pub license: Option<License>,
    /// ISO 8601, kept as sent.
    pub created_at: String,
    pub updated_at: String,
    /// Size in kibibytes.
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub default_branch: String,
    pub language: Option<String>,
}

/// Language name to byte count, in the order GitHub sent them.
///
/// GitHub lists the largest language first, and the fallback insights treat
/// the first entry as the primary language, so order must survive both
/// decoding and the cache round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Languages(Vec<(String, u64)>);

impl Languages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a language's byte count, keeping its first position.
    pub fn insert(&mut self, name: impl Into<String>, bytes: u64) {
        let name = name.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = bytes,
            None => self.0.push((name, bytes)),
        }
    }

    pub fn get(&self, name: &str) -> Option<u64> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, b)| *b)
    }

    /// First language in upstream order.
    pub fn primary(&self) -> Option<&str> {
        self.0.first().map(|(n, _)| n.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(n, b)| (n.as_str(), *b))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total_bytes(&self) -> u64 {
        self.0.iter().map(|(_, b)| *b).sum()
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for Languages {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut languages = Languages::new();
        for (name, bytes) in iter {
            languages.insert(name, bytes);
        }
        languages
    }
}

impl Serialize for Languages {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, bytes) in &self.0 {
            map.serialize_entry(name, bytes)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Languages {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LanguagesVisitor;

        impl<'de> Visitor<'de> for LanguagesVisitor {
            type Value = Languages;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of language names to byte counts")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Languages, A::Error> {
                let mut languages = Languages::new();
                while let Some((name, bytes)) = access.next_entry::<String, u64>()? {
                    languages.insert(name, bytes);
                }
                Ok(languages)
            }
        }

        deserializer.deserialize_map(LanguagesVisitor)
    }
}

/// One week of commit activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitActivityWeek {
    /// Week start, Unix epoch seconds.
    pub week: i64,
    pub total: u64,
    /// Commits per day, Sunday first.
    #[serde(default)]
    pub days: Vec<u64>,
}

/// Repository contributor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub login: String,
    pub contributions: u64,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub html_url: String,
}

/// The four resources for one repository, fetched in the same cycle.
///
/// Each field may come from cache or network independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryData {
    pub repository: Repository,
    pub languages: Languages,
    pub commit_activity: Vec<CommitActivityWeek>,
    pub contributors: Vec<Contributor>,
}

/// Rate limit information from response headers.
#[derive(Debug, Clone, Default)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub reset: u64,
}
