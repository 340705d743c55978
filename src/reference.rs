//! Repository references parsed from user input.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ReferenceError;

/// Hosts accepted when parsing a full forge URL.
const KNOWN_HOSTS: &[&str] = &["github.com", "www.github.com"];

/// An `owner/repo` pair identifying a repository on the forge.
///
/// Both parts are guaranteed non-empty once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryReference {
    owner: String,
    repo: String,
}

impl RepositoryReference {
    /// Builds a reference from already-separated parts.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::EmptyOwner`] or [`ReferenceError::EmptyRepo`]
    /// when either part is blank, and [`ReferenceError::InvalidSegment`] when
    /// a part would not stay a single path segment of the API URL.
    pub fn new(owner: &str, repo: &str) -> Result<Self, ReferenceError> {
        let owner = owner.trim();
        let repo = repo.trim();
        if owner.is_empty() {
            return Err(ReferenceError::EmptyOwner);
        }
        if repo.is_empty() {
            return Err(ReferenceError::EmptyRepo);
        }
        for part in [owner, repo] {
            if !is_plain_segment(part) {
                return Err(ReferenceError::InvalidSegment(part.to_string()));
            }
        }
        Ok(Self { owner: owner.to_string(), repo: repo.to_string() })
    }

    /// Parses a bare `owner/repo` token or a forge URL.
    ///
    /// For URLs the first two non-empty path segments after the host are
    /// used, so `https://github.com/o/r/tree/dev/src` yields `o/r`. A trailing
    /// `.git` on the repository name is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error when the input is blank, names an unknown host, or
    /// lacks an owner or repository segment.
    pub fn parse(input: &str) -> Result<Self, ReferenceError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ReferenceError::Blank);
        }

        let without_scheme = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"))
            .unwrap_or(trimmed);

        let path = match without_scheme.split_once('/') {
            Some((head, rest)) if looks_like_host(head) => {
                let host = head.to_ascii_lowercase();
                if !KNOWN_HOSTS.contains(&host.as_str()) {
                    return Err(ReferenceError::UnsupportedHost(host));
                }
                rest
            }
            None if looks_like_host(without_scheme) => {
                return Err(ReferenceError::EmptyOwner);
            }
            _ => without_scheme,
        };

        let path = path.split(['?', '#']).next().unwrap_or_default();
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let owner = segments.next().ok_or(ReferenceError::EmptyOwner)?;
        let repo = segments.next().ok_or(ReferenceError::EmptyRepo)?;
        let repo = repo.strip_suffix(".git").unwrap_or(repo);

        Self::new(owner, repo)
    }

    /// The owning user or organisation.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The repository name.
    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }
}

impl fmt::Display for RepositoryReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// True if `part` names exactly one path segment and no query or fragment.
fn is_plain_segment(part: &str) -> bool {
    part != "."
        && part != ".."
        && !part.chars().any(|c| matches!(c, '/' | '?' | '#') || c.is_whitespace())
}

/// A leading segment containing a dot is treated as a hostname; GitHub
/// owner names cannot contain dots.
fn looks_like_host(segment: &str) -> bool {
    segment.contains('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_owner_repo() {
        let r = RepositoryReference::parse("rust-lang/cargo").unwrap();
        assert_eq!(r.owner(), "rust-lang");
        assert_eq!(r.repo(), "cargo");
        assert_eq!(r.to_string(), "rust-lang/cargo");
    }

    #[test]
    fn parses_full_url_with_extra_segments() {
        let r = RepositoryReference::parse("https://github.com/tokio-rs/tokio/tree/master/tokio")
            .unwrap();
        assert_eq!(r.to_string(), "tokio-rs/tokio");
    }

    #[test]
    fn parses_url_without_scheme_and_git_suffix() {
        let r = RepositoryReference::parse("github.com/serde-rs/serde.git").unwrap();
        assert_eq!(r.to_string(), "serde-rs/serde");
    }

    #[test]
    fn bare_repo_name_may_contain_dots() {
        let r = RepositoryReference::parse("vercel/next.js").unwrap();
        assert_eq!(r.repo(), "next.js");
    }

    #[test]
    fn ignores_query_and_fragment() {
        let r = RepositoryReference::parse("https://github.com/a/b?tab=readme#top").unwrap();
        assert_eq!(r.to_string(), "a/b");
    }

    #[test]
    fn tolerates_duplicate_slashes() {
        let r = RepositoryReference::parse("https://github.com//a//b/").unwrap();
        assert_eq!(r.to_string(), "a/b");
    }

    #[test]
    fn rejects_blank_input() {
        assert_eq!(RepositoryReference::parse("   "), Err(ReferenceError::Blank));
    }

    #[test]
    fn rejects_missing_repo() {
        assert_eq!(RepositoryReference::parse("owner"), Err(ReferenceError::EmptyRepo));
        assert_eq!(
            RepositoryReference::parse("https://github.com/owner"),
            Err(ReferenceError::EmptyRepo)
        );
    }

    #[test]
    fn rejects_host_only() {
        assert_eq!(RepositoryReference::parse("github.com"), Err(ReferenceError::EmptyOwner));
    }

    #[test]
    fn rejects_unknown_host() {
        assert_eq!(
            RepositoryReference::parse("https://gitlab.com/a/b"),
            Err(ReferenceError::UnsupportedHost("gitlab.com".into()))
        );
    }

    #[test]
    fn new_rejects_empty_parts() {
        assert_eq!(RepositoryReference::new("", "r"), Err(ReferenceError::EmptyOwner));
        assert_eq!(RepositoryReference::new("o", " "), Err(ReferenceError::EmptyRepo));
    }

    #[test]
    fn new_rejects_parts_that_escape_their_segment() {
        for (owner, repo) in [
            ("octo", "hello#frag"),
            ("octo", "hello?x=1"),
            ("octo/other", "hello"),
            ("octo", "hel lo"),
            ("..", "hello"),
            ("octo", "."),
        ] {
            assert!(
                matches!(
                    RepositoryReference::new(owner, repo),
                    Err(ReferenceError::InvalidSegment(_))
                ),
                "{owner}/{repo} should be rejected"
            );
        }
    }

    #[test]
    fn parse_rejects_dot_dot_repo() {
        assert_eq!(
            RepositoryReference::parse("github.com/octo/.."),
            Err(ReferenceError::InvalidSegment("..".into()))
        );
    }
}
