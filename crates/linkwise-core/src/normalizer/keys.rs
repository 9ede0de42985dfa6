//! Field renaming rules
//!
//! Copyright (c) 2025 Linkwise Team
//! Licensed under the Apache-2.0 license

use crate::payload::Payload;
use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

static REPOSITORY_PREFIX: OnceLock<Regex> = OnceLock::new();
static REPOSITORY_SUFFIX: OnceLock<Regex> = OnceLock::new();
static REPOSITORIES_SUFFIX: OnceLock<Regex> = OnceLock::new();
static PLURAL_COUNT: OnceLock<Regex> = OnceLock::new();
static SHA: OnceLock<Regex> = OnceLock::new();

fn pattern(cell: &'static OnceLock<Regex>, source: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(source).unwrap())
}

/// Canonical name for `key`
///
/// Some renames depend on the value: `commit`/`commit_id` become `sha` only
/// for a 40 digit hex string, and `comments`, `forks` and `repositories`
/// become counts only for numbers.
pub fn canonical_key<'a>(key: &'a str, value: &Payload) -> Cow<'a, str> {
    match key {
        "gravatar_url" => Cow::Borrowed("avatar_url"),
        "org" => Cow::Borrowed("organization"),
        "orgs" => Cow::Borrowed("organizations"),
        "username" => Cow::Borrowed("login"),
        "repo" => Cow::Borrowed("repository"),
        "repos" => canonical_key("repositories", value),
        "commit" | "commit_id" if is_sha(value) => Cow::Borrowed("sha"),
        "comments" if value.is_number() => Cow::Borrowed("comment_count"),
        "forks" if value.is_number() => Cow::Borrowed("fork_count"),
        "repositories" if value.is_number() => Cow::Borrowed("repository_count"),
        "commit" | "commit_id" | "comments" | "forks" | "repositories" => Cow::Borrowed(key),
        _ => rewrite_by_pattern(key),
    }
}

/// Apply the pattern rules until none matches
///
/// A single pass is not a fixed point: `repos_repo` becomes
/// `repository_repo`, which matches again.
fn rewrite_by_pattern(key: &str) -> Cow<'_, str> {
    let mut current = Cow::Borrowed(key);
    while let Some(next) = rewrite_once(&current) {
        current = Cow::Owned(next);
    }
    current
}

fn rewrite_once(key: &str) -> Option<String> {
    if let Some(caps) = pattern(&REPOSITORY_PREFIX, r"^repos?_(.*)$").captures(key) {
        return Some(format!("repository_{}", &caps[1]));
    }
    if let Some(caps) = pattern(&REPOSITORY_SUFFIX, r"^(.*)_repo$").captures(key) {
        return Some(format!("{}_repository", &caps[1]));
    }
    if let Some(caps) = pattern(&REPOSITORIES_SUFFIX, r"^(.*)_repos$").captures(key) {
        return Some(format!("{}_repositories", &caps[1]));
    }
    if let Some(caps) = pattern(&PLURAL_COUNT, r"^(.*)s_count$").captures(key) {
        return Some(format!("{}_count", &caps[1]));
    }
    None
}

fn is_sha(value: &Payload) -> bool {
    value
        .as_str()
        .is_some_and(|s| pattern(&SHA, r"^[0-9a-fA-F]{40}$").is_match(s))
}
