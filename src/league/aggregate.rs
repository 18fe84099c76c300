use super::Leaderboard;
use crate::hosting::CommitRecord;
use crate::identity::{extract_co_author, AliasTable, Developer};
use std::collections::HashMap;
use tracing::debug;

/// Tallies commits per resolved identity.
///
/// The primary author and the first `Co-authored-by:` trailer each count once per
/// commit. Avatars come from primary authorship only, last commit wins.
pub fn aggregate(commits: &[CommitRecord], aliases: &AliasTable) -> Leaderboard {
    let mut frequency: HashMap<String, usize> = HashMap::new();
    let mut avatars: HashMap<String, String> = HashMap::new();

    for commit in commits {
        let author = aliases.resolve(&commit.author_email);
        if !author.is_empty() {
            *frequency.entry(author.clone()).or_insert(0) += 1;
            avatars.insert(author, commit.author_avatar.clone());
        }

        let co_author = extract_co_author(&commit.message);
        if !co_author.is_empty() {
            let co_author = aliases.resolve(&co_author);
            if !co_author.is_empty() {
                *frequency.entry(co_author).or_insert(0) += 1;
            }
        }
    }

    debug!(
        "Aggregated {} commits into {} developers",
        commits.len(),
        frequency.len()
    );

    let entries = frequency
        .into_iter()
        .map(|(name, count)| {
            let avatar = avatars.remove(&name).unwrap_or_default();
            (Developer { name, avatar }, count)
        })
        .collect();

    Leaderboard::new(entries)
}
