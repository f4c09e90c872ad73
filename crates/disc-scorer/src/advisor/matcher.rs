use super::library::CharacterBuild;
use crate::stats::compact_name;

type Matcher = for<'a> fn(&'a [CharacterBuild], &str) -> Option<&'a CharacterBuild>;

/// Tried in order; the first matcher that finds a build wins.
const MATCHERS: &[Matcher] = &[exact_match, compact_id_match, substring_match];

pub(crate) fn find_build<'a>(builds: &'a [CharacterBuild], query: &str) -> Option<&'a CharacterBuild> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    MATCHERS.iter().find_map(|matcher| matcher(builds, query))
}

fn exact_match<'a>(builds: &'a [CharacterBuild], query: &str) -> Option<&'a CharacterBuild> {
    let lowered = query.to_lowercase();
    builds.iter().find(|build| {
        build.name.to_lowercase() == lowered
            || build.id == query
            || build
                .aliases
                .iter()
                .any(|alias| alias.to_lowercase() == lowered)
    })
}

/// Matches when the compacted query contains the build id with underscores
/// removed, e.g. `"Zhu-Yuan (S rank)"` finds `zhu_yuan`.
fn compact_id_match<'a>(builds: &'a [CharacterBuild], query: &str) -> Option<&'a CharacterBuild> {
    let search = compact_name(query);
    if search.is_empty() {
        return None;
    }
    builds.iter().find(|build| {
        let id = build.id.replace('_', "").to_lowercase();
        !id.is_empty() && search.contains(&id)
    })
}

fn substring_match<'a>(builds: &'a [CharacterBuild], query: &str) -> Option<&'a CharacterBuild> {
    let lowered = query.to_lowercase();
    builds.iter().find(|build| {
        build.name.to_lowercase().contains(&lowered)
            || build
                .aliases
                .iter()
                .any(|alias| alias.to_lowercase().contains(&lowered))
    })
}
