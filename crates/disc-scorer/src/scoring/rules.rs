use super::domain::Disc;
use crate::stats::slots::{is_main_stat_for, is_sub_stat};
use crate::stats::{default_main_stat, MainStat, StatCatalog, StatId, MAX_SUBSTATS};

pub(crate) fn resolve_main(catalog: &StatCatalog, disc: &Disc) -> MainStat {
    disc.declared_main()
        .and_then(|raw| catalog.normalize(raw))
        .filter(|id| is_main_stat_for(disc.slot, id))
        .map(MainStat::Resolved)
        .unwrap_or_else(|| default_main_stat(disc.slot))
}

/// Resolves substats for a disc.
///
/// With nothing declared, the list is auto-filled from `priorities` and then
/// the substat pool. Declared substats are only validated and never topped up.
pub(crate) fn resolve_substats(
    catalog: &StatCatalog,
    disc: &Disc,
    main: &MainStat,
    priorities: &[Option<StatId>],
) -> Vec<StatId> {
    let declared = disc.declared_substats();
    if declared.is_empty() {
        let pool = priorities.iter().cloned().chain(
            crate::stats::valid_sub_stats()
                .iter()
                .map(|id| catalog.normalize(id)),
        );
        accept_substats(pool, main)
    } else {
        let pool = declared.iter().map(|raw| catalog.normalize(raw));
        accept_substats(pool, main)
    }
}

fn accept_substats<I>(pool: I, main: &MainStat) -> Vec<StatId>
where
    I: IntoIterator<Item = Option<StatId>>,
{
    let mut accepted: Vec<StatId> = Vec::with_capacity(MAX_SUBSTATS);
    for id in pool.into_iter().flatten() {
        if accepted.len() >= MAX_SUBSTATS {
            break;
        }
        if main.stat() == Some(&id) || !is_sub_stat(&id) || accepted.contains(&id) {
            continue;
        }
        accepted.push(id);
    }
    accepted
}

/// Substats that are also priorities, in substat order.
pub(crate) fn matched_priorities(substats: &[StatId], priorities: &[Option<StatId>]) -> Vec<StatId> {
    substats
        .iter()
        .filter(|id| priorities.iter().flatten().any(|priority| priority == *id))
        .cloned()
        .collect()
}

pub(crate) fn slot_score(base_enhancement: u32, matches_count: usize) -> u32 {
    if matches_count == 0 {
        return 0;
    }
    base_enhancement.saturating_add(matches_count as u32)
}
