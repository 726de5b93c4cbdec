//! Merging local and remote oracle results

use super::types::Address;

/// Drop every remote address whose coordinates exactly match a local one.
///
/// Only local-vs-remote duplicates are removed; repeats inside `remote`
/// survive.
pub fn dedup_against(local: &[Address], remote: Vec<Address>) -> Vec<Address> {
    remote
        .into_iter()
        .filter(|candidate| !local.iter().any(|l| l.same_position(candidate)))
        .collect()
}

/// Concatenate local and (already deduplicated) remote results so the total
/// never exceeds `cap`. Local entries always come first and are never
/// truncated here.
pub fn merge_phases(local: Vec<Address>, mut remote: Vec<Address>, cap: usize) -> Vec<Address> {
    if local.len() + remote.len() > cap {
        remote.truncate(cap.saturating_sub(local.len()));
    }

    let mut merged = local;
    merged.extend(remote);
    merged
}
