//! Subscriber-tier balanced sampling of active channels.
//!
//! Candidates are ranked by subscriber count (ties broken by input order) and
//! the ranks cut into `min(5, distinct subscriber counts)` equal-frequency
//! buckets. Each non-empty bucket contributes its largest
//! `target / non_empty_buckets` channels; any shortfall is backfilled from
//! the remaining candidates, largest first.

use std::collections::HashSet;

use statvid_core::SelectedChannel;

const MAX_BUCKETS: usize = 5;

/// Picks up to `target` channels spread across subscriber-count quantiles.
///
/// Never returns more than `target` rows, never duplicates a channel id and
/// never invents rows. Repeated channel ids in `candidates` keep their first
/// occurrence.
#[must_use]
pub fn select_balanced(candidates: &[SelectedChannel], target: usize) -> Vec<SelectedChannel> {
    let mut seen = HashSet::new();
    let pool: Vec<&SelectedChannel> = candidates
        .iter()
        .filter(|c| seen.insert(c.channel.channel_id.as_str()))
        .collect();
    if pool.is_empty() || target == 0 {
        return Vec::new();
    }

    let labels = bucket_labels(&pool);
    let bucket_count = labels.iter().max().map_or(0, |max| max + 1);
    let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); bucket_count];
    for (idx, label) in labels.iter().enumerate() {
        buckets[*label].push(idx);
    }
    let non_empty = buckets.iter().filter(|b| !b.is_empty()).count();
    let per_bucket = target / non_empty;

    let mut chosen: Vec<usize> = Vec::with_capacity(target);
    for members in &mut buckets {
        sort_by_subscribers_desc(members, &pool);
        chosen.extend(members.iter().take(per_bucket));
    }

    if chosen.len() < target {
        let taken: HashSet<usize> = chosen.iter().copied().collect();
        let mut remainder: Vec<usize> = (0..pool.len()).filter(|i| !taken.contains(i)).collect();
        sort_by_subscribers_desc(&mut remainder, &pool);
        chosen.extend(remainder.into_iter().take(target - chosen.len()));
    }

    chosen.truncate(target);
    chosen.into_iter().map(|i| pool[i].clone()).collect()
}

/// Equal-frequency bucket label per pool entry, computed over first-occurrence
/// ranks so duplicate subscriber counts still split cleanly.
fn bucket_labels(pool: &[&SelectedChannel]) -> Vec<usize> {
    let n = pool.len();
    let distinct: HashSet<u64> = pool.iter().map(|c| c.channel.subscriber_count).collect();
    let q = distinct.len().min(MAX_BUCKETS);

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by_key(|&i| pool[i].channel.subscriber_count);

    let mut labels = vec![0; n];
    if n == 1 || q <= 1 {
        return labels;
    }
    for (position, &idx) in order.iter().enumerate() {
        // Rank r = position + 1 lies in bucket j when
        // edge_j < r <= edge_{j+1}, with edge_k = 1 + (n - 1) * k / q.
        let scaled = position * q;
        labels[idx] = (0..q)
            .find(|j| scaled <= (n - 1) * (j + 1))
            .unwrap_or(q - 1);
    }
    labels
}

fn sort_by_subscribers_desc(indices: &mut [usize], pool: &[&SelectedChannel]) {
    indices.sort_by(|a, b| {
        pool[*b]
            .channel
            .subscriber_count
            .cmp(&pool[*a].channel.subscriber_count)
            .then(a.cmp(b))
    });
}
