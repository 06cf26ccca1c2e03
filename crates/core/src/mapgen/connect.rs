//! Edge construction between adjacent rows, plus the start and boss hookups.
//!
//! Each node links forward to the one or two nearest nodes (by column) in the
//! next populated row, occasionally adding a cross-link for route variety.

use rand_chacha::rand_core::Rng;

use crate::config::GeneratorSettings;
use crate::types::NodeId;

use super::model::Node;
use super::seed::{choose, random_usize, roll};

const MAX_FORWARD_LINKS: usize = 2;
/// Cross-links are only drawn into rows wider than this.
const CROSS_LINK_MIN_ROW_WIDTH: usize = 2;

#[derive(Clone, Copy, Debug)]
pub(super) struct ConnectorTuning {
    pub(super) cross_link_chance: f64,
    pub(super) adopt_orphans: bool,
    pub(super) boss_entry_width: Option<usize>,
}

impl From<&GeneratorSettings> for ConnectorTuning {
    fn from(settings: &GeneratorSettings) -> Self {
        Self {
            cross_link_chance: settings.cross_link_chance,
            adopt_orphans: settings.adopt_orphans,
            boss_entry_width: settings.boss_entry_width,
        }
    }
}

pub(super) fn connect_floor<R: Rng + ?Sized>(
    rng: &mut R,
    start: &mut Node,
    rows: &mut [Vec<Node>],
    boss: Option<&Node>,
    tuning: ConnectorTuning,
) {
    let first_populated = rows.iter().position(|row| !row.is_empty());
    match first_populated {
        Some(index) => {
            for node in &rows[index] {
                start.link(&node.id);
            }
        }
        None => {
            if let Some(boss) = boss {
                start.link(&boss.id);
            }
            return;
        }
    }

    let mut last_populated = first_populated.unwrap_or_default();
    for index in 0..rows.len() {
        if rows[index].is_empty() {
            continue;
        }
        last_populated = index;
        let Some(next_index) = (index + 1..rows.len()).find(|&next| !rows[next].is_empty()) else {
            break;
        };

        let (head, tail) = rows.split_at_mut(next_index);
        let current = &mut head[index];
        let next = &tail[0];
        link_rows(rng, current, next, tuning);
        if tuning.adopt_orphans {
            adopt_orphans(current, next);
        }
    }

    if let Some(boss) = boss {
        link_final_row(rng, &mut rows[last_populated], boss, tuning.boss_entry_width);
    }
}

fn link_rows<R: Rng + ?Sized>(
    rng: &mut R,
    current: &mut [Node],
    next: &[Node],
    tuning: ConnectorTuning,
) {
    for node in current.iter_mut() {
        let link_count = random_usize(rng, 1, MAX_FORWARD_LINKS.min(next.len()));
        for target in ranked_by_proximity(node.column, next).into_iter().take(link_count) {
            node.link(&next[target].id);
        }

        if next.len() > CROSS_LINK_MIN_ROW_WIDTH && roll(rng, tuning.cross_link_chance) {
            let unconnected: Vec<&NodeId> = next
                .iter()
                .map(|candidate| &candidate.id)
                .filter(|id| !node.paths.contains(*id))
                .collect();
            if let Some(&extra) = choose(rng, &unconnected) {
                node.link(extra);
            }
        }
    }
}

/// Indices into `row`, nearest column first; ties keep row order.
fn ranked_by_proximity(column: f64, row: &[Node]) -> Vec<usize> {
    let mut ranked: Vec<usize> = (0..row.len()).collect();
    ranked.sort_by(|&left, &right| {
        let left_distance = (row[left].column - column).abs();
        let right_distance = (row[right].column - column).abs();
        left_distance.total_cmp(&right_distance)
    });
    ranked
}

/// Links every node of `next` that nothing in `current` points at from its nearest neighbour above.
fn adopt_orphans(current: &mut [Node], next: &[Node]) {
    if current.is_empty() {
        return;
    }
    for orphan in next {
        if current.iter().any(|node| node.paths.contains(&orphan.id)) {
            continue;
        }
        let parent = ranked_by_proximity(orphan.column, current)[0];
        current[parent].link(&orphan.id);
    }
}

fn link_final_row<R: Rng + ?Sized>(
    rng: &mut R,
    final_row: &mut [Node],
    boss: &Node,
    entry_width: Option<usize>,
) {
    let width = final_row.len();
    let entry_width = entry_width.filter(|&entry| entry > 0 && entry < width).unwrap_or(width);
    let first_entry = (width - entry_width) / 2;
    for node in &mut final_row[first_entry..first_entry + entry_width] {
        node.link(&boss.id);
    }

    // A lone boss entrance in a wider row gets a second way in.
    if entry_width == 1 && width > 1 {
        let others: Vec<usize> = (0..width).filter(|&index| index != first_entry).collect();
        if let Some(&second) = choose(rng, &others) {
            final_row[second].link(&boss.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    use super::*;
    use crate::config::BossConfig;
    use crate::mapgen::materialize::{boss_node, column_for, start_node};
    use crate::types::NodeCategory;

    fn row(row: usize, width: usize) -> Vec<Node> {
        (0..width)
            .map(|slot| Node {
                id: NodeId::grid(row, slot),
                category: NodeCategory::Question,
                title: "Case Review".to_string(),
                description: None,
                difficulty: 1,
                row,
                column: column_for(slot, width),
                paths: Vec::new(),
                visited: false,
            })
            .collect()
    }

    fn rows(widths: &[usize]) -> Vec<Vec<Node>> {
        widths.iter().enumerate().map(|(index, &width)| row(index + 1, width)).collect()
    }

    fn tuning(cross_link_chance: f64, adopt_orphans: bool) -> ConnectorTuning {
        ConnectorTuning { cross_link_chance, adopt_orphans, boss_entry_width: None }
    }

    fn has_incoming(target: &Node, sources: &[Node]) -> bool {
        sources.iter().any(|node| node.paths.contains(&target.id))
    }

    #[test]
    fn start_links_every_first_row_node() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut start = start_node();
        let mut floor = rows(&[3, 2]);
        connect_floor(&mut rng, &mut start, &mut floor, None, tuning(0.0, true));
        let expected: Vec<NodeId> = floor[0].iter().map(|node| node.id.clone()).collect();
        assert_eq!(start.paths, expected);
    }

    #[test]
    fn forward_links_prefer_nearest_columns() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut start = start_node();
        let mut floor = rows(&[3, 3]);
        connect_floor(&mut rng, &mut start, &mut floor, None, tuning(0.0, false));
        for (slot, node) in floor[0].iter().enumerate() {
            assert!(!node.paths.is_empty() && node.paths.len() <= 2);
            assert_eq!(node.paths[0], NodeId::grid(2, slot), "nearest column is linked first");
        }
    }

    #[test]
    fn every_non_final_node_has_an_outgoing_edge() {
        for seed in 0..32 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut start = start_node();
            let mut floor = rows(&[1, 2, 3, 3, 2, 1]);
            connect_floor(&mut rng, &mut start, &mut floor, None, tuning(0.2, true));
            for current in &floor[..floor.len() - 1] {
                assert!(current.iter().all(|node| !node.paths.is_empty()));
            }
        }
    }

    #[test]
    fn adoption_leaves_no_orphans_between_rows() {
        for seed in 0..64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut start = start_node();
            let mut floor = rows(&[2, 3, 1, 3]);
            connect_floor(&mut rng, &mut start, &mut floor, None, tuning(0.0, true));
            for pair in floor.windows(2) {
                assert!(pair[1].iter().all(|node| has_incoming(node, &pair[0])));
            }
        }
    }

    #[test]
    fn without_adoption_forward_links_stay_within_budget() {
        for seed in 0..64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut start = start_node();
            let mut floor = rows(&[1, 5, 1]);
            connect_floor(&mut rng, &mut start, &mut floor, None, tuning(1.0, false));
            for node in floor.iter().flatten() {
                assert!(node.paths.len() <= MAX_FORWARD_LINKS + 1, "{} over budget", node.id);
            }
        }
    }

    #[test]
    fn a_lone_parent_adopts_every_node_below_it() {
        let mut rng = ChaCha8Rng::seed_from_u64(10);
        let mut start = start_node();
        let mut floor = rows(&[1, 5, 1]);
        connect_floor(&mut rng, &mut start, &mut floor, None, tuning(0.0, true));
        let expected: Vec<NodeId> = (0..5).map(|slot| NodeId::grid(2, slot)).collect();
        let mut linked = floor[0][0].paths.clone();
        linked.sort();
        assert_eq!(linked, expected);
    }

    #[test]
    fn paths_never_contain_duplicates() {
        for seed in 0..32 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut start = start_node();
            let mut floor = rows(&[3, 3, 3]);
            connect_floor(&mut rng, &mut start, &mut floor, None, tuning(1.0, true));
            for node in floor.iter().flatten() {
                let mut unique = node.paths.clone();
                unique.sort();
                unique.dedup();
                assert_eq!(unique.len(), node.paths.len());
            }
        }
    }

    #[test]
    fn certain_cross_link_fills_a_wide_next_row() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut start = start_node();
        let mut floor = rows(&[1, 3]);
        connect_floor(&mut rng, &mut start, &mut floor, None, tuning(1.0, false));
        assert!(floor[0][0].paths.len() >= 2);
    }

    #[test]
    fn empty_intermediate_rows_are_bridged() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let mut start = start_node();
        let mut floor = rows(&[2, 0, 2]);
        connect_floor(&mut rng, &mut start, &mut floor, None, tuning(0.0, true));
        assert!(floor[0].iter().all(|node| !node.paths.is_empty()));
        assert!(floor[2].iter().all(|node| has_incoming(node, &floor[0])));
    }

    #[test]
    fn whole_final_row_links_to_boss_by_default() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut start = start_node();
        let boss = boss_node(&BossConfig::default(), 3);
        let mut floor = rows(&[1, 3]);
        connect_floor(&mut rng, &mut start, &mut floor, Some(&boss), tuning(0.0, true));
        assert!(floor[1].iter().all(|node| node.paths.contains(&boss.id)));
    }

    #[test]
    fn single_boss_entrance_gets_a_second_way_in() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut start = start_node();
        let boss = boss_node(&BossConfig::default(), 3);
        let mut floor = rows(&[1, 3]);
        let tuning = ConnectorTuning { boss_entry_width: Some(1), ..tuning(0.0, true) };
        connect_floor(&mut rng, &mut start, &mut floor, Some(&boss), tuning);
        let entrances = floor[1].iter().filter(|node| node.paths.contains(&boss.id)).count();
        assert_eq!(entrances, 2);
        assert!(floor[1][1].paths.contains(&boss.id), "centered node is always an entrance");
    }

    #[test]
    fn floor_without_rows_links_start_to_boss() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut start = start_node();
        let boss = boss_node(&BossConfig::default(), 1);
        let mut floor: Vec<Vec<Node>> = Vec::new();
        connect_floor(&mut rng, &mut start, &mut floor, Some(&boss), tuning(0.0, true));
        assert_eq!(start.paths, [NodeId::boss()]);
    }
}
