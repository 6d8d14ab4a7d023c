use log::{debug, warn};

use crate::domain::models::{HalfPoints, PlayerId};

/// Node limit on the improvement search. The first descent is always
/// carried to completion regardless, so a matching is returned even on
/// pathological inputs; only the hunt for a cheaper one is bounded.
const MAX_SEARCH_NODES: u64 = 200_000;

/// Pairing candidate, listed in global rank order
#[derive(Debug, Clone)]
pub struct MatchSeed {
    pub id: PlayerId,
    pub score: HalfPoints,
}

/// Perfect matching over seed indices with its cost
#[derive(Debug, Clone)]
pub struct Matching {
    /// (higher-ranked index, lower-ranked index), in rank order
    pub pairs: Vec<(usize, usize)>,
    pub rematches: u32,
    /// Summed score distance between opponents, in half-points
    pub spread: HalfPoints,
}

/// Find the perfect matching minimizing (rematches, summed score distance),
/// lexicographically.
///
/// Branch-and-bound backtracking over the rank-ordered seeds: candidates
/// for the highest unpaired player are tried rematch-free first, nearest
/// score first, fold partner first, so the first descent already is a fold
/// pairing and equal-cost alternatives never displace it.
///
/// When the node limit truncates the search the best matching found so far
/// is returned and a warning is logged; on a very large field with dense
/// rematch history that result may keep an avoidable rematch.
pub fn find_matching(seeds: &[MatchSeed], played: &[Vec<bool>]) -> Option<Matching> {
    find_matching_bounded(seeds, played, MAX_SEARCH_NODES)
}

fn find_matching_bounded(
    seeds: &[MatchSeed],
    played: &[Vec<bool>],
    max_nodes: u64,
) -> Option<Matching> {
    debug_assert!(seeds.len() % 2 == 0);

    if seeds.is_empty() {
        return Some(Matching {
            pairs: Vec::new(),
            rematches: 0,
            spread: 0,
        });
    }

    let mut search = Search {
        seeds,
        played,
        max_nodes,
        paired: vec![false; seeds.len()],
        pairs: Vec::with_capacity(seeds.len() / 2),
        rematches: 0,
        spread: 0,
        best: None,
        nodes: 0,
        truncated: false,
    };
    search.explore();
    if search.truncated {
        warn!(
            "matching search over {} players stopped at the {} node limit; \
             keeping the best matching found so far",
            seeds.len(),
            max_nodes
        );
    }
    debug!(
        "matching search over {} players visited {} nodes",
        seeds.len(),
        search.nodes
    );
    search.best
}

struct Search<'a> {
    seeds: &'a [MatchSeed],
    played: &'a [Vec<bool>],
    max_nodes: u64,
    paired: Vec<bool>,
    pairs: Vec<(usize, usize)>,
    rematches: u32,
    spread: HalfPoints,
    best: Option<Matching>,
    nodes: u64,
    truncated: bool,
}

impl Search<'_> {
    fn explore(&mut self) {
        self.nodes += 1;
        // The budget never cuts off the first descent; a complete matching
        // is always in hand before truncation can trigger
        if self.best.is_some() && self.nodes > self.max_nodes {
            self.truncated = true;
            return;
        }
        if self.partial_cannot_improve() {
            return;
        }

        let Some(first) = self.first_unpaired() else {
            self.record_complete();
            return;
        };

        for candidate in self.candidates(first) {
            self.pair(first, candidate);
            self.explore();
            self.unpair(first, candidate);
        }
    }

    fn first_unpaired(&self) -> Option<usize> {
        self.paired.iter().position(|&p| !p)
    }

    /// Cost only grows as pairs are added, so a partial matching already
    /// at or above the best complete cost is a dead branch
    fn partial_cannot_improve(&self) -> bool {
        match &self.best {
            Some(best) => (self.rematches, self.spread) >= (best.rematches, best.spread),
            None => false,
        }
    }

    fn record_complete(&mut self) {
        let better = match &self.best {
            Some(best) => (self.rematches, self.spread) < (best.rematches, best.spread),
            None => true,
        };
        if better {
            self.best = Some(Matching {
                pairs: self.pairs.clone(),
                rematches: self.rematches,
                spread: self.spread,
            });
        }
    }

    /// Candidate opponents for `i`, ordered by (rematch, score distance,
    /// fold preference, rank). The fold target for the top of a bracket of
    /// m unpaired players is the player half the bracket below.
    fn candidates(&self, i: usize) -> Vec<usize> {
        let score = self.seeds[i].score;

        let same_bracket: Vec<usize> = (i + 1..self.seeds.len())
            .filter(|&j| !self.paired[j] && self.seeds[j].score == score)
            .collect();
        let bracket_size = same_bracket.len() + 1;
        let fold_target = (bracket_size / 2).saturating_sub(1);

        let mut keyed: Vec<((u32, HalfPoints, usize, usize), usize)> = (i + 1..self.seeds.len())
            .filter(|&j| !self.paired[j])
            .map(|j| {
                let rematch = u32::from(self.played[i][j]);
                let distance = (score - self.seeds[j].score).abs();
                let fold_rank = same_bracket
                    .iter()
                    .position(|&s| s == j)
                    .map(|pos| pos.abs_diff(fold_target))
                    .unwrap_or(0);
                ((rematch, distance, fold_rank, j), j)
            })
            .collect();

        keyed.sort_by_key(|(key, _)| *key);
        keyed.into_iter().map(|(_, j)| j).collect()
    }

    fn pair(&mut self, i: usize, j: usize) {
        self.paired[i] = true;
        self.paired[j] = true;
        self.pairs.push((i, j));
        self.rematches += u32::from(self.played[i][j]);
        self.spread += (self.seeds[i].score - self.seeds[j].score).abs();
    }

    fn unpair(&mut self, i: usize, j: usize) {
        self.paired[i] = false;
        self.paired[j] = false;
        self.pairs.pop();
        self.rematches -= u32::from(self.played[i][j]);
        self.spread -= (self.seeds[i].score - self.seeds[j].score).abs();
    }
}
