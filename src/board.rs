// Board layout: snakes, ladders and the token cost of each snake

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{GameError, Result};

pub const STANDARD_BOARD_SIZE: u32 = 100;

/// Smallest board a game can be played on
pub const MIN_BOARD_SIZE: u32 = 1;

/// Ladders of the standard board (bottom, top)
const STANDARD_LADDERS: [(u32, u32); 8] = [
    (1, 38),
    (4, 14),
    (9, 31),
    (21, 42),
    (28, 84),
    (36, 44),
    (51, 67),
    (71, 91),
];

/// Snakes of the standard board (head, tail)
const STANDARD_SNAKES: [(u32, u32); 9] = [
    (98, 79),
    (93, 73),
    (64, 60),
    (54, 34),
    (62, 19),
    (87, 24),
    (45, 15),
    (11, 10),
    (49, 5),
];

// Procedural generation constants
const ZONES: i64 = 4;
const MIN_LADDER_CLIMB: i64 = 10;
const LADDER_SPACING: i64 = 5;
const LADDER_TOP_ATTEMPTS: usize = 15;
const FIRST_SNAKE_HEAD: i64 = 20;
const LADDER_TOP_CLEARANCE: i64 = 3;
const MIN_SNAKE_DROP: i64 = 10;
const MAX_SNAKE_DROP: i64 = 30;
const TAIL_SPACING: i64 = 3;
const SNAKE_TAIL_ATTEMPTS: usize = 10;

/// Tokens needed to neutralize a snake of the given length
pub fn snake_cost_for_length(length: u32) -> u32 {
    if length > 25 {
        3
    } else if length > 15 {
        2
    } else {
        1
    }
}

/// Immutable snake and ladder placement for one game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardLayout {
    size: u32,
    snakes: BTreeMap<u32, u32>,
    ladders: BTreeMap<u32, u32>,
    snake_costs: BTreeMap<u32, u32>,
}

impl BoardLayout {
    /// The fixed 100-square preset used in normal play
    pub fn standard() -> Self {
        Self::build(
            STANDARD_BOARD_SIZE,
            STANDARD_SNAKES.iter().copied().collect(),
            STANDARD_LADDERS.iter().copied().collect(),
        )
    }

    /// Builds a layout from explicit snakes `(head, tail)` and ladders `(bottom, top)`
    ///
    /// Every endpoint must lie in `1..=size`, snakes must go down, ladders must go up,
    /// and no square may start both a snake and a ladder.
    pub fn from_parts<S, L>(size: u32, snakes: S, ladders: L) -> Result<Self>
    where
        S: IntoIterator<Item = (u32, u32)>,
        L: IntoIterator<Item = (u32, u32)>,
    {
        if size == 0 {
            return Err(GameError::InvalidBoard("board size must be positive".into()));
        }
        let in_bounds = |square: u32| (1..=size).contains(&square);

        let mut snake_map = BTreeMap::new();
        for (head, tail) in snakes {
            if !in_bounds(head) || !in_bounds(tail) {
                return Err(GameError::InvalidBoard(format!(
                    "snake {}->{} leaves the board",
                    head, tail
                )));
            }
            if head <= tail {
                return Err(GameError::InvalidBoard(format!(
                    "snake {}->{} does not go down",
                    head, tail
                )));
            }
            if snake_map.insert(head, tail).is_some() {
                return Err(GameError::InvalidBoard(format!(
                    "two snakes start at {}",
                    head
                )));
            }
        }

        let mut ladder_map = BTreeMap::new();
        for (bottom, top) in ladders {
            if !in_bounds(bottom) || !in_bounds(top) {
                return Err(GameError::InvalidBoard(format!(
                    "ladder {}->{} leaves the board",
                    bottom, top
                )));
            }
            if top <= bottom {
                return Err(GameError::InvalidBoard(format!(
                    "ladder {}->{} does not go up",
                    bottom, top
                )));
            }
            if snake_map.contains_key(&bottom) {
                return Err(GameError::InvalidBoard(format!(
                    "square {} is both a snake head and a ladder bottom",
                    bottom
                )));
            }
            if ladder_map.insert(bottom, top).is_some() {
                return Err(GameError::InvalidBoard(format!(
                    "two ladders start at {}",
                    bottom
                )));
            }
        }

        Ok(Self::build(size, snake_map, ladder_map))
    }

    /// Randomly generated layout for boards other than the standard one
    ///
    /// Ladders are spread over four horizontal zones and always climb into a
    /// higher zone. Snake heads keep clear of ladder tops, and snake tails keep
    /// clear of ladder bottoms and of each other.
    pub fn generate<R: Rng + ?Sized>(
        size: u32,
        num_snakes: usize,
        num_ladders: usize,
        rng: &mut R,
    ) -> Self {
        let size = size.max(MIN_BOARD_SIZE);
        let board = size as i64;
        let zone_size = board / ZONES;

        let mut ladders: BTreeMap<u32, u32> = BTreeMap::new();
        let mut ladder_bottoms: Vec<i64> = Vec::new();
        let mut ladder_tops: Vec<i64> = Vec::new();

        let per_zone = (num_ladders as i64 / ZONES).max(1);
        let mut remaining = num_ladders as i64;

        for zone in 0..ZONES {
            let zone_start = 1 + zone * zone_size;
            let mut zone_end = (board - 10).min((zone + 1) * zone_size);
            if zone == ZONES - 1 {
                // Keep the run-in to the last square ladder free
                zone_end = zone_end.min(board - 15);
            }

            let mut candidates: Vec<i64> = (zone_start..zone_end - 10).collect();
            candidates.shuffle(rng);
            let mut candidates = candidates.into_iter();

            for _ in 0..per_zone.min(remaining) {
                if remaining <= 0 {
                    break;
                }
                let bottom = match candidates.by_ref().find(|c| {
                    ladder_bottoms
                        .iter()
                        .all(|b| (c - b).abs() >= LADDER_SPACING)
                }) {
                    Some(bottom) => bottom,
                    None => break,
                };

                let min_top_zone = (zone + 1).min(ZONES - 1);
                let min_top = bottom + MIN_LADDER_CLIMB;
                let max_top = board - 1;

                for _ in 0..LADDER_TOP_ATTEMPTS {
                    let target_zone = rng.random_range(min_top_zone..=ZONES - 1);
                    let lo = min_top.max(1 + target_zone * zone_size);
                    let hi = max_top.min((target_zone + 1) * zone_size);
                    if lo >= hi {
                        continue;
                    }

                    let top = rng.random_range(lo..=hi);
                    if ladder_tops.iter().all(|t| (top - t).abs() >= LADDER_SPACING) {
                        ladders.insert(bottom as u32, top as u32);
                        ladder_bottoms.push(bottom);
                        ladder_tops.push(top);
                        remaining -= 1;
                        break;
                    }
                }
            }
        }

        let mut heads: Vec<i64> = (FIRST_SNAKE_HEAD..board)
            .filter(|h| {
                ladder_tops
                    .iter()
                    .all(|t| (h - t).abs() > LADDER_TOP_CLEARANCE)
                    && !ladder_bottoms.contains(h)
            })
            .collect();
        heads.shuffle(rng);

        let mut snakes: BTreeMap<u32, u32> = BTreeMap::new();
        let mut snake_tails: Vec<i64> = Vec::new();
        for head in heads.into_iter().take(num_snakes) {
            let min_tail = (head - MAX_SNAKE_DROP).max(1);
            let max_tail = min_tail.max(head - MIN_SNAKE_DROP);

            for _ in 0..SNAKE_TAIL_ATTEMPTS {
                let tail = rng.random_range(min_tail..=max_tail);
                let clear_of_ladders = ladder_bottoms
                    .iter()
                    .all(|b| (tail - b).abs() >= TAIL_SPACING);
                let clear_of_tails = snake_tails
                    .iter()
                    .all(|t| (tail - t).abs() >= TAIL_SPACING);
                if clear_of_ladders && clear_of_tails {
                    snakes.insert(head as u32, tail as u32);
                    snake_tails.push(tail);
                    break;
                }
            }
        }

        debug!(
            "Generated {}-square board with {} snakes and {} ladders",
            size,
            snakes.len(),
            ladders.len()
        );
        Self::build(size, snakes, ladders)
    }

    /// Same layout with the snake cost table emptied
    #[cfg(test)]
    pub(crate) fn without_snake_costs(mut self) -> Self {
        self.snake_costs.clear();
        self
    }

    fn build(size: u32, snakes: BTreeMap<u32, u32>, ladders: BTreeMap<u32, u32>) -> Self {
        let snake_costs = snakes
            .iter()
            .map(|(&head, &tail)| (head, snake_cost_for_length(head - tail)))
            .collect();
        BoardLayout {
            size,
            snakes,
            ladders,
            snake_costs,
        }
    }

    /// Number of the last square
    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn snakes(&self) -> &BTreeMap<u32, u32> {
        &self.snakes
    }

    pub fn ladders(&self) -> &BTreeMap<u32, u32> {
        &self.ladders
    }

    pub fn is_snake_head(&self, square: u32) -> bool {
        self.snakes.contains_key(&square)
    }

    pub fn snake_tail(&self, head: u32) -> Option<u32> {
        self.snakes.get(&head).copied()
    }

    pub fn ladder_top(&self, bottom: u32) -> Option<u32> {
        self.ladders.get(&bottom).copied()
    }

    /// Tokens needed to neutralize the snake whose head is at `head`
    pub fn snake_cost(&self, head: u32) -> Option<u32> {
        self.snake_costs.get(&head).copied()
    }

    /// Length of the snake at `square`, or 0 if no snake starts there
    pub fn snake_length(&self, square: u32) -> u32 {
        self.snake_tail(square).map_or(0, |tail| square - tail)
    }

    /// Snake heads in `(from, from + distance]`
    pub fn snake_heads_ahead(&self, from: u32, distance: u32) -> usize {
        if distance == 0 {
            return 0;
        }
        let end = from.saturating_add(distance);
        self.snakes.range(from.saturating_add(1)..=end).count()
    }
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self::standard()
    }
}
