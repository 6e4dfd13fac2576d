//! Iterative-deepening generation of the corner distance table.
//!
//! Each level runs a depth-bounded DFS from the solved configuration using an
//! explicit stack. Nodes at the level's depth are recorded in the table
//! (first writer wins); shallower nodes are expanded. Within a level a second
//! table remembers the smallest distance at which each index was scheduled,
//! so a state is only re-expanded when reached by a strictly shorter path.
//! Because every level starts over from the root, the first level that
//! records an index is its true distance.

use log::{debug, info};
use thiserror::Error;

use crate::cube::CornerConfiguration;
use crate::encoding::{encode, NUM_STATES};
use crate::moves::{should_skip, Move};
use crate::table::{CornerTable, MAX_NIBBLE};

/// Marker value for "not scheduled during this level".
const UNSCHEDULED: u8 = MAX_NIBBLE;

/// Knobs for a generation run.
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    /// Emit a progress line every this many popped nodes (0 disables it).
    pub progress_interval: u64,
    /// Stop once this many entries have been recorded.
    pub entry_limit: Option<usize>,
    /// Stop after the level at this depth has been fully explored.
    pub max_depth: Option<u8>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            progress_interval: 1 << 18,
            entry_limit: None,
            max_depth: None,
        }
    }
}

/// How a generation run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// Every index in the table has its exact distance.
    Complete { traversed: u64 },
    /// The run was cut short by `entry_limit` or `max_depth`.
    Partial {
        entries: usize,
        depth: u8,
        traversed: u64,
    },
}

impl GenerateOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, GenerateOutcome::Complete { .. })
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GenerateError {
    #[error(
        "search exhausted depth {depth} with only {entries} entries recorded; \
         remaining states are unreachable or too deep for a 4-bit table"
    )]
    DepthOverflow { depth: u8, entries: usize },
}

/// A pending state on the traversal stack.
struct FrontierNode<C> {
    configuration: C,
    last_move: Option<Move>,
    distance: u8,
}

/// Traversal state owned by a single generation run.
struct Frontier<C> {
    stack: Vec<FrontierNode<C>>,
    /// Smallest distance at which each index was pushed during the current level.
    scheduled: CornerTable,
}

impl<C: CornerConfiguration> Frontier<C> {
    fn new() -> Self {
        Self {
            stack: Vec::new(),
            scheduled: CornerTable::filled(UNSCHEDULED),
        }
    }

    /// Starts a new level from the root.
    ///
    /// The root is marked at distance 0 so the solved configuration is never
    /// rescheduled; its zero entry is indistinguishable from "unset" and
    /// must not be overwritten.
    fn restart(&mut self, root: &C, root_index: usize) {
        self.scheduled.fill(UNSCHEDULED);
        self.scheduled.set(root_index, 0);
        self.stack.push(FrontierNode {
            configuration: root.clone(),
            last_move: None,
            distance: 0,
        });
    }

    /// Pushes every non-redundant successor of `node` not already scheduled
    /// at the same or a smaller distance.
    fn expand(&mut self, node: &FrontierNode<C>) {
        let next_distance = node.distance + 1;
        for mv in Move::ALL {
            if should_skip(mv, node.last_move) {
                continue;
            }

            let configuration = node.configuration.apply_move(mv);
            let index = encode(&configuration);
            if self.scheduled.get(index) <= next_distance {
                continue;
            }
            self.scheduled.set(index, next_distance);

            self.stack.push(FrontierNode {
                configuration,
                last_move: Some(mv),
                distance: next_distance,
            });
        }
    }
}

/// Fills `table` with the distance of every corner configuration from `solved`.
///
/// The table is cleared first. On [`GenerateOutcome::Partial`] only entries
/// up to the reported depth are meaningful; such a table must not be used as
/// a complete heuristic.
pub fn generate<C: CornerConfiguration>(
    table: &mut CornerTable,
    solved: &C,
    config: &GeneratorConfig,
) -> Result<GenerateOutcome, GenerateError> {
    table.clear();

    let root_index = encode(solved);
    let mut frontier = Frontier::new();
    let mut depth: Option<u8> = None;
    let mut entries = 0usize;
    let mut traversed = 0u64;

    while entries < NUM_STATES {
        let Some(node) = frontier.stack.pop() else {
            // the current level is fully explored; go one deeper
            if let Some(finished) = depth {
                debug!("depth {finished} done: {entries}/{NUM_STATES} entries, {traversed} traversed");
                if config.max_depth.is_some_and(|max| finished >= max) {
                    return Ok(GenerateOutcome::Partial {
                        entries,
                        depth: finished,
                        traversed,
                    });
                }
            }

            let next = depth.map_or(0, |d| d + 1);
            if next >= UNSCHEDULED {
                return Err(GenerateError::DepthOverflow {
                    depth: next - 1,
                    entries,
                });
            }
            depth = Some(next);
            frontier.restart(solved, root_index);
            continue;
        };
        let current_depth = depth.unwrap_or_default();

        traversed += 1;
        if config.progress_interval > 0 && traversed % config.progress_interval == 0 {
            info!(
                "{entries}/{NUM_STATES} hashed, on level {current_depth}, total traversed {traversed} ({}%)",
                entries * 100 / NUM_STATES
            );
        }

        if node.distance == current_depth {
            let index = encode(&node.configuration);
            if table.set_if_unset(index, node.distance) {
                entries += 1;
                if config.entry_limit.is_some_and(|limit| entries >= limit) {
                    return Ok(GenerateOutcome::Partial {
                        entries,
                        depth: current_depth,
                        traversed,
                    });
                }
            }
        } else {
            frontier.expand(&node);
        }
    }

    info!("{entries}/{NUM_STATES} hashed after {traversed} traversed nodes");
    Ok(GenerateOutcome::Complete { traversed })
}
