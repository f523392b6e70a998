//! Randomized spanning-tree builder over room cells.
//!
//! A single backtracking cursor walks the room lattice. Each step either adopts an unlinked
//! neighbour two cells away (opening the wall between them) or, once the current room has no
//! directions left to try, moves back to the room that adopted it. The start room is its own
//! parent, which is how the walk knows it is finished.

use log::{debug, trace, warn};

use crate::grid::Maze;
use crate::rng::RandomSource;
use crate::types::{Direction, DirectionSet, Pos, RoomId};

#[derive(Clone, Debug)]
struct RoomNode {
    pos: Pos,
    parent: Option<RoomId>,
    unexplored: DirectionSet,
}

/// Fixed-size arena of every room, indexed by `RoomId` in row-major order.
#[derive(Clone, Debug)]
struct RoomArena {
    columns: usize,
    nodes: Vec<RoomNode>,
}

impl RoomArena {
    fn new(maze: &Maze) -> Self {
        let nodes = maze
            .rooms()
            .map(|pos| RoomNode { pos, parent: None, unexplored: DirectionSet::full() })
            .collect();
        Self { columns: maze.width() / 2, nodes }
    }

    fn id_of(&self, maze: &Maze, pos: Pos) -> Option<RoomId> {
        if !maze.is_room(pos) {
            return None;
        }
        Some(RoomId((pos.y as usize / 2) * self.columns + pos.x as usize / 2))
    }

    fn node(&self, id: RoomId) -> &RoomNode {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: RoomId) -> &mut RoomNode {
        &mut self.nodes[id.0]
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TreeSummary {
    pub rooms: usize,
    pub rooms_linked: usize,
    pub advance_steps: usize,
}

pub struct SpanningTreeBuilder<'m> {
    maze: &'m mut Maze,
    arena: RoomArena,
    root: RoomId,
}

impl<'m> SpanningTreeBuilder<'m> {
    /// Returns `None` when `start` is not a room of this maze (for example a 1x1 grid).
    pub fn new(maze: &'m mut Maze, start: Pos) -> Option<Self> {
        let mut arena = RoomArena::new(maze);
        let root = arena.id_of(maze, start)?;
        arena.node_mut(root).parent = Some(root);
        Some(Self { maze, arena, root })
    }

    pub fn root(&self) -> RoomId {
        self.root
    }

    pub fn position(&self, id: RoomId) -> Pos {
        self.arena.node(id).pos
    }

    pub fn parent(&self, id: RoomId) -> Option<RoomId> {
        self.arena.node(id).parent
    }

    pub fn is_exhausted(&self, id: RoomId) -> bool {
        self.arena.node(id).unexplored.is_empty()
    }

    /// One transition of the cursor: the adopted neighbour, or the parent when `current`
    /// has nothing left to explore.
    pub fn advance<R: RandomSource>(&mut self, current: RoomId, rng: &mut R) -> RoomId {
        while !self.arena.node(current).unexplored.is_empty() {
            let direction = Direction::from_draw(rng.below(4));
            let node = self.arena.node_mut(current);
            if !node.unexplored.contains(direction) {
                continue;
            }
            node.unexplored.remove(direction);

            let from = node.pos;
            let candidate = from.offset(direction, 2);
            let Some(candidate_id) = self.arena.id_of(self.maze, candidate) else {
                continue;
            };
            if self.arena.node(candidate_id).parent.is_some() {
                continue;
            }

            self.arena.node_mut(candidate_id).parent = Some(current);
            self.maze.open(from.midpoint(candidate));
            trace!("linked {from:?} -> {candidate:?} via {direction:?}");
            return candidate_id;
        }

        let parent = self.arena.node(current).parent.unwrap_or(current);
        trace!("backtrack {:?} -> {:?}", self.position(current), self.position(parent));
        parent
    }

    /// Drives the cursor from the root until the root is reached again with no directions left.
    pub fn run<R: RandomSource>(mut self, rng: &mut R) -> TreeSummary {
        // Every room is adopted at most once and exhausted at most once.
        let step_budget = 2 * self.arena.nodes.len() + 1;
        let mut current = self.root;
        let mut advance_steps = 0;

        loop {
            if advance_steps >= step_budget {
                warn!("spanning tree walk stopped after {advance_steps} steps without completing");
                break;
            }
            current = self.advance(current, rng);
            advance_steps += 1;
            if current == self.root && self.is_exhausted(self.root) {
                break;
            }
        }

        let rooms_linked = self.arena.nodes.iter().filter(|node| node.parent.is_some()).count();
        let summary = TreeSummary { rooms: self.arena.nodes.len(), rooms_linked, advance_steps };
        debug!(
            "spanning tree complete: {} of {} rooms linked in {} steps",
            summary.rooms_linked, summary.rooms, summary.advance_steps
        );
        summary
    }
}

/// Grows a perfect maze over `maze` from `start`. A grid without rooms is left untouched.
pub fn build_spanning_tree<R: RandomSource>(
    maze: &mut Maze,
    start: Pos,
    rng: &mut R,
) -> TreeSummary {
    match SpanningTreeBuilder::new(maze, start) {
        Some(builder) => builder.run(rng),
        None => {
            debug!("no room at {start:?}; skipping spanning tree");
            TreeSummary::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, VecDeque};

    use proptest::prelude::*;

    use super::*;
    use crate::config::MazeConfig;
    use crate::grid::START_ROOM;
    use crate::rng::MazeRng;
    use crate::rng::scripted::ScriptedDraws;

    fn blank(width: i64, height: i64) -> Maze {
        Maze::initialize(&MazeConfig::new(width, height, 0).expect("valid config"))
            .expect("allocation should succeed")
    }

    fn reachable_rooms(maze: &Maze, start: Pos) -> usize {
        let mut seen = BTreeSet::from([start]);
        let mut open = VecDeque::from([start]);
        while let Some(pos) = open.pop_front() {
            for direction in Direction::ALL {
                let next = pos.offset(direction, 1);
                if maze.is_open(next) && seen.insert(next) {
                    open.push_back(next);
                }
            }
        }
        seen.iter().filter(|&&p| maze.is_room(p)).count()
    }

    #[test]
    fn three_by_three_grid_has_single_room_and_terminates_immediately() {
        let mut maze = blank(3, 3);
        let mut draws = ScriptedDraws::new(&[0, 1, 2, 3]);
        let summary = build_spanning_tree(&mut maze, START_ROOM, &mut draws);

        assert_eq!(summary, TreeSummary { rooms: 1, rooms_linked: 1, advance_steps: 1 });
        assert_eq!(maze.open_wall_count(), 0);
        assert_eq!(maze.to_string(), "###\n# #\n###\n");
        assert_eq!(draws.consumed(), 4, "each direction is drawn once and found out of bounds");
    }

    #[test]
    fn single_cell_grid_skips_the_walk() {
        let mut maze = blank(1, 1);
        let mut draws = ScriptedDraws::new(&[]);
        let summary = build_spanning_tree(&mut maze, START_ROOM, &mut draws);
        assert_eq!(summary, TreeSummary::default());
        assert_eq!(draws.consumed(), 0);
    }

    #[test]
    fn scripted_five_by_five_walk_builds_expected_tree() {
        // (1,1) +x -> (3,1); (3,1) +y -> (3,3); (3,3) -x -> (1,3); then everything backtracks.
        let mut maze = blank(5, 5);
        let mut draws = ScriptedDraws::new(&[
            0, // (1,1) +x: adopt (3,1)
            1, // (3,1) +y: adopt (3,3)
            2, // (3,3) -x: adopt (1,3)
            3, 3, // (1,3) -y: (1,1) already linked; repeat rejected
            0, // (1,3) +x: (3,3) already linked
            1, // (1,3) +y: out of bounds
            2, // (1,3) -x: out of bounds, exhausted -> back to (3,3)
            0, 3, // (3,3) +x out of bounds, -y: (3,1) already linked
            1, // (3,3) +y out of bounds, exhausted -> back to (3,1)
            0, 2, 3, // (3,1) +x out, -x (1,1) linked, -y out -> back to (1,1)
            1, 2, 3, // (1,1) +y (1,3) linked, -x out, -y out -> root exhausted
        ]);

        let summary = build_spanning_tree(&mut maze, START_ROOM, &mut draws);

        assert_eq!(maze.to_string(), "#####\n#   #\n### #\n#   #\n#####\n");
        assert_eq!(summary.rooms_linked, 4);
        assert_eq!(summary.advance_steps, 7);
        assert_eq!(maze.open_wall_count(), 3);
        assert_eq!(draws.consumed(), 17);
    }

    #[test]
    fn advance_backtracks_to_parent_once_exhausted() {
        let mut maze = blank(5, 3);
        let mut builder = SpanningTreeBuilder::new(&mut maze, START_ROOM).expect("start room");
        let root = builder.root();
        let mut draws = ScriptedDraws::new(&[0, 0, 1, 2, 3, 1, 2, 3]);

        let child = builder.advance(root, &mut draws);
        assert_eq!(builder.position(child), Pos { y: 1, x: 3 });
        assert_eq!(builder.parent(child), Some(root));

        let back = builder.advance(child, &mut draws);
        assert_eq!(back, root);
        assert!(builder.is_exhausted(child));

        let done = builder.advance(root, &mut draws);
        assert_eq!(done, root);
        assert!(builder.is_exhausted(root));
        assert_eq!(builder.parent(root), Some(root));
    }

    #[test]
    fn seeded_walk_links_every_room_with_one_connector_each() {
        for (width, height) in [(5, 5), (7, 3), (21, 21), (31, 11)] {
            let mut maze = blank(width, height);
            let mut rng = MazeRng::from_seed(4_242);
            let summary = build_spanning_tree(&mut maze, START_ROOM, &mut rng);

            assert_eq!(summary.rooms_linked, maze.room_count());
            assert_eq!(maze.open_wall_count(), maze.room_count() - 1);
            assert_eq!(reachable_rooms(&maze, START_ROOM), maze.room_count());
            assert!(summary.advance_steps <= 2 * maze.room_count());
        }
    }

    #[test]
    fn spanning_tree_never_opens_the_outer_ring() {
        let mut maze = blank(15, 9);
        let mut rng = MazeRng::from_seed(9);
        build_spanning_tree(&mut maze, START_ROOM, &mut rng);
        for p in maze.positions() {
            let on_border = p.x == 0 || p.y == 0 || p.x == 14 || p.y == 8;
            if on_border {
                assert!(!maze.is_open(p), "border cell {p:?} opened by the tree");
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]
        #[test]
        fn perfect_maze_is_a_tree_over_all_rooms(
            seed in any::<u64>(),
            half_width in 1_i64..12,
            half_height in 1_i64..12,
        ) {
            let mut maze = blank(half_width * 2 + 1, half_height * 2 + 1);
            let mut rng = MazeRng::from_seed(seed);
            build_spanning_tree(&mut maze, START_ROOM, &mut rng);

            prop_assert_eq!(maze.open_wall_count(), maze.room_count() - 1);
            prop_assert_eq!(reachable_rooms(&maze, START_ROOM), maze.room_count());
        }
    }
}
