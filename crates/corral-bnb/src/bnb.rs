// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Branch-and-Bound solver for the enclosure problem.
//!
//! This module implements a stateful search engine that explores wall
//! placements over a fixed candidate ordering while pruning suboptimal
//! branches using bounds and an incumbent solution. The `BnbSolver` manages
//! reusable internal structures (the reachability engine's BFS buffers, a
//! blocked-cell bitset, and the DFS stack), supports warm starts via a
//! shared incumbent, and accepts a fixed decision prefix when exploring a
//! restricted subtree (the parallel driver's splitting mechanism).
//!
//! Every node is evaluated exactly once. The evaluation drives all three
//! pruning rules: bound domination against the incumbent, closing enclosed
//! subtrees, and skipping candidates outside the current closure. A search
//! session object encapsulates per-run state, statistics, and timing,
//! enabling reproducible and debuggable runs. The design emphasizes
//! determinism: with the same grid and candidate ordering, the search visits
//! the same nodes in the same order on every run.

use crate::{
    incumbent::{IncumbentStore, NoSharedIncumbent, SharedIncumbentAdapter},
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    result::BnbSolverOutcome,
    stats::BnbSolverStatistics,
};
use corral_model::{
    grid::GridModel,
    index::CellIndex,
    rules::ScoreRules,
    solution::{Placement, Solution},
};
use corral_reach::engine::ReachabilityEngine;
use corral_search::{incumbent::SharedIncumbent, monitor::search_monitor::SearchCommand};
use fixedbitset::FixedBitSet;
use smallvec::SmallVec;

/// A fixed decision prefix restricting the search to one subtree.
///
/// The first `decided` candidates are treated as already branched on:
/// the ones listed in `walls` were blocked, the rest were left open. The
/// search then continues branching from candidate `decided` onwards. The
/// root of the full tree is the empty prefix.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchPrefix {
    decided: usize,
    walls: Vec<CellIndex>,
}

impl SearchPrefix {
    /// Creates a prefix with the first `decided` candidates fixed, of
    /// which `walls` were blocked.
    #[inline]
    pub fn new(decided: usize, walls: Vec<CellIndex>) -> Self {
        debug_assert!(
            walls.len() <= decided,
            "called `SearchPrefix::new` with more walls than decided candidates: {} walls but {} decided",
            walls.len(),
            decided
        );
        Self { decided, walls }
    }

    /// The prefix of the full search tree: nothing decided yet.
    #[inline]
    pub fn root() -> Self {
        Self::default()
    }

    /// Number of candidates already branched on.
    #[inline]
    pub fn decided(&self) -> usize {
        self.decided
    }

    /// The blocked cells among the decided candidates.
    #[inline]
    pub fn walls(&self) -> &[CellIndex] {
        &self.walls
    }
}

/// A node of the DFS stack: the walls placed along this branch and the
/// index of the next candidate to branch on.
#[derive(Clone, Debug)]
struct SearchNode {
    next: usize,
    walls: SmallVec<[CellIndex; 8]>,
}

/// A branch-and-bound solver for the enclosure problem using depth-first
/// backtracking search with bound-based pruning. Branching is binary per
/// candidate cell (block it, or leave it open forever), which makes every
/// leaf a distinct subset of the candidate universe without duplicates.
#[derive(Debug, Clone)]
pub struct BnbSolver {
    engine: ReachabilityEngine,
    blocked: FixedBitSet,
    stack: Vec<SearchNode>,
}

impl Default for BnbSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl BnbSolver {
    /// Creates a new solver with the default scoring rules.
    #[inline]
    pub fn new() -> Self {
        Self::with_rules(ScoreRules::default())
    }

    /// Creates a new solver with the given scoring rules.
    #[inline]
    pub fn with_rules(rules: ScoreRules) -> Self {
        Self {
            engine: ReachabilityEngine::with_rules(rules),
            blocked: FixedBitSet::new(),
            stack: Vec::new(),
        }
    }

    /// Returns the scoring rules used by this solver.
    #[inline]
    pub fn rules(&self) -> ScoreRules {
        self.engine.rules()
    }

    /// Solves the given grid over the candidate ordering using the provided
    /// `TreeSearchMonitor`. This variant does not use a shared incumbent and
    /// thus acts as a standalone, single threaded solver.
    #[inline]
    pub fn solve<S>(
        &mut self,
        grid: &GridModel,
        candidates: &[CellIndex],
        monitor: S,
    ) -> BnbSolverOutcome
    where
        S: TreeSearchMonitor,
    {
        let backing = NoSharedIncumbent::new();
        self.solve_internal(grid, candidates, &SearchPrefix::root(), monitor, backing)
    }

    /// Solves the given grid using the provided `TreeSearchMonitor` and
    /// `SharedIncumbent`. The branch-and-bound algorithm will use the
    /// incumbent to prune branches that cannot improve upon the shared best
    /// solution, and will publish every improvement it finds.
    #[inline]
    pub fn solve_with_incumbent<S>(
        &mut self,
        grid: &GridModel,
        candidates: &[CellIndex],
        monitor: S,
        incumbent: &SharedIncumbent,
    ) -> BnbSolverOutcome
    where
        S: TreeSearchMonitor,
    {
        let backing = SharedIncumbentAdapter::new(incumbent);
        self.solve_internal(grid, candidates, &SearchPrefix::root(), monitor, backing)
    }

    /// Solves one subtree of the search: the decisions in `prefix` are taken
    /// as fixed and branching starts at candidate `prefix.decided()`. Used by
    /// the parallel driver to split the root across workers, all pruning
    /// against the same shared incumbent.
    #[inline]
    pub fn solve_with_prefix<S>(
        &mut self,
        grid: &GridModel,
        candidates: &[CellIndex],
        prefix: &SearchPrefix,
        monitor: S,
        incumbent: &SharedIncumbent,
    ) -> BnbSolverOutcome
    where
        S: TreeSearchMonitor,
    {
        let backing = SharedIncumbentAdapter::new(incumbent);
        self.solve_internal(grid, candidates, prefix, monitor, backing)
    }

    /// Internal solve method that takes an `IncumbentStore`, which is
    /// usually either a `NoSharedIncumbent` or a `SharedIncumbentAdapter`.
    #[inline(always)]
    fn solve_internal<S, I>(
        &mut self,
        grid: &GridModel,
        candidates: &[CellIndex],
        prefix: &SearchPrefix,
        mut monitor: S,
        backing: I,
    ) -> BnbSolverOutcome
    where
        S: TreeSearchMonitor,
        I: IncumbentStore,
    {
        debug_assert!(
            prefix.decided() <= candidates.len(),
            "called `BnbSolver::solve_internal` with prefix out of bounds: the len is {} but the prefix decided {}",
            candidates.len(),
            prefix.decided()
        );
        debug_assert!(
            prefix.walls().len() <= grid.budget(),
            "called `BnbSolver::solve_internal` with prefix exceeding the budget: the budget is {} but the prefix holds {} walls",
            grid.budget(),
            prefix.walls().len()
        );

        let session =
            BnbSearchSession::new(self, grid, candidates, prefix, &mut monitor, backing);
        let res = session.run();
        self.reset();
        res
    }

    /// Resets the per-run state, keeping allocated capacities.
    #[inline]
    fn reset(&mut self) {
        self.stack.clear();
        self.blocked.clear();
    }
}

/// A search session for the branch-and-bound solver. This struct
/// encapsulates the state and logic of a single search run.
struct BnbSearchSession<'a, S, I>
where
    S: TreeSearchMonitor,
    I: IncumbentStore,
{
    solver: &'a mut BnbSolver,
    grid: &'a GridModel,
    candidates: &'a [CellIndex],
    monitor: &'a mut S,
    incumbent: I,
    best_score: i64,
    best_solution: Option<Solution>,
    stats: BnbSolverStatistics,
    start_time: std::time::Instant,
}

impl<'a, S, I> BnbSearchSession<'a, S, I>
where
    S: TreeSearchMonitor,
    I: IncumbentStore,
{
    /// Creates a new search session with the prefix as its root node.
    #[inline]
    fn new(
        solver: &'a mut BnbSolver,
        grid: &'a GridModel,
        candidates: &'a [CellIndex],
        prefix: &SearchPrefix,
        monitor: &'a mut S,
        backing: I,
    ) -> Self {
        let best_score = backing.initial_lower_bound();
        solver.stack.push(SearchNode {
            next: prefix.decided(),
            walls: SmallVec::from_slice(prefix.walls()),
        });

        Self {
            solver,
            grid,
            candidates,
            monitor,
            incumbent: backing,
            best_score,
            best_solution: None,
            stats: BnbSolverStatistics::default(),
            start_time: std::time::Instant::now(),
        }
    }

    /// Runs the search session to termination.
    #[inline]
    fn run(mut self) -> BnbSolverOutcome {
        self.monitor.on_enter_search(self.grid, &self.stats);

        let aborted: Option<String> = loop {
            self.best_score = self.incumbent.tighten(self.best_score);
            self.monitor.on_step(&self.stats);

            if let SearchCommand::Terminate(msg) = self.monitor.search_command(&self.stats) {
                break Some(msg);
            }

            match self.solver.stack.pop() {
                Some(node) => self.process(node),
                None => break None,
            }
        };

        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);
        self.finalize_result(aborted)
    }

    /// Finalizes the solver result based on the best solution found and the
    /// termination reason. When nothing was installed, the empty placement
    /// scored as escaped stands in; it is the optimum whenever the tree was
    /// exhausted without finding any enclosure.
    #[inline]
    fn finalize_result(self, aborted: Option<String>) -> BnbSolverOutcome {
        let solution = self
            .best_solution
            .unwrap_or_else(|| Solution::new(Placement::empty(), 0, true));
        match aborted {
            None => BnbSolverOutcome::optimal(solution, self.stats),
            Some(msg) => BnbSolverOutcome::aborted(solution, msg, self.stats),
        }
    }

    /// Evaluates the node's placement against the grid, reusing the
    /// solver's blocked bitset across nodes.
    #[inline(always)]
    fn evaluate_node(&mut self, node: &SearchNode) -> corral_reach::engine::Evaluation {
        let solver = &mut *self.solver;
        solver.blocked.grow(self.grid.num_cells());
        solver.blocked.clear();
        for &cell in node.walls.iter() {
            solver.blocked.insert(cell.get());
        }
        solver.engine.evaluate_blocked(self.grid, &solver.blocked)
    }

    /// Expands one node: evaluate, prune or install, branch.
    fn process(&mut self, node: SearchNode) {
        self.stats.on_node_explored();

        let eval = self.evaluate_node(&node);
        self.stats.on_evaluation();

        let bound = eval.raw_score();
        self.monitor
            .on_bound_computed(node.walls.len(), bound, &self.stats);
        if self.stats.nodes_explored == 1 {
            self.stats.set_root_upper_bound(bound);
        }

        // Walls only ever shrink the closure, so the raw score of this node
        // dominates every descendant's score.
        if bound <= self.best_score {
            self.stats.on_pruning_bound();
            self.monitor
                .on_prune(PruneReason::BoundDominated, &self.stats);
            return;
        }

        if !eval.escaped() {
            // The node encloses the agent. Its score equals the bound, which
            // beats the incumbent, and no descendant can improve on it.
            let score = eval.score();
            debug_assert!(score > self.best_score);
            let solution = Solution::new(Placement::new(node.walls.to_vec()), score, false);
            self.best_score = score;
            self.incumbent.on_solution_found(&solution);
            self.stats.on_solution_found();
            self.monitor.on_solution_found(&solution, &self.stats);
            self.best_solution = Some(solution);

            self.stats.on_subtree_enclosed();
            self.monitor.on_prune(PruneReason::Enclosed, &self.stats);
            return;
        }

        debug_assert!(
            node.walls.len() <= self.grid.budget(),
            "called `BnbSearchSession::process` with walls out of budget: the budget is {} but the node holds {} walls",
            self.grid.budget(),
            node.walls.len()
        );
        if node.walls.len() == self.grid.budget() {
            self.stats.on_pruning_exhausted();
            self.monitor.on_prune(PruneReason::Exhausted, &self.stats);
            return;
        }

        // Blocking a cell outside the current closure cannot change any
        // descendant's closure, so such candidates are skipped for good.
        let branch = (node.next..self.candidates.len())
            .find(|&index| eval.raw_reachable(self.candidates[index]));
        let Some(index) = branch else {
            self.stats.on_pruning_exhausted();
            self.monitor.on_prune(PruneReason::Exhausted, &self.stats);
            return;
        };

        // Push the open child first so the blocking child is explored first;
        // placing walls is what drives the search towards enclosures.
        let mut blocked_walls = node.walls.clone();
        blocked_walls.push(self.candidates[index]);
        let depth = blocked_walls.len() as u64;
        self.solver.stack.push(SearchNode {
            next: index + 1,
            walls: node.walls,
        });
        self.solver.stack.push(SearchNode {
            next: index + 1,
            walls: blocked_walls,
        });

        self.stats.on_decision_generated();
        self.stats.on_decision_generated();
        self.stats.on_depth_update(depth);
        self.monitor.on_decisions_enqueued(2, &self.stats);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::no_op::NoOperationMonitor;
    use corral_model::grid::{GridBuilder, Terrain};
    use corral_model::index::ChannelIndex;
    use corral_reach::candidates::{candidates, frontier_ordering, CandidatePolicy};

    fn open_grid(rows: usize, cols: usize, origin: (usize, usize), budget: i64) -> GridModel {
        let mut builder = GridBuilder::new(rows, cols);
        builder.set_origin(builder.cell_at(origin.0, origin.1));
        builder.set_budget(budget);
        builder.build().unwrap()
    }

    fn ordered_candidates(grid: &GridModel) -> Vec<CellIndex> {
        let mut cells = candidates(grid, &CandidatePolicy::default());
        frontier_ordering(grid, &mut cells);
        cells
    }

    /// Exhaustively checks every placement of at most `budget` walls.
    fn brute_force_best(grid: &GridModel, candidates: &[CellIndex]) -> i64 {
        fn recurse(
            engine: &mut ReachabilityEngine,
            grid: &GridModel,
            candidates: &[CellIndex],
            start: usize,
            walls: &mut Vec<CellIndex>,
            best: &mut i64,
        ) {
            let eval = engine.evaluate(grid, &Placement::new(walls.clone()));
            *best = (*best).max(eval.score());
            if walls.len() == grid.budget() {
                return;
            }
            for index in start..candidates.len() {
                walls.push(candidates[index]);
                recurse(engine, grid, candidates, index + 1, walls, best);
                walls.pop();
            }
        }

        let mut engine = ReachabilityEngine::new();
        let mut best = 0;
        recurse(&mut engine, grid, candidates, 0, &mut Vec::new(), &mut best);
        best
    }

    #[test]
    fn test_open_grid_optimal_is_four_neighbor_ring() {
        let grid = open_grid(5, 5, (2, 2), 4);
        let cells = ordered_candidates(&grid);
        let mut solver = BnbSolver::new();
        let outcome = solver.solve(&grid, &cells, NoOperationMonitor::new());

        assert!(outcome.is_optimal());
        let solution = outcome.solution();
        assert_eq!(solution.score(), 1);
        assert!(!solution.escaped());
        let expected = Placement::new(vec![
            grid.cell_at(1, 2),
            grid.cell_at(2, 1),
            grid.cell_at(2, 3),
            grid.cell_at(3, 2),
        ]);
        assert_eq!(*solution.placement(), expected);
    }

    #[test]
    fn test_reward_cell_raises_the_optimum() {
        let mut builder = GridBuilder::new(5, 5);
        builder.set_origin(builder.cell_at(2, 2));
        builder.set_reward(builder.cell_at(2, 3), true);
        builder.set_budget(6);
        let grid = builder.build().unwrap();
        let cells = ordered_candidates(&grid);

        // Default rules: the enclosed reward counts in area and adds the
        // bonus, so walling in origin + reward scores 2 + 3.
        let mut solver = BnbSolver::new();
        let outcome = solver.solve(&grid, &cells, NoOperationMonitor::new());
        assert!(outcome.is_optimal());
        assert_eq!(outcome.solution().score(), 5);

        // Bonus-only weighting: same placement, reward excluded from area.
        let mut solver = BnbSolver::with_rules(ScoreRules::new(3, false));
        let outcome = solver.solve(&grid, &cells, NoOperationMonitor::new());
        assert!(outcome.is_optimal());
        assert_eq!(outcome.solution().score(), 4);
    }

    #[test]
    fn test_matches_brute_force_on_small_grids() {
        // Water next to the origin lowers the walls needed to enclose it.
        let mut builder = GridBuilder::new(4, 4);
        builder.set_origin(builder.cell_at(1, 1));
        builder.set_terrain(builder.cell_at(1, 2), Terrain::Water);
        builder.set_terrain(builder.cell_at(2, 1), Terrain::Water);
        builder.set_budget(2);
        let grid = builder.build().unwrap();
        let cells = ordered_candidates(&grid);

        let mut solver = BnbSolver::new();
        let outcome = solver.solve(&grid, &cells, NoOperationMonitor::new());
        assert!(outcome.is_optimal());
        assert_eq!(outcome.solution().score(), brute_force_best(&grid, &cells));
        assert_eq!(outcome.solution().score(), 1);
    }

    #[test]
    fn test_matches_brute_force_with_reward() {
        let mut builder = GridBuilder::new(4, 5);
        builder.set_origin(builder.cell_at(1, 1));
        builder.set_reward(builder.cell_at(2, 2), true);
        builder.set_budget(4);
        let grid = builder.build().unwrap();
        let cells = ordered_candidates(&grid);

        let mut solver = BnbSolver::new();
        let outcome = solver.solve(&grid, &cells, NoOperationMonitor::new());
        assert!(outcome.is_optimal());
        assert_eq!(outcome.solution().score(), brute_force_best(&grid, &cells));
    }

    #[test]
    fn test_zero_budget_yields_escaped_optimum() {
        let grid = open_grid(5, 5, (2, 2), 0);
        let cells = ordered_candidates(&grid);
        let mut solver = BnbSolver::new();
        let outcome = solver.solve(&grid, &cells, NoOperationMonitor::new());

        assert!(outcome.is_optimal());
        assert_eq!(outcome.solution().score(), 0);
        assert!(outcome.solution().escaped());
        assert!(outcome.solution().placement().is_empty());
    }

    #[test]
    fn test_boundary_origin_cannot_be_enclosed() {
        let grid = open_grid(5, 5, (0, 2), 6);
        let cells = ordered_candidates(&grid);
        let mut solver = BnbSolver::new();
        let outcome = solver.solve(&grid, &cells, NoOperationMonitor::new());

        assert!(outcome.is_optimal());
        assert_eq!(outcome.solution().score(), 0);
        assert!(outcome.solution().escaped());
    }

    #[test]
    fn test_protected_portal_next_to_origin_blocks_every_enclosure() {
        // The portal neighboring the origin cannot be walled (protected by
        // the default policy), so every enclosure swallows it and leaks to
        // the boundary through its partner.
        let mut builder = GridBuilder::new(5, 5);
        builder.set_origin(builder.cell_at(2, 2));
        builder.set_channel(builder.cell_at(2, 1), ChannelIndex::new(0));
        builder.set_channel(builder.cell_at(0, 0), ChannelIndex::new(0));
        builder.set_budget(6);
        let grid = builder.build().unwrap();
        let cells = ordered_candidates(&grid);

        let mut solver = BnbSolver::new();
        let outcome = solver.solve(&grid, &cells, NoOperationMonitor::new());
        assert!(outcome.is_optimal());
        assert_eq!(outcome.solution().score(), 0);
        assert!(outcome.solution().escaped());
    }

    #[test]
    fn test_wall_on_portal_severs_the_teleport_edge() {
        // With portals allowed as candidates, walling the portal next to
        // the origin severs the edge and the four-neighbor ring works.
        let mut builder = GridBuilder::new(5, 5);
        builder.set_origin(builder.cell_at(2, 2));
        builder.set_channel(builder.cell_at(2, 3), ChannelIndex::new(0));
        builder.set_channel(builder.cell_at(0, 4), ChannelIndex::new(0));
        builder.set_budget(4);
        let grid = builder.build().unwrap();
        let policy = CandidatePolicy {
            protect_rewards: true,
            protect_portals: false,
        };
        let mut cells = candidates(&grid, &policy);
        frontier_ordering(&grid, &mut cells);

        let mut solver = BnbSolver::new();
        let outcome = solver.solve(&grid, &cells, NoOperationMonitor::new());
        assert!(outcome.is_optimal());
        assert_eq!(outcome.solution().score(), 1);
        assert!(outcome.solution().placement().contains(grid.cell_at(2, 3)));
    }

    #[test]
    fn test_search_is_deterministic() {
        let mut builder = GridBuilder::new(5, 6);
        builder.set_origin(builder.cell_at(2, 2));
        builder.set_reward(builder.cell_at(2, 3), true);
        builder.set_terrain(builder.cell_at(3, 3), Terrain::Water);
        builder.set_budget(5);
        let grid = builder.build().unwrap();
        let cells = ordered_candidates(&grid);

        let mut solver = BnbSolver::new();
        let first = solver.solve(&grid, &cells, NoOperationMonitor::new());
        let second = solver.solve(&grid, &cells, NoOperationMonitor::new());
        assert_eq!(first.solution(), second.solution());
        assert_eq!(
            first.statistics().nodes_explored,
            second.statistics().nodes_explored
        );
    }

    #[test]
    fn test_shared_incumbent_receives_improvements() {
        let grid = open_grid(5, 5, (2, 2), 4);
        let cells = ordered_candidates(&grid);
        let incumbent = SharedIncumbent::new();
        let mut solver = BnbSolver::new();
        let outcome =
            solver.solve_with_incumbent(&grid, &cells, NoOperationMonitor::new(), &incumbent);

        assert!(outcome.is_optimal());
        assert_eq!(incumbent.lower_bound(), 1);
        assert_eq!(incumbent.snapshot().unwrap().score(), 1);
    }

    #[test]
    fn test_seeded_incumbent_prunes_the_whole_tree() {
        let grid = open_grid(5, 5, (2, 2), 4);
        let cells = ordered_candidates(&grid);
        let incumbent = SharedIncumbent::new();
        // Pretend a heuristic already found the optimum.
        let seed = Solution::new(
            Placement::new(vec![
                grid.cell_at(1, 2),
                grid.cell_at(2, 1),
                grid.cell_at(2, 3),
                grid.cell_at(3, 2),
            ]),
            1,
            false,
        );
        assert!(incumbent.try_install(&seed));

        let mut solver = BnbSolver::new();
        let outcome =
            solver.solve_with_incumbent(&grid, &cells, NoOperationMonitor::new(), &incumbent);

        // Nothing strictly beats the seed, so the search proves optimality
        // without installing anything new; the seed stays the incumbent.
        assert!(outcome.is_optimal());
        assert_eq!(outcome.statistics().solutions_found, 0);
        assert_eq!(incumbent.snapshot().unwrap().score(), 1);
    }

    #[test]
    fn test_prefix_subtrees_cover_the_optimum() {
        let grid = open_grid(5, 5, (2, 2), 4);
        let cells = ordered_candidates(&grid);
        let incumbent = SharedIncumbent::new();
        let mut solver = BnbSolver::new();

        // Split on the first candidate: one subtree blocks it, one leaves
        // it open. Together they cover the whole tree.
        let prefixes = [
            SearchPrefix::new(1, vec![cells[0]]),
            SearchPrefix::new(1, Vec::new()),
        ];
        for prefix in &prefixes {
            let outcome = solver.solve_with_prefix(
                &grid,
                &cells,
                prefix,
                NoOperationMonitor::new(),
                &incumbent,
            );
            assert!(outcome.is_optimal());
        }
        assert_eq!(incumbent.snapshot().unwrap().score(), 1);
    }

    #[test]
    fn test_statistics_account_for_the_run() {
        let grid = open_grid(4, 4, (1, 1), 2);
        let cells = ordered_candidates(&grid);
        let mut solver = BnbSolver::new();
        let outcome = solver.solve(&grid, &cells, NoOperationMonitor::new());

        let stats = outcome.statistics();
        assert!(stats.nodes_explored > 0);
        assert_eq!(stats.nodes_explored, stats.evaluations);
        assert!(stats.root_upper_bound >= outcome.solution().score());
    }
}
