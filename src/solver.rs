//! Exact ground states of tree-structured Ising models.
//!
//! For a rooted tree the energy of a subtree depends on the rest of the
//! graph only through the spin of its parent. Each node therefore gets a
//! two-entry table: for each parent spin, the best own spin and the minimum
//! subtree energy. Tables are filled bottom-up (children before parents),
//! then the optimal spins are read back top-down from the root's choice.
//!
//! The traversal uses an explicit stack, so path-shaped trees do not grow
//! the call stack. Each solve owns its tables and spin array.

use crate::errors::{IsingError, IsingResult};
use crate::format::{GroundState, Spin, SpinConfiguration};
use crate::model::IsingTree;
use crate::utils::rng;
use rand::Rng;
use tracing::{debug, info, warn};

/// How the traversal root is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RootPolicy {
    /// Node 0.
    #[default]
    First,
    Fixed(usize),
    /// Uniform over all nodes; OS entropy when `seed` is `None`.
    Random { seed: Option<u64> },
}

/// Solver run parameters.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    pub root: RootPolicy,
    /// Reject cyclic inputs before solving.
    pub validate: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            root: RootPolicy::First,
            validate: true,
        }
    }
}

/// Best choice for a subtree under one assumed parent spin.
#[derive(Debug, Clone, Copy)]
struct SubtreeChoice {
    spin: Spin,
    energy: i64,
}

/// Indexed by the parent's spin, `Down` first.
type SpinTable = [SubtreeChoice; 2];

const UNSOLVED: SpinTable = [SubtreeChoice { spin: Spin::Up, energy: 0 }; 2];

#[inline(always)]
fn slot(spin: Spin) -> usize {
    match spin {
        Spin::Down => 0,
        Spin::Up => 1,
    }
}

pub struct GroundStateSolver<'a> {
    tree: &'a IsingTree,
    config: SolverConfig,
}

impl<'a> GroundStateSolver<'a> {
    pub fn new(tree: &'a IsingTree, config: SolverConfig) -> Self {
        Self { tree, config }
    }

    /// Resolve the configured root policy to a node id.
    pub fn pick_root(&self) -> IsingResult<usize> {
        let n = self.tree.n();
        if n == 0 {
            return Err(IsingError::EmptyModel);
        }
        let root = match self.config.root {
            RootPolicy::First => 0,
            RootPolicy::Fixed(id) => id,
            RootPolicy::Random { seed } => rng::seeded(seed).gen_range(0..n),
        };
        info!("root node selected is: {}", root);
        Ok(root)
    }

    /// Solve from the root the configured policy selects.
    pub fn analyze(&self) -> IsingResult<GroundState> {
        let root = self.pick_root()?;
        self.solve(root)
    }

    /// Solve with the traversal rooted at `root`.
    ///
    /// The minimum energy does not depend on `root`. When validation is
    /// disabled and the graph has cycles, each node is still visited once
    /// but the result is not meaningful.
    pub fn solve(&self, root: usize) -> IsingResult<GroundState> {
        let n = self.tree.n();
        if n == 0 {
            return Err(IsingError::EmptyModel);
        }
        if root >= n {
            return Err(IsingError::RootOutOfRange { root, spins: n });
        }
        if self.config.validate {
            let components = self.tree.validate_forest()?;
            if components > 1 {
                warn!("graph has {} components; solving each separately", components);
            }
        }

        let mut parent = vec![usize::MAX; n];
        let mut visited = vec![false; n];
        let mut tables = vec![UNSOLVED; n];
        let mut spins = vec![Spin::Up; n];
        let mut minimum_energy = 0;

        // `root` first, then one root per remaining component.
        let component_roots = std::iter::once(root).chain(0..n);
        for r in component_roots {
            if visited[r] {
                continue;
            }
            let order = self.traverse(r, &mut parent, &mut visited);
            for &node in order.iter().rev() {
                tables[node] = self.solve_node(parent[node], node, &parent, &tables);
            }

            // The root has no parent edge, so the assumed parent spin is
            // immaterial; use Up.
            let top = tables[r][slot(Spin::Up)];
            spins[r] = top.spin;
            minimum_energy += top.energy;
            for &node in order.iter().skip(1) {
                spins[node] = tables[node][slot(spins[parent[node]])].spin;
            }
        }

        let spins = SpinConfiguration::new(spins);
        info!(root, minimum_energy, spins = %spins, "ground state found");
        Ok(GroundState { minimum_energy, spins, root })
    }

    /// Preorder of the component containing `root`; fills `parent`.
    fn traverse(&self, root: usize, parent: &mut [usize], visited: &mut [bool]) -> Vec<usize> {
        let mut order = Vec::new();
        let mut stack = vec![root];
        visited[root] = true;
        parent[root] = root;
        while let Some(node) = stack.pop() {
            order.push(node);
            for &(nb, _) in self.tree.neighbors(node) {
                if !visited[nb] {
                    visited[nb] = true;
                    parent[nb] = node;
                    stack.push(nb);
                }
            }
        }
        order
    }

    /// Table for `child` once all of its children are solved.
    fn solve_node(
        &self,
        parent: usize,
        child: usize,
        parents: &[usize],
        tables: &[SpinTable],
    ) -> SpinTable {
        let mut coupling = 0;
        let mut below = [0i64; 2];
        let mut is_leaf = true;
        for &(nb, w) in self.tree.neighbors(child) {
            if nb == parent {
                coupling = w;
            } else if parents[nb] == child {
                is_leaf = false;
                below[0] += tables[nb][0].energy;
                below[1] += tables[nb][1].energy;
            }
        }

        if is_leaf {
            return Spin::BOTH.map(|ps| self.leaf_choice(child, coupling, ps));
        }

        let field = self.tree.field_weight(child);
        let table = Spin::BOTH.map(|ps| {
            let [down, up] = Spin::BOTH.map(|s| {
                below[slot(s)] + field * s.value() + coupling * ps.value() * s.value()
            });
            let (spin, energy) = Spin::select(down, up);
            SubtreeChoice { spin, energy }
        });
        debug!(parent, child, ?table, "internal node solved");
        table
    }

    /// Closed form for a node whose only neighbor is its parent.
    fn leaf_choice(&self, leaf: usize, coupling: i64, parent_spin: Spin) -> SubtreeChoice {
        let h = self.tree.field_weight(leaf);
        let p = parent_spin.value();
        let energy_if_negative = -h - p * coupling;
        let energy_if_positive = h + p * coupling;
        let (spin, energy) = Spin::select(energy_if_negative, energy_if_positive);
        SubtreeChoice { spin, energy }
    }
}

impl IsingTree {
    /// Minimum energy and `+`/`-` spin string, rooted at node 0.
    pub fn analyze_ground_state(&self) -> IsingResult<(i64, String)> {
        let gs = GroundStateSolver::new(self, SolverConfig::default()).analyze()?;
        Ok((gs.minimum_energy, gs.spin_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ModelBuilder;

    fn tree(lines: &[&str]) -> IsingTree {
        ModelBuilder::build(lines.iter().copied()).0
    }

    #[test]
    fn single_node_picks_sign_against_field() {
        for (w, energy, s) in [(-1, -1, "+"), (2, -2, "-"), (0, 0, "+")] {
            let line = format!("0 0 {}", w);
            let t = tree(&["p one 1 1", line.as_str()]);
            assert_eq!(t.analyze_ground_state().unwrap(), (energy, s.to_string()));
        }
    }

    #[test]
    fn leaf_rule_breaks_ties_upward() {
        // h = 0, J = 0 from the leaf's view: both energies 0.
        let t = tree(&["p pair 2 1", "0 1 0"]);
        let gs = GroundStateSolver::new(&t, SolverConfig::default()).solve(1).unwrap();
        assert_eq!(gs.spin_string(), "++");
        assert_eq!(gs.minimum_energy, 0);
    }

    #[test]
    fn ferro_and_antiferro_pairs() {
        let ferro = tree(&["p f 2 3", "0 0 -1", "0 1 -2"]);
        assert_eq!(ferro.analyze_ground_state().unwrap(), (-3, "++".into()));

        let anti = tree(&["p a 2 3", "0 0 -1", "0 1 2"]);
        assert_eq!(anti.analyze_ground_state().unwrap(), (-3, "+-".into()));
    }

    #[test]
    fn rejects_bad_roots_and_empty_models() {
        let t = tree(&["p x 2 1", "0 1 1"]);
        let solver = GroundStateSolver::new(&t, SolverConfig::default());
        assert!(matches!(solver.solve(2), Err(IsingError::RootOutOfRange { root: 2, spins: 2 })));

        let empty = IsingTree::default();
        assert!(matches!(empty.analyze_ground_state(), Err(IsingError::EmptyModel)));
    }

    #[test]
    fn cycles_are_rejected_unless_validation_is_off() {
        let t = tree(&["p tri 3 3", "0 1 1", "1 2 1", "2 0 1"]);
        assert!(matches!(t.analyze_ground_state(), Err(IsingError::NotAForest { .. })));

        let config = SolverConfig { validate: false, ..SolverConfig::default() };
        let gs = GroundStateSolver::new(&t, config).solve(0).unwrap();
        assert_eq!(gs.spins.len(), 3);
    }

    #[test]
    fn forest_components_are_summed() {
        let t = tree(&["p two 4 4", "0 0 1", "0 1 -1", "2 3 1", "3 3 -1"]);
        let gs = GroundStateSolver::new(&t, SolverConfig::default()).solve(3).unwrap();
        assert_eq!(gs.minimum_energy, -2 + -2);
        assert_eq!(t.energy(&gs.spins).unwrap(), gs.minimum_energy);
    }

    #[test]
    fn extreme_weights_solve_without_overflow() {
        let t = tree(&["p big 1 1", "0 0 -9223372036854775808"]);
        assert_eq!(t.analyze_ground_state().unwrap(), (0, "+".to_string()));

        let t = tree(&[
            "p big 3 5",
            "0 0 -2147483648",
            "2 2 2147483647",
            "0 1 -2147483648",
            "1 2 -2147483648",
        ]);
        let gs = GroundStateSolver::new(&t, SolverConfig::default()).solve(1).unwrap();
        assert_eq!(gs.spin_string(), "+++");
        assert_eq!(gs.minimum_energy, -2147483648 + 2147483647 - 2 * 2147483648);
        assert_eq!(t.energy(&gs.spins).unwrap(), gs.minimum_energy);
    }

    #[test]
    fn random_root_is_reproducible_with_seed() {
        let t = tree(&["p path 5 4", "0 1 1", "1 2 -1", "2 3 1", "3 4 -1"]);
        let config = SolverConfig { root: RootPolicy::Random { seed: Some(9) }, ..Default::default() };
        let a = GroundStateSolver::new(&t, config.clone()).analyze().unwrap();
        let b = GroundStateSolver::new(&t, config).analyze().unwrap();
        assert_eq!(a.root, b.root);
        assert_eq!(a, b);
        assert!(a.root < 5);
    }
}
