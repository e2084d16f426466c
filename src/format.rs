//! Spin values, spin assignments and ground-state output.

use crate::errors::IsingResult;
use crate::model::IsingTree;
use std::fmt;
use std::io::Write;
use std::ops::Index;

/// A single Ising spin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Spin {
    Down,
    Up,
}

impl Spin {
    /// Candidate order used by the solver.
    pub const BOTH: [Spin; 2] = [Spin::Down, Spin::Up];

    #[inline(always)]
    pub fn value(self) -> i64 {
        match self {
            Spin::Down => -1,
            Spin::Up => 1,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Spin::Down => '-',
            Spin::Up => '+',
        }
    }

    /// Ties go to `Up`.
    #[inline(always)]
    pub fn select(down_energy: i64, up_energy: i64) -> (Spin, i64) {
        if down_energy < up_energy {
            (Spin::Down, down_energy)
        } else {
            (Spin::Up, up_energy)
        }
    }
}

/// Spin per node id, indexed `0..n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinConfiguration(Vec<Spin>);

impl SpinConfiguration {
    pub fn new(spins: Vec<Spin>) -> Self {
        Self(spins)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Spin> + '_ {
        self.0.iter()
    }

    /// Parse a `+`/`-` string; `None` on any other character.
    pub fn parse(s: &str) -> Option<Self> {
        s.chars()
            .map(|c| match c {
                '+' => Some(Spin::Up),
                '-' => Some(Spin::Down),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(Self)
    }
}

impl Index<usize> for SpinConfiguration {
    type Output = Spin;

    fn index(&self, node: usize) -> &Spin {
        &self.0[node]
    }
}

impl fmt::Display for SpinConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.0 {
            write!(f, "{}", s.symbol())?;
        }
        Ok(())
    }
}

/// Result of a solve: the minimum energy and an assignment attaining it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundState {
    pub minimum_energy: i64,
    pub spins: SpinConfiguration,
    /// Root the traversal started from.
    pub root: usize,
}

impl GroundState {
    /// One `+`/`-` per node in ascending id order.
    pub fn spin_string(&self) -> String {
        self.spins.to_string()
    }

    /// Write `problem,node,field_weight,spin` rows, one per node.
    pub fn write_csv<W: Write>(
        &self,
        tree: &IsingTree,
        wtr: &mut csv::Writer<W>,
    ) -> IsingResult<()> {
        for (node, spin) in self.spins.iter().enumerate() {
            wtr.write_record(&[
                tree.name.clone(),
                node.to_string(),
                tree.field_weight(node).to_string(),
                spin.value().to_string(),
            ])?;
        }
        Ok(())
    }
}

/// Header row matching [`GroundState::write_csv`].
pub const CSV_HEADER: [&str; 4] = ["problem", "node", "field_weight", "spin"];
