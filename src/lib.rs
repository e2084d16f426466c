pub mod errors;
pub mod reader;
pub mod model;
pub mod builder;
pub mod solver;
pub mod format;
pub mod generate;

pub mod utils {
    pub mod rng;
}

pub use builder::{ModelBuilder, SolveSummary};
pub use errors::{IsingError, IsingResult};
pub use format::{GroundState, Spin, SpinConfiguration};
pub use model::IsingTree;
pub use solver::{GroundStateSolver, RootPolicy, SolverConfig};
