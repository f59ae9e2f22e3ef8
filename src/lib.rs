#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

pub mod adjacency;
pub mod analysis;
pub mod assembly;
pub mod classify;
pub mod conditions;
pub mod config;
pub mod determinacy;
pub mod errors;
pub mod geometry;
pub mod input;
pub mod palette;
pub mod solver;
pub mod truss;

pub use adjacency::{build_adjacency, JointAdjacency};
pub use analysis::{analyze, TrussSolution};
pub use assembly::{assemble, EquilibriumSystem};
pub use classify::{classify, reactions, ForceKind, MemberResult, Reactions};
pub use conditions::{BoundaryConditions, Load, Supports};
pub use config::{AnalysisConfig, IndexBase, PaletteConfig};
pub use determinacy::{check_determinacy, Determinacy};
pub use errors::{AnalysisError, BoundaryError, GeometryError, InputError, PaletteError};
pub use geometry::{force, point, Force, Point};
pub use input::{parse_truss, read_truss_file, TrussInput};
pub use palette::{palette_index, ForceRange, Palette, Rgb};
pub use solver::{solve, SolverConfig, UnknownVector};
pub use truss::{BoundingBox, TrussGeometry};
