// Exact arithmetic: polynomials, rational functions and the shared ring description
pub mod arith;
pub mod bivariate;
pub mod config;
pub mod context;
pub mod error;
pub mod poly;
pub mod ratfunc;
pub mod series;

// Combinatorics and the quiver model
pub mod partition;
pub mod quiver;

// Pipeline: P-series -> log -> H -> A, and the one-vertex C invariant
pub mod kac;
pub mod logexp;
pub mod plethystic;
pub mod pseries;
pub mod reference;
pub mod wall_crossing;

// Public algebra API
pub use crate::bivariate::BiPoly;
pub use crate::config::KacConfig;
pub use crate::context::AlgebraContext;
pub use crate::error::{KacError, KacResult};
pub use crate::poly::UniPoly;
pub use crate::ratfunc::RatFunc;
pub use crate::series::XSeries;

// Public combinatorics API
pub use crate::partition::{b_pi, inner_product, partitions_of, partitions_up_to, phi, Partition};
pub use crate::quiver::Quiver;

// Public pipeline API
pub use crate::kac::{a_gamma, KacEngine};
pub use crate::logexp::{h_gamma, log_p};
pub use crate::plethystic::pexp;
pub use crate::pseries::{candidate_lists, p_series, PartitionTuples};
pub use crate::reference::{three_loop_reference, REFERENCE_LOOPS};
pub use crate::wall_crossing::{c_gamma, c_gamma_list, c_gamma_with, InvariantSource, Recursive, Table};
