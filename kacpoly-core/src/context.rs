use crate::config::KacConfig;
use crate::quiver::Quiver;
use crate::ratfunc::RatFunc;
use crate::series::XSeries;
use crate::{KacError, KacResult};

/// Description of the ring ℚ(w)[x_1, .., x_n] that every stage of the
/// pipeline computes in. Built once per vertex count and shared by reference.
#[derive(Debug, Clone)]
pub struct AlgebraContext {
    weight: String,
    vertex_vars: Vec<String>,
    config: KacConfig,
}

impl AlgebraContext {
    pub fn new(n_vertices: usize) -> Self {
        Self::with_config(n_vertices, KacConfig::default())
    }

    pub fn with_config(n_vertices: usize, config: KacConfig) -> Self {
        Self {
            weight: "w".to_string(),
            vertex_vars: (1..=n_vertices).map(|i| format!("x{}", i)).collect(),
            config,
        }
    }

    pub fn for_quiver(quiver: &Quiver, config: KacConfig) -> Self {
        Self::with_config(quiver.vertex_count(), config)
    }

    pub fn n_vertices(&self) -> usize {
        self.vertex_vars.len()
    }

    pub fn config(&self) -> &KacConfig {
        &self.config
    }

    pub fn weight_var(&self) -> &str {
        &self.weight
    }

    pub fn vertex_var(&self, i: usize) -> &str {
        &self.vertex_vars[i]
    }

    pub fn series_zero(&self) -> XSeries {
        XSeries::zero(self.n_vertices())
    }

    pub fn series_one(&self) -> XSeries {
        XSeries::one(self.n_vertices())
    }

    /// `coeff * x^exps`
    pub fn x_monomial(&self, exps: Vec<u32>, coeff: RatFunc) -> XSeries {
        let mut s = self.series_zero();
        s.add_term(exps, coeff);
        s
    }

    pub(crate) fn check_quiver(&self, quiver: &Quiver) -> KacResult<()> {
        if quiver.vertex_count() != self.n_vertices() {
            return Err(KacError::InvalidQuiverDefinition(format!(
                "algebra context has {} vertex variables, quiver has {} vertices",
                self.n_vertices(),
                quiver.vertex_count()
            )));
        }
        Ok(())
    }
}
