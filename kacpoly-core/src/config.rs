/// Knobs for the exact pipeline. Every default leaves the computation
/// unbounded and exact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KacConfig {
    /// Upper bound on the number of partition tuples summed into P_Γ.
    pub max_partition_tuples: Option<usize>,
    /// Upper bound on the number of x-monomials held by any intermediate series.
    pub max_series_terms: Option<usize>,
    /// Drop monomials outside the target exponent box while expanding the log.
    pub truncate_to_target: bool,
}

impl Default for KacConfig {
    fn default() -> Self {
        Self {
            max_partition_tuples: None,
            max_series_terms: None,
            truncate_to_target: true,
        }
    }
}

impl KacConfig {
    pub(crate) fn check_tuples(&self, count: usize) -> crate::KacResult<()> {
        match self.max_partition_tuples {
            Some(limit) if count > limit => Err(crate::KacError::BudgetExceeded(format!(
                "{} partition tuples exceed the limit of {}",
                count, limit
            ))),
            _ => Ok(()),
        }
    }

    pub(crate) fn check_terms(&self, count: usize) -> crate::KacResult<()> {
        match self.max_series_terms {
            Some(limit) if count > limit => Err(crate::KacError::BudgetExceeded(format!(
                "{} series terms exceed the limit of {}",
                count, limit
            ))),
            _ => Ok(()),
        }
    }
}
