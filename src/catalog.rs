use crate::config::ConfigError;

/// Ordered set of legal subtrahends. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveCatalog {
    values: Vec<u32>,
}

impl MoveCatalog {
    /// The primes offered by the classic table.
    pub const PRIMES: [u32; 4] = [2, 3, 5, 7];

    /// Builds a catalog, keeping the caller's order.
    pub fn new(values: impl IntoIterator<Item = u32>) -> Result<Self, ConfigError> {
        let mut out: Vec<u32> = Vec::new();
        for value in values {
            if value == 0 {
                return Err(ConfigError::NonPositiveSubtrahend);
            }
            if out.contains(&value) {
                return Err(ConfigError::DuplicateSubtrahend { value });
            }
            out.push(value);
        }
        if out.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        Ok(Self { values: out })
    }

    pub fn primes() -> Self {
        Self {
            values: Self::PRIMES.to_vec(),
        }
    }

    pub fn contains(&self, value: u32) -> bool {
        self.values.contains(&value)
    }

    /// Subtrahends in their fixed display/evaluation order.
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    /// Subtrahends that can be taken from a pile holding `coins`.
    pub fn fitting(&self, coins: u32) -> impl Iterator<Item = u32> + '_ {
        self.values.iter().copied().filter(move |&value| value <= coins)
    }
}

impl Default for MoveCatalog {
    fn default() -> Self {
        Self::primes()
    }
}
