//! Precedence-ordered strategy table.

use std::borrow::Cow;

use super::{
    boolean, comparison, date_range, list, ltree, mac_address, network, null_check, numeric,
    pattern, vector, Operator, OperatorStrategy,
};
use crate::detect::FieldTypeFamily;
use crate::error::{CompileError, Result};

/// Standard strategies, most type-specific first.
///
/// A generic strategy must never claim a specific family: `contains` on a MAC
/// address resolves to nothing rather than to pattern matching.
pub static STANDARD_STRATEGIES: [OperatorStrategy; 11] = [
    null_check::STRATEGY,
    date_range::STRATEGY,
    ltree::STRATEGY,
    mac_address::STRATEGY,
    network::STRATEGY,
    vector::STRATEGY,
    boolean::STRATEGY,
    numeric::STRATEGY,
    pattern::STRATEGY,
    list::STRATEGY,
    comparison::STRATEGY,
];

static STANDARD: StrategyRegistry = StrategyRegistry {
    strategies: Cow::Borrowed(&STANDARD_STRATEGIES),
};

/// Ordered list of strategies resolving `(operator, family)` to the first match.
#[derive(Debug, Clone)]
pub struct StrategyRegistry {
    strategies: Cow<'static, [OperatorStrategy]>,
}

impl StrategyRegistry {
    /// The process-wide standard registry.
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    /// Builds a custom registry; order is precedence.
    #[must_use]
    pub fn new(strategies: Vec<OperatorStrategy>) -> Self {
        Self {
            strategies: Cow::Owned(strategies),
        }
    }

    /// Strategies in precedence order.
    #[must_use]
    pub fn strategies(&self) -> &[OperatorStrategy] {
        &self.strategies
    }

    /// First strategy that supports `operator` on `family`.
    #[must_use]
    pub fn find(&self, operator: Operator, family: FieldTypeFamily) -> Option<&OperatorStrategy> {
        self.strategies
            .iter()
            .find(|strategy| strategy.supports(operator, family))
    }

    /// The single family any strategy renders `operator` for.
    ///
    /// `hamming_distance` only means Vector and `insubnet` only means
    /// IpNetwork; `eq`, `overlaps` and `isnull` imply nothing.
    #[must_use]
    pub fn implied_family(&self, operator: Operator) -> Option<FieldTypeFamily> {
        let mut families = FieldTypeFamily::ALL
            .into_iter()
            .filter(|family| self.find(operator, *family).is_some());
        let first = families.next()?;
        families.next().is_none().then_some(first)
    }

    /// Resolves an operator name for a field.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::UnsupportedOperator`] when the name is not in the
    /// vocabulary or no strategy declares it for `family`.
    pub fn resolve(
        &self,
        field: &str,
        operator: &str,
        family: FieldTypeFamily,
    ) -> Result<(Operator, &OperatorStrategy)> {
        let unsupported = || CompileError::UnsupportedOperator {
            field: field.to_string(),
            operator: operator.to_string(),
            family,
        };

        let op = Operator::parse(operator).ok_or_else(unsupported)?;
        let strategy = self.find(op, family).ok_or_else(unsupported)?;

        tracing::trace!(
            field,
            operator = op.as_str(),
            %family,
            strategy = strategy.kind.name(),
            "resolved operator strategy"
        );
        Ok((op, strategy))
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        STANDARD.clone()
    }
}
