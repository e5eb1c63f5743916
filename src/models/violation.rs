//! Conservation violation types.

/// A way in which an allocation fails to match its instance.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationType {
    /// A source ships a different total than its supply.
    SupplyMismatch {
        /// Source index.
        source_index: usize,
        /// Quantity shipped out of the source.
        shipped: u128,
        /// Supply of the source.
        supply: u64,
    },
    /// A sink receives a different total than its demand.
    DemandMismatch {
        /// Sink index.
        sink_index: usize,
        /// Quantity delivered to the sink.
        received: u128,
        /// Demand of the sink.
        demand: u64,
    },
    /// The allocation matrix has a different shape than the instance.
    ShapeMismatch {
        /// Instance shape `(sources, sinks)`.
        expected: (usize, usize),
        /// Allocation shape `(sources, sinks)`.
        actual: (usize, usize),
    },
}

/// A conservation violation in an allocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}
