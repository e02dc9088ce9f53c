//! Cost model errors.

/// Contract violations found while costing a graph.
///
/// Each is fatal for the design: the graph was produced by a front-end that
/// disagrees with the coefficient tables or skipped width inference.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CostError {
    /// A costed node has no known width.
    #[error("node '{node}' has no width; run width inference first")]
    MissingWidth {
        /// The offending node.
        node: String,
    },

    /// An operator node's name carries no `MnemonicN` token.
    #[error("operator node '{node}' has no mnemonic in its name")]
    MissingMnemonic {
        /// The offending node.
        node: String,
    },

    /// An operator mnemonic has no entry in the coefficient tables.
    #[error("operator '{mnemonic}' of node '{node}' is not in the technology library")]
    UnknownOperator {
        /// The offending node.
        node: String,
        /// The extracted mnemonic.
        mnemonic: String,
    },
}
