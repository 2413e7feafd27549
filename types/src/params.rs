//! Chain-wide constants the client must agree on with the node.

/// Weight ceiling for beneficiary routes: 10_000 = 100.00%.
pub const PERCENT: u32 = 10_000;

/// Default transaction lifetime past the head block time, in seconds.
pub const DEFAULT_EXPIRATION_SECS: u32 = 30;

/// Size of the TaPoS reference window; `ref_block_num` is the head number modulo this.
pub const TAPOS_MAX_BLOCK_COUNT: u64 = 2048;

/// Upper bound on operations carried by a single transaction.
pub const MAX_OPERATIONS_PER_TRX: usize = 1000;
