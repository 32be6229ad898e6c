pub const DEFAULT_API_BASE_URL: &str = "https://testnet-api.eden-finance.xyz/api/v1";
pub const DEFAULT_EXPLORER_BASE_URL: &str = "https://etherscan.io/address/";

/// Server page size. The remote API is always asked for pages of this size and
/// local search pagination uses the same bound.
pub const ITEMS_PER_PAGE: u64 = 10;

pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_TICK_MS: u64 = 100;

/// How long the "copied" indicator stays on a row after a clipboard copy.
pub const COPY_FEEDBACK_MS: u64 = 2_000;
