//! Path reconstruction modes.

/// Which granularity [`crate::Searcher::get_path`] should reconstruct at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMode {
    /// Only the jump points the search actually visited.
    Skeleton,
    /// Every unit cell between consecutive jump points, via linear
    /// interpolation. What the route planner consumes.
    Full,
}
