//! Bounds applied to draft input before it is submitted.

use std::ops::RangeInclusive;

/// Maximum number of principal cast names.
pub const MAX_STARS: usize = 10;
/// Maximum number of writer names.
pub const MAX_WRITERS: usize = 3;
/// Maximum number of production company names.
pub const MAX_PRODUCTION_COMPANIES: usize = 5;
/// Accepted running time in minutes.
pub const DURATION_RANGE: RangeInclusive<u32> = 1..=300;
/// Accepted budget in whole USD.
pub const BUDGET_RANGE: RangeInclusive<u64> = 100..=500_000_000;
