// ============ Model implementations ============

pub(crate) mod modernbert;

// Public size enum (for builder arguments)
pub use modernbert::ModernBertSize;
