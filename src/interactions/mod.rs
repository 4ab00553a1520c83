pub(crate) mod estimate;
pub(crate) mod longest;
pub(crate) mod merge;
