pub(crate) mod reporter;
pub(crate) mod state;
