pub(crate) mod get;
pub(crate) mod migrate;
pub(crate) mod serve;
