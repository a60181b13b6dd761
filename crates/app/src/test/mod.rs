//! Service test support

pub(crate) mod db;
pub(crate) mod helpers;

pub(crate) use context::TestContext;
