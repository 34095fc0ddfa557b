pub(crate) mod binary;
pub(crate) mod compress;
pub(crate) mod enable;
pub(crate) mod idle;
pub(crate) mod metadata;
pub(crate) mod quota;
pub(crate) mod sort;
pub(crate) mod thread;
pub(crate) mod uidplus;
