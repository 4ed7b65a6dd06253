//! Constants shared by several algorithm families

pub mod hash;
