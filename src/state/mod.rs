//! Client-side state models.
//!
//! DESIGN
//! ======
//! State is split by concern (`page`, `form`, `password`, `access`) so each
//! controller depends on small focused models that hold no I/O.

pub mod access;
pub mod form;
pub mod page;
pub mod password;
pub mod sequence;
