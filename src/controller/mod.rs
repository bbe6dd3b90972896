//! Controllers: the flows behind each admin and dashboard screen.
//!
//! DESIGN
//! ======
//! Each controller is generic over an API trait from [`crate::net::api`] and,
//! where it drives a screen, a view trait from [`crate::view`]. They own the
//! sequencing (confirm, disable, call, re-enable, report) and leave
//! rendering and transport to their collaborators.

pub mod door;
pub mod password;
pub mod tags;
pub mod users;

#[cfg(test)]
pub mod test_helpers;
