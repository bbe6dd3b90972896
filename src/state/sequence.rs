//! Latest-wins ordering for overlapping requests.
//!
//! DESIGN
//! ======
//! Each request takes a token from a monotonically increasing counter.
//! A response is applied only if its token is still the most recently
//! issued one, so a slow early response can never overwrite a newer one
//! regardless of arrival order.

#[cfg(test)]
#[path = "sequence_test.rs"]
mod sequence_test;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: u64,
}

impl RequestSequence {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a token newer than every previously issued one.
    pub fn issue(&mut self) -> RequestToken {
        self.latest = self.latest.wrapping_add(1);
        RequestToken(self.latest)
    }

    #[must_use]
    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }
}
