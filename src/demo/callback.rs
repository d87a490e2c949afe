//! Stand-in for a closure prop.
//!
//! A closure created during a render is a new value every time even when
//! its behaviour is identical. `Callback` reproduces that: every instance
//! carries a fresh identity and serializes to it, so two callbacks never
//! compare equal unless the key is ignored.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Serialize, Serializer};

static NEXT_IDENTITY: AtomicU64 = AtomicU64::new(1);

/// An opaque handler with per-instance identity.
#[derive(Debug, PartialEq, Eq)]
pub struct Callback {
    identity: u64,
    name: &'static str,
}

impl Callback {
    pub fn new(name: &'static str) -> Self {
        Self {
            identity: NEXT_IDENTITY.fetch_add(1, Ordering::Relaxed),
            name,
        }
    }

    pub fn identity(&self) -> u64 {
        self.identity
    }
}

impl fmt::Display for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn {}#{}", self.name, self.identity)
    }
}

impl Serialize for Callback {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
