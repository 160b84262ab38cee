use serde::Serialize;

/// Usage against the configured storage capacity, in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StorageQuota {
    pub used: u64,
    pub total: u64,
}

impl StorageQuota {
    pub fn remaining(&self) -> u64 {
        self.total.saturating_sub(self.used)
    }

    pub fn fraction_used(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.used as f64 / self.total as f64
        }
    }
}
