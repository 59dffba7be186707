//! Storage pool records. The pool API is read-only; pools are a dependency
//! of volume and filesystem create.

use serde::Deserialize;

use super::common::Health;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoragePool {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub size_free: u64,
    #[serde(default)]
    pub size_total: u64,
    #[serde(default)]
    pub size_used: u64,
    #[serde(default, rename = "poolFastVP")]
    pub pool_fast_vp: Option<PoolFastVp>,
    #[serde(default)]
    pub health: Option<Health>,
}

impl StoragePool {
    /// True when the pool accepts tiering parameters on create.
    pub fn supports_fast_vp(&self) -> bool {
        self.pool_fast_vp.as_ref().is_some_and(|f| f.status != 0)
    }
}

/// FastVP status block of a pool.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolFastVp {
    #[serde(default)]
    pub status: i32,
}
