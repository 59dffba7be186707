//! Request and response records, grouped by resource kind.
//!
//! Optional fields are omitted from the serialized body (never sent as
//! `null`); capacities are unsigned 64-bit integers; references to other
//! resources are always the singleton record `{"id": "..."}`.

pub mod common;
pub mod consistency_group;
pub mod filesystem;
pub mod host;
pub mod ip_interface;
pub mod lun;
pub mod metrics;
pub mod nfs_share;
pub mod pool;
pub mod replication;
pub mod snapshot;
pub mod system;

pub use common::*;
pub use consistency_group::*;
pub use filesystem::*;
pub use host::*;
pub use ip_interface::*;
pub use lun::*;
pub use metrics::*;
pub use nfs_share::*;
pub use pool::*;
pub use replication::*;
pub use snapshot::*;
pub use system::*;
