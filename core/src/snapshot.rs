//! By-value snapshots of dispatcher state.
//!
//! Snapshots are plain data, fully detached from the dispatcher:
//! mutating the dispatcher after taking one never changes it.

use crate::{
    cabin::CabinStatus,
    types::{CabinId, Floor},
};
use serde::{Deserialize, Serialize};

/// One cabin's externally visible state.
///
/// `destination` equals `floor` when the cabin has nothing to do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CabinSnapshot {
    pub id:          CabinId,
    pub floor:       Floor,
    pub destination: Floor,
    pub status:      CabinStatus,
    pub drop_offs:   Vec<Floor>, // ascending
}
