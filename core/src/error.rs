use crate::types::{CabinId, Floor};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("floor {floor} outside configured limits [{bottom}, {top}]")]
    BadFloor {
        floor:  Floor,
        bottom: Floor,
        top:    Floor,
    },

    #[error("no cabin with id {id} (fleet size {fleet_size})")]
    BadCabinId { id: CabinId, fleet_size: usize },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type DispatchResult<T> = Result<T, DispatchError>;
