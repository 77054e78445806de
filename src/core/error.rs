use thiserror::Error;

use crate::board::hex::HexCoord;
use crate::content::EquipSlot;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Coordinate out of bounds: ({0})")]
    OutOfBounds(HexCoord),

    #[error("Cell already occupied: ({0})")]
    CellOccupied(HexCoord),

    #[error("Cell is empty: ({0})")]
    CellEmpty(HexCoord),

    #[error("Unknown item '{0}'")]
    UnknownItem(String),

    #[error("Unknown material '{0}'")]
    UnknownMaterial(String),

    #[error("Unknown enemy definition '{0}'")]
    UnknownDefinition(String),

    #[error("Unknown encounter pool '{0}'")]
    UnknownPool(String),

    #[error("Encounter pool '{0}' is empty")]
    EmptyPool(String),

    #[error("No free {0} slots")]
    SlotsFull(EquipSlot),
}

pub type Result<T> = std::result::Result<T, SimError>;
