use phalanx_bt::TreeLoadError;
use phalanx_core::{ArmyId, FormationId, SoldierId};
use phalanx_formation::FormationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("unknown army {0}")]
    UnknownArmy(ArmyId),
    #[error("unknown soldier {0}")]
    UnknownSoldier(SoldierId),
    #[error("unknown formation {0}")]
    UnknownFormation(FormationId),
    #[error("unknown archetype `{0}`")]
    UnknownArchetype(String),
    #[error(transparent)]
    Tree(#[from] TreeLoadError),
    #[error(transparent)]
    Formation(#[from] FormationError),
}
