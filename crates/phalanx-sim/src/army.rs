use phalanx_core::{ArmyId, FormationId, Vec2};

#[derive(Debug, Clone, PartialEq)]
pub struct Army {
    pub id: ArmyId,
    pub name: String,
    pub color: [u8; 3],
    /// Point the army's formations march toward.
    pub waypoint: Vec2,
    pub formations: Vec<FormationId>,
}

impl Army {
    pub fn new(id: ArmyId, name: impl Into<String>, color: [u8; 3], waypoint: Vec2) -> Self {
        Self {
            id,
            name: name.into(),
            color,
            waypoint,
            formations: Vec::new(),
        }
    }

    pub fn set_waypoint(&mut self, waypoint: Vec2) {
        self.waypoint = waypoint;
    }
}
