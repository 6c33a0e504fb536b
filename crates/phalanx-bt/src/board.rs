//! Blackboard partitions shared by the host loop and the leaf nodes.

use phalanx_core::{ArmyId, Partition, SoldierId, Vec2};

/// Live soldiers and the army each belongs to. Replaced wholesale by the host every tick.
pub const SOLDIERS: Partition<SoldierId, ArmyId> = Partition::new(0x5041_4C58_0000_0001, "soldiers");
/// Live armies and their current waypoint. Replaced wholesale by the host every tick.
pub const ARMIES: Partition<ArmyId, Vec2> = Partition::new(0x5041_4C58_0000_0002, "armies");
/// Current target per soldier. Written by `TargetEnemy`; persists across ticks.
pub const TARGET: Partition<SoldierId, SoldierId> = Partition::new(0x5041_4C58_0000_0003, "target");
/// Current waypoint per soldier. Written by the waypoint leaves; persists across ticks.
pub const WAYPOINT: Partition<SoldierId, Vec2> = Partition::new(0x5041_4C58_0000_0004, "waypoint");
