/// Worst-case frame time accepted by [`TickContext::clamped`].
///
/// A long stall (debugger, window drag) would otherwise teleport every soldier.
pub const DEFAULT_MAX_FRAME_SECONDS: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    pub tick: u64,
    pub dt_seconds: f32,
}

impl TickContext {
    pub fn new(tick: u64, dt_seconds: f32) -> Self {
        Self {
            tick,
            dt_seconds: dt_seconds.max(0.0),
        }
    }

    /// Build a context whose delta is limited to `max_frame_seconds`.
    pub fn clamped(tick: u64, dt_seconds: f32, max_frame_seconds: f32) -> Self {
        let max = max_frame_seconds.max(0.0);
        Self::new(tick, dt_seconds.min(max))
    }
}
