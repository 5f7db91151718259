/// Snapshot of the collaborator-supplied input state for one frame: held
/// movement keys plus the accumulated pointer delta. The core never talks to
/// a device; whatever captures events fills this in.
#[derive(Copy, Clone, Debug, Default)]
pub struct InputIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub sprint: bool,
    /// Pointer motion since the last frame, in device units.
    pub look_delta: (f32, f32),
    /// Look deltas only apply while the collaborator holds exclusive pointer
    /// capture.
    pub pointer_captured: bool,
}

impl InputIntent {
    /// Movement intent as (forward, right) axes. Opposite keys cancel out.
    pub fn axes(&self) -> (f32, f32) {
        let forward = (self.forward as i32 - self.backward as i32) as f32;
        let right = (self.right as i32 - self.left as i32) as f32;
        (forward, right)
    }
}
