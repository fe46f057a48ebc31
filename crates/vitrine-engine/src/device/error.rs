/// What the frame driver should do after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering resumes next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Unrecoverable (out of memory); stop the loop.
    Fatal,
}
