/// Confirmation flow guarding the key reset.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetState {
    #[default]
    Idle,
    /// Waiting for the user to confirm or dismiss.
    Confirming,
    /// Reset request in flight; back to `Idle` once it settles.
    Resetting,
}

impl ResetState {
    pub fn is_confirming(self) -> bool {
        self == ResetState::Confirming
    }
}
