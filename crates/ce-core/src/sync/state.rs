/// Controller state, derived from the reentrancy guard.
///
/// ```text
/// Idle ──qualifying event──→ Propagating ──done──→ Idle
///                            (events arriving here are dropped)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncPhase {
    #[default]
    Idle,
    Propagating,
}
