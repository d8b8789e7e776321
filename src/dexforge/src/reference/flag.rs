//! Well-known capability flag names
//!
//! Flags are open-ended in the corpus (`flags: {contact: 1, sound: 1}`), so
//! they are kept as strings. These are the ones the compiler sets.

/// Makes contact with the target
pub const CONTACT: &str = "contact";
/// Blocked by Protect and friends
pub const PROTECT: &str = "protect";
/// Can be copied by Mirror Move
pub const MIRROR: &str = "mirror";
/// Can be called by Metronome
pub const METRONOME: &str = "metronome";
/// Can be stolen by Snatch
pub const SNATCH: &str = "snatch";
/// Heals the user
pub const HEAL: &str = "heal";
