//! Capability flag derivation

use super::effect::Effect;
use super::intent::Intent;
use crate::record::Flags;
use crate::reference::{flag, Category};

/// Resolve the flag set of a compiled move from its intent.
///
/// Every custom move can be blocked by Protect, copied by Mirror Move and
/// called by Metronome. Contact follows the category (Physical only) unless
/// the intent forces it either way. Status moves can be snatched, and a
/// draining move heals its user.
pub fn resolve_flags(intent: &Intent) -> Flags {
    let mut flags: Flags = [flag::PROTECT, flag::MIRROR, flag::METRONOME]
        .into_iter()
        .collect();

    let contact = intent
        .force_contact
        .unwrap_or(intent.category == Category::Physical);
    if contact {
        flags.insert(flag::CONTACT);
    }

    if intent.category == Category::Status {
        flags.insert(flag::SNATCH);
    }

    if let Some(Ok(Effect::Drain)) = intent.effect() {
        flags.insert(flag::HEAL);
    }

    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::DamageType;

    fn names(flags: &Flags) -> Vec<&str> {
        flags.iter().collect()
    }

    #[test]
    fn test_contact_follows_category() {
        let physical = Intent::new("Hit", DamageType::Normal, Category::Physical);
        assert!(resolve_flags(&physical).contains(flag::CONTACT));

        let special = Intent::new("Beam", DamageType::Normal, Category::Special);
        assert!(!resolve_flags(&special).contains(flag::CONTACT));
    }

    #[test]
    fn test_contact_override() {
        let mut special = Intent::new("Punch Beam", DamageType::Normal, Category::Special);
        special.force_contact = Some(true);
        assert!(resolve_flags(&special).contains(flag::CONTACT));

        let mut physical = Intent::new("Throw Rock", DamageType::Rock, Category::Physical);
        physical.force_contact = Some(false);
        assert!(!resolve_flags(&physical).contains(flag::CONTACT));
    }

    #[test]
    fn test_status_and_drain_flags() {
        let status = Intent::new("Focus", DamageType::Psychic, Category::Status);
        assert_eq!(
            names(&resolve_flags(&status)),
            vec!["metronome", "mirror", "protect", "snatch"]
        );

        let mut drain = Intent::new("Sip", DamageType::Bug, Category::Physical);
        drain.effect_name = Some("drain".into());
        assert_eq!(
            names(&resolve_flags(&drain)),
            vec!["contact", "heal", "metronome", "mirror", "protect"]
        );
    }
}
