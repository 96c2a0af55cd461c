//! Host OS quirks, applied to a finished report.

use nisse_types::keycode::KeyCode;
use nisse_types::modifier::HidModifiers;
use nisse_types::settings::OsProfile;

use crate::REPORT_KEYS;
use crate::hid::Report;

/// Rewrites the keys of `report` the way `os` expects them.
///
/// `mac_modifiers` enables the Application to Alt substitution on Mac, it is
/// set by the Mac modifier schemes. `profiles` enables the keypad Enter fix
/// used by the wireless boards.
pub fn remap(report: &mut Report, os: OsProfile, mac_modifiers: bool, profiles: bool) {
    let mut i = 0;
    while i < REPORT_KEYS {
        let key = report.keys[i];
        let (replacement, modifiers) = match (os, key) {
            (_, KeyCode::No) => (key, HidModifiers::new()),
            (OsProfile::Pc, KeyCode::Language1) => (KeyCode::F13, HidModifiers::new()),
            (OsProfile::Pc, KeyCode::Language2) => (KeyCode::F14, HidModifiers::new()),
            (
                OsProfile::Pc | OsProfile::Mac | OsProfile::Us104A | OsProfile::Us104B,
                KeyCode::International4 | KeyCode::International5,
            ) => (KeyCode::Space, HidModifiers::new()),
            (OsProfile::Mac, KeyCode::Application) if mac_modifiers => {
                // Becomes a modifier, the slot disappears
                report.modifiers |= HidModifiers::LALT;
                report.remove(i);
                continue;
            }
            (OsProfile::Mac, KeyCode::KpEnter) if profiles => (KeyCode::Enter, HidModifiers::new()),
            (OsProfile::Us104A, KeyCode::Language1) => (KeyCode::Space, HidModifiers::LSHIFT | HidModifiers::LCTRL),
            (OsProfile::Us104A, KeyCode::Language2) => {
                (KeyCode::Backspace, HidModifiers::LSHIFT | HidModifiers::LCTRL)
            }
            (OsProfile::Us104B, KeyCode::Language1 | KeyCode::Language2) => (KeyCode::Grave, HidModifiers::LALT),
            (OsProfile::Jp109A, KeyCode::Language1) => {
                (KeyCode::International4, HidModifiers::LSHIFT | HidModifiers::LCTRL)
            }
            (OsProfile::Jp109A, KeyCode::Language2) => {
                (KeyCode::International5, HidModifiers::LSHIFT | HidModifiers::LCTRL)
            }
            (OsProfile::Jp109B, KeyCode::Language1 | KeyCode::Language2) => (KeyCode::Grave, HidModifiers::new()),
            (OsProfile::AltSpace, KeyCode::Language1 | KeyCode::Language2) => (KeyCode::Space, HidModifiers::LALT),
            (OsProfile::ShiftSpace, KeyCode::Language1 | KeyCode::Language2) => {
                (KeyCode::Space, HidModifiers::LSHIFT)
            }
            _ => (key, HidModifiers::new()),
        };
        report.keys[i] = replacement;
        report.modifiers |= modifiers;
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remapped(os: OsProfile, keys: &[KeyCode]) -> Report {
        let mut report = Report::new(HidModifiers::new(), keys);
        remap(&mut report, os, false, false);
        report
    }

    #[test]
    fn test_pc_language_keys() {
        let report = remapped(OsProfile::Pc, &[KeyCode::Language1, KeyCode::Language2, KeyCode::International4]);
        assert_eq!(report.keys[..3], [KeyCode::F13, KeyCode::F14, KeyCode::Space]);
        assert!(report.modifiers.is_empty());
    }

    #[test]
    fn test_ime_chords() {
        let report = remapped(OsProfile::Us104A, &[KeyCode::Language2]);
        assert_eq!(report.keys[0], KeyCode::Backspace);
        assert_eq!(report.modifiers, HidModifiers::LSHIFT | HidModifiers::LCTRL);

        let report = remapped(OsProfile::Us104B, &[KeyCode::Language1]);
        assert_eq!(report.keys[0], KeyCode::Grave);
        assert_eq!(report.modifiers, HidModifiers::LALT);

        let report = remapped(OsProfile::Jp109A, &[KeyCode::Language1]);
        assert_eq!(report.keys[0], KeyCode::International4);

        let report = remapped(OsProfile::Jp109B, &[KeyCode::Language2]);
        assert_eq!(report.keys[0], KeyCode::Grave);
        assert!(report.modifiers.is_empty());

        let report = remapped(OsProfile::AltSpace, &[KeyCode::Language2]);
        assert_eq!((report.keys[0], report.modifiers), (KeyCode::Space, HidModifiers::LALT));

        let report = remapped(OsProfile::ShiftSpace, &[KeyCode::Language1]);
        assert_eq!((report.keys[0], report.modifiers), (KeyCode::Space, HidModifiers::LSHIFT));
    }

    #[test]
    fn test_jp109_keeps_convert_keys() {
        let report = remapped(OsProfile::Jp109A, &[KeyCode::International4, KeyCode::International5]);
        assert_eq!(report.keys[..2], [KeyCode::International4, KeyCode::International5]);
    }

    #[test]
    fn test_mac_application_becomes_alt() {
        let mut report = Report::new(HidModifiers::new(), &[KeyCode::A, KeyCode::Application, KeyCode::B]);
        remap(&mut report, OsProfile::Mac, true, false);
        assert_eq!(report.modifiers, HidModifiers::LALT);
        assert_eq!(report.keys[..3], [KeyCode::A, KeyCode::B, KeyCode::No]);

        // Without a Mac modifier scheme the key stays
        let report = remapped(OsProfile::Mac, &[KeyCode::Application]);
        assert_eq!(report.keys[0], KeyCode::Application);
    }

    #[test]
    fn test_mac_keypad_enter_on_profile_boards() {
        let mut report = Report::new(HidModifiers::new(), &[KeyCode::KpEnter]);
        remap(&mut report, OsProfile::Mac, false, true);
        assert_eq!(report.keys[0], KeyCode::Enter);
        assert_eq!(remapped(OsProfile::Mac, &[KeyCode::KpEnter]).keys[0], KeyCode::KpEnter);
    }
}
