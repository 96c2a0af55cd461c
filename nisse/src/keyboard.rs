//! The scan-to-report pipeline.

mod base;
mod drain;
pub mod fn_layer;
mod sticky;

use embassy_time::Ticker;
use nisse_types::keycode::KeyCode;
use nisse_types::led_indicator::LedIndicator;
use nisse_types::modifier::{ExtraModifiers, HidModifiers};
use nisse_types::settings::{BaseLayout, LedScheme, PrefixShift, Settings};

use self::drain::Drain;
use self::sticky::Sticky;
use crate::channel::{HOST_LED_SIGNAL, KEYBOARD_REPORT_CHANNEL, LED_INDICATOR_SIGNAL};
use crate::config::KeyboardConfig;
use crate::debounce::HistoryRing;
use crate::hid::{KeySnapshot, Report, Transmit};
use crate::kana::{KanaProcessor, NoKana};
use crate::layout;
use crate::light::{self, CapsBlink};
use crate::macro_queue::MacroQueue;
use crate::matrix::{GhostDetector, KeySet, MatrixScan, MatrixScanner, VOID_CODE};
use crate::os;
use crate::pointer::{NoPointer, PointerDevice};
use crate::profile::{NoProfile, ProfileController};
use crate::storage::SettingsStore;

/// Keyboard state, owned by the scan task.
///
/// Call [`Keyboard::tick`] once per scan interval with the raw matrix, or let
/// [`Keyboard::run`] do it. The Kana, pointer and profile collaborators default
/// to boards which have none of them.
pub struct Keyboard<S, K = NoKana, P = NoPointer, R = NoProfile>
where
    S: SettingsStore,
    K: KanaProcessor,
    P: PointerDevice,
    R: ProfileController,
{
    config: KeyboardConfig,
    settings: Settings,
    store: S,
    kana: K,
    pointer: P,
    profile: R,

    ghost: GhostDetector,
    history: HistoryRing,
    sticky: Sticky,

    /// Snapshot of the current tick
    current: KeySnapshot,
    /// Last snapshot which produced a report
    processed: KeySnapshot,
    /// Modifiers of the previous base layout resolution
    last_shift: HidModifiers,
    /// FN key pressed alone, a candidate for a dual-role tap
    dual_fn: ExtraModifiers,
    /// The report held back a key, resolve the same snapshot again
    stale: bool,

    macros: MacroQueue,
    drain: Option<Drain>,
    report: Report,

    host_leds: LedIndicator,
    caps_blink: CapsBlink,
}

impl<S: SettingsStore> Keyboard<S> {
    pub fn new(config: KeyboardConfig, store: S) -> Self {
        Self::with_collaborators(config, store, NoKana, NoPointer, NoProfile)
    }
}

impl<S: SettingsStore, K: KanaProcessor, P: PointerDevice, R: ProfileController> Keyboard<S, K, P, R> {
    pub fn with_collaborators(config: KeyboardConfig, mut store: S, mut kana: K, pointer: P, profile: R) -> Self {
        let settings = store.load(config.dual_role_fn);
        kana.load(&settings);
        info!("Keyboard settings loaded: {:?}", settings);
        Self {
            config,
            settings,
            store,
            kana,
            pointer,
            profile,
            ghost: GhostDetector::new(),
            history: HistoryRing::new(),
            sticky: Sticky::default(),
            current: KeySnapshot::default(),
            processed: KeySnapshot::default(),
            last_shift: HidModifiers::new(),
            dual_fn: ExtraModifiers::new(),
            stale: false,
            macros: MacroQueue::new(),
            drain: None,
            report: Report::default(),
            host_leds: LedIndicator::new(),
            caps_blink: CapsBlink::default(),
        }
    }

    pub fn config(&self) -> &KeyboardConfig {
        &self.config
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn kana(&self) -> &K {
        &self.kana
    }

    pub fn pointer(&self) -> &P {
        &self.pointer
    }

    pub fn profile(&self) -> &R {
        &self.profile
    }

    /// Report built by the last tick which returned a report directive
    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn macro_queue(&self) -> &MacroQueue {
        &self.macros
    }

    /// The macro queue is being typed out, scans are ignored
    pub fn is_draining(&self) -> bool {
        self.drain.is_some()
    }

    /// Reload every setting from the store
    pub fn reload_settings(&mut self) {
        self.settings = self.store.load(self.config.dual_role_fn);
        self.kana.load(&self.settings);
    }

    /// Write the factory defaults to the store and use them
    pub fn reset_settings(&mut self) {
        warn!("Resetting keyboard settings");
        self.store.write_all(&Settings::default());
        self.reload_settings();
    }

    /// Main keyboard task: scan, build reports and hand them to the transport
    pub async fn run(&mut self, scanner: &mut impl MatrixScanner) {
        let mut ticker = Ticker::every(self.config.scan_interval);
        loop {
            let host = HOST_LED_SIGNAL.try_take().unwrap_or(self.host_leds);
            LED_INDICATOR_SIGNAL.signal(self.control_led(host));

            let xmit = if self.is_draining() {
                self.drain_step()
            } else {
                let scan = scanner.scan().await;
                self.tick(&scan)
            };
            if xmit.is_report() {
                let report = self.report.to_keyboard_report();
                trace!("Sending keyboard report: {:?}", report);
                KEYBOARD_REPORT_CHANNEL.sender().send(report).await;
            }
            ticker.next().await;
        }
    }

    /// Run one pipeline pass over a raw matrix snapshot.
    ///
    /// While the macro queue is being typed out the scan is ignored and the
    /// next macro report is built instead. Whenever a report directive is
    /// returned, [`Keyboard::report`] holds the report to send.
    pub fn tick(&mut self, scan: &MatrixScan) -> Transmit {
        if self.is_draining() {
            return self.drain_step();
        }

        let mut modifiers = HidModifiers::new();
        let mut extra = ExtraModifiers::new();
        let mut pressed = KeySet::EMPTY;
        let num_lock = self.host_leds.num_lock();
        for pos in scan.iter() {
            self.ghost.count(pos);
            let code = pos.code(self.config.board_rev);
            match layout::resolve(code, self.settings.base, self.settings.modifier_scheme, num_lock) {
                key if key.is_modifier() => modifiers |= key.to_hid_modifiers(),
                KeyCode::LeftFn => extra.set_left_fn(true),
                KeyCode::RightFn => extra.set_right_fn(true),
                KeyCode::Fn2 => extra.set_fn2(true),
                _ if code != VOID_CODE => {
                    pressed.push(code);
                }
                _ => {}
            }
        }

        let xmit = if self.ghost.detect() {
            debug!("Ghosting detected, repeating the previous keys");
            self.history.repeat_previous();
            Transmit::None
        } else {
            self.history.record(pressed);
            self.make_report(modifiers, extra)
        };
        self.history.advance();
        xmit
    }

    fn drain_step(&mut self) -> Transmit {
        let Some(drain) = self.drain.as_mut() else {
            return Transmit::None;
        };
        match drain.step(&mut self.macros, &mut self.report) {
            Some(xmit) => xmit,
            None => {
                debug!("Macro finished");
                self.drain = None;
                Transmit::None
            }
        }
    }

    fn is_zq_mode(&self, current: &KeySnapshot) -> bool {
        !current
            .modifiers
            .intersects(HidModifiers::ALT | HidModifiers::CTRL | HidModifiers::GUI)
            && !current.extra.pad()
            && self.settings.base == BaseLayout::Zq
    }

    fn make_report(&mut self, modifiers: HidModifiers, extra: ExtraModifiers) -> Transmit {
        let mut current = KeySnapshot {
            modifiers,
            extra,
            codes: KeySet::EMPTY,
        };
        if self.pointer.is_touched() {
            current.extra |= ExtraModifiers::PAD;
        }
        let sticky = (self.settings.prefix_shift.is_enabled() && self.kana.is_kana_mode(&current))
            || self.is_zq_mode(&current);
        self.sticky.track(&mut current, modifiers, extra, sticky);
        current.codes = self.history.stable(self.settings.delay.ticks());

        if current.extra == ExtraModifiers::PAD {
            self.pointer.process_mouse_keys(&current, &self.processed);
        }
        self.current = current;

        let processed = self.processed;
        if current == processed {
            return Transmit::None;
        }
        let xmit = if current.codes != processed.codes
            || current.codes.is_empty()
            || !current.extra.is_empty()
            || current.modifiers.shift()
        {
            if !current.codes.is_empty() {
                self.sticky.clear();
            }
            self.process_keys()
        } else if (!processed.extra.is_empty() && current.extra.is_empty())
            || released(processed.modifiers, current.modifiers, HidModifiers::LSHIFT)
            || released(processed.modifiers, current.modifiers, HidModifiers::RSHIFT)
        {
            // Modifier released after a chord, the keys are unchanged
            Transmit::None
        } else {
            self.process_keys()
        };

        if xmit.is_report() {
            os::remap(
                &mut self.report,
                self.settings.os,
                self.settings.modifier_scheme.is_mac(),
                self.config.profiles,
            );
        }
        xmit
    }

    fn process_keys(&mut self) -> Transmit {
        let current = self.current;
        let processed = self.processed;
        if current == processed {
            return Transmit::None;
        }
        self.report.clear();

        let xmit = if current.extra.is_fn() {
            self.process_keys_fn(&current, &processed)
        } else if current.extra.fn2() {
            self.process_keys_fn2(&current, &processed)
        } else if self.kana.is_kana_mode(&current) {
            self.kana
                .process_keys_kana(&current, &processed, &mut self.report, &mut self.macros)
        } else {
            self.process_keys_base(&current, &processed)
        };
        let stale = core::mem::take(&mut self.stale);

        if self.settings.modifier_scheme.is_dual_role_fn() && self.dual_role_fn(&current, &processed, xmit) {
            return xmit;
        }

        if xmit.is_report() && !stale {
            self.processed = current;
        }
        if xmit.is_macro() {
            self.drain = Some(Drain::new(xmit));
        }
        xmit
    }

    /// FN pressed and released alone types Lang1 (right FN) or Lang2 (left FN).
    ///
    /// Returns `true` when the tap was turned into a key.
    fn dual_role_fn(&mut self, current: &KeySnapshot, processed: &KeySnapshot, xmit: Transmit) -> bool {
        let held = current.extra & ExtraModifiers::FN;
        if held != processed.extra & ExtraModifiers::FN {
            if !held.is_empty() {
                self.dual_fn = held;
            } else if !self.dual_fn.is_empty() && xmit == Transmit::Normal && self.report.is_empty() {
                let key = if self.dual_fn.right_fn() {
                    KeyCode::Language1
                } else {
                    KeyCode::Language2
                };
                let key = self.kana.toggle_kana_mode(key, current.modifiers, true);
                self.report.push(key);
                // Next snapshot differs, which releases the key
                self.processed = *current;
                self.processed.extra |= self.dual_fn;
                self.dual_fn = ExtraModifiers::new();
                return true;
            }
        }
        if !self.dual_fn.is_empty() && (xmit != Transmit::Normal || !self.report.is_empty()) {
            self.dual_fn = ExtraModifiers::new();
        }
        false
    }

    /// Compose the indicator LEDs from the host's LED report.
    ///
    /// Called for every host LED report, and periodically on boards which
    /// dim the Caps Lock LED.
    pub fn control_led(&mut self, host: LedIndicator) -> LedIndicator {
        self.host_leds = host;
        let mut leds = self.kana.control_led(host);
        let zq_leds = self.settings.base == BaseLayout::Zq && self.settings.led != LedScheme::Off;
        let kana_leds = self.settings.prefix_shift == PrefixShift::Led && self.kana.is_kana_mode(&self.current);
        if zq_leds || kana_leds {
            leds = light::sticky_indicators(leds, self.sticky.prefix(), self.sticky.prefix_extra());
        }
        if self.pointer.is_touched() {
            leds |= LedIndicator::SCROLL_LOCK;
        }
        if self.config.board_rev < 3 {
            leds = self.caps_blink.apply(leds);
        }
        leds
    }
}

fn released(before: HidModifiers, after: HidModifiers, modifier: HidModifiers) -> bool {
    before.intersects(modifier) && !after.intersects(modifier)
}
