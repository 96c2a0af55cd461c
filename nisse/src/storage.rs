//! Persistent settings storage.
//!
//! Settings are single bytes at fixed offsets (see [`SettingKey`]). A store
//! never fails towards the pipeline: read errors give the factory default,
//! write errors are logged and dropped. Out-of-range values are normalised
//! when the [`Settings`] snapshot is built.

#[cfg(feature = "storage")]
use embedded_storage::Storage;
use nisse_types::settings::{SettingKey, Settings};
#[cfg(feature = "storage")]
use postcard::experimental::max_size::MaxSize;

/// Byte-wide settings storage
pub trait SettingsStore {
    fn read(&mut self, key: SettingKey) -> u8;

    fn write(&mut self, key: SettingKey, value: u8);

    /// Write a whole snapshot
    fn write_all(&mut self, settings: &Settings) {
        for key in SettingKey::ALL {
            self.write(key, settings.stored(key));
        }
    }

    /// Load and normalise every setting
    fn load(&mut self, dual_role_fn: bool) -> Settings {
        let mut raw = [0u8; SettingKey::ALL.len()];
        for key in SettingKey::ALL {
            raw[key as usize] = self.read(key);
        }
        Settings::from_stored(|key| raw[key as usize], dual_role_fn)
    }
}

/// RAM-backed store, initialised with the factory defaults
#[derive(Debug, Clone)]
pub struct MemoryStore {
    bytes: [u8; SettingKey::ALL.len()],
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl MemoryStore {
    pub fn new(settings: &Settings) -> Self {
        let mut bytes = [0u8; SettingKey::ALL.len()];
        for key in SettingKey::ALL {
            bytes[key as usize] = settings.stored(key);
        }
        Self { bytes }
    }

    /// Store holding arbitrary raw bytes, e.g. a blank or corrupted image
    pub fn from_raw(bytes: [u8; SettingKey::ALL.len()]) -> Self {
        Self { bytes }
    }
}

impl SettingsStore for MemoryStore {
    fn read(&mut self, key: SettingKey) -> u8 {
        self.bytes[key as usize]
    }

    fn write(&mut self, key: SettingKey, value: u8) {
        self.bytes[key as usize] = value;
    }
}

impl<S: SettingsStore> SettingsStore for &mut S {
    fn read(&mut self, key: SettingKey) -> u8 {
        (**self).read(key)
    }

    fn write(&mut self, key: SettingKey, value: u8) {
        (**self).write(key, value)
    }

    fn write_all(&mut self, settings: &Settings) {
        (**self).write_all(settings)
    }
}

#[cfg(feature = "storage")]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum StorageError {
    Read,
    Write,
    Serialize,
}

/// Settings on any storage device which implements the `embedded-storage::Storage` trait
#[cfg(feature = "storage")]
pub struct Eeprom<F>
where
    F: Storage,
{
    storage: F,
    /// Offset of the first setting byte
    offset: u32,
}

#[cfg(feature = "storage")]
impl<F: Storage> Eeprom<F> {
    pub fn new(storage: F, offset: u32) -> Self {
        Self { storage, offset }
    }

    /// Give the storage device back
    pub fn release(self) -> F {
        self.storage
    }

    fn try_read(&mut self, key: SettingKey) -> Result<u8, StorageError> {
        let mut buf = [0u8; 1];
        self.storage
            .read(self.offset + key as u32, &mut buf)
            .map_err(|_| StorageError::Read)?;
        Ok(buf[0])
    }

    fn try_write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), StorageError> {
        self.storage
            .write(self.offset + offset, bytes)
            .map_err(|_| StorageError::Write)
    }
}

#[cfg(feature = "storage")]
impl<F: Storage> SettingsStore for Eeprom<F> {
    fn read(&mut self, key: SettingKey) -> u8 {
        match self.try_read(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read setting {:?}: {:?}", key, e);
                Settings::default().stored(key)
            }
        }
    }

    fn write(&mut self, key: SettingKey, value: u8) {
        if let Err(e) = self.try_write(key as u32, &[value]) {
            error!("Failed to write setting {:?}: {:?}", key, e);
        }
    }

    /// One write for the whole snapshot, its postcard encoding is the storage layout
    fn write_all(&mut self, settings: &Settings) {
        let mut buf = [0u8; Settings::POSTCARD_MAX_SIZE];
        let result = postcard::to_slice(settings, &mut buf)
            .map_err(|_| StorageError::Serialize)
            .and_then(|bytes| self.try_write(0, bytes));
        if let Err(e) = result {
            error!("Failed to write settings: {:?}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use nisse_types::settings::{BaseLayout, ModScheme, OsProfile};

    use super::*;

    #[test]
    fn test_memory_store_defaults() {
        let mut store = MemoryStore::default();
        assert_eq!(store.load(false), Settings::default());
    }

    #[test]
    fn test_blank_image_normalised() {
        let mut store = MemoryStore::from_raw([0xFF; 8]);
        let settings = store.load(false);
        assert_eq!(settings.base, BaseLayout::Qwerty);
        assert_eq!(settings.os, OsProfile::Pc);
        assert_eq!(settings.modifier_scheme, ModScheme::C);
        // Collaborator-owned bytes are passed through
        assert_eq!(settings.kana_layout, 0xFF);
    }

    #[cfg(feature = "storage")]
    mod eeprom {
        use embedded_storage::{ReadStorage, Storage};

        use super::*;

        struct FakeStorage {
            bytes: [u8; 32],
            fail: bool,
        }

        impl ReadStorage for FakeStorage {
            type Error = ();

            fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
                if self.fail {
                    return Err(());
                }
                let start = offset as usize;
                bytes.copy_from_slice(&self.bytes[start..start + bytes.len()]);
                Ok(())
            }

            fn capacity(&self) -> usize {
                self.bytes.len()
            }
        }

        impl Storage for FakeStorage {
            fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
                if self.fail {
                    return Err(());
                }
                let start = offset as usize;
                self.bytes[start..start + bytes.len()].copy_from_slice(bytes);
                Ok(())
            }
        }

        #[test]
        fn test_eeprom_write_all_then_load() {
            let mut eeprom = Eeprom::new(FakeStorage { bytes: [0xFF; 32], fail: false }, 4);
            let settings = Settings {
                base: BaseLayout::Dvorak,
                os: OsProfile::Jp109B,
                ..Settings::default()
            };
            eeprom.write_all(&settings);
            assert_eq!(eeprom.load(false), settings);
            let storage = eeprom.release();
            assert_eq!(storage.bytes[..4], [0xFF; 4]);
            assert_eq!(storage.bytes[4], BaseLayout::Dvorak as u8);
        }

        #[test]
        fn test_eeprom_single_write() {
            let mut eeprom = Eeprom::new(FakeStorage { bytes: [0; 32], fail: false }, 0);
            eeprom.write(SettingKey::OsProfile, 3);
            assert_eq!(eeprom.read(SettingKey::OsProfile), 3);
        }

        #[test]
        fn test_eeprom_read_error_gives_default() {
            let mut eeprom = Eeprom::new(FakeStorage { bytes: [0; 32], fail: true }, 0);
            eeprom.write(SettingKey::BaseLayout, 1);
            assert_eq!(eeprom.load(false), Settings::default());
        }
    }
}
