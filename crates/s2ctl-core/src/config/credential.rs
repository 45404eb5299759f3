//! API key storage with optional keyring support
//!
//! Keys live in the config file as plaintext unless the OS keyring is
//! requested, in which case the file only holds a `keyring:<context>`
//! reference.

use super::error::{ConfigError, Result};

/// Prefix that indicates a value should be retrieved from the keyring
const KEYRING_PREFIX: &str = "keyring:";

/// Service name for keyring entries
#[cfg(feature = "secure-storage")]
const SERVICE_NAME: &str = "s2ctl";

/// Storage backend for new credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialStorage {
    /// Store in OS keyring
    #[cfg(feature = "secure-storage")]
    Keyring,
    /// Store as plaintext
    Plaintext,
}

/// Credential store abstraction
#[derive(Debug, Clone)]
pub struct CredentialStore {
    storage: CredentialStorage,
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new(CredentialStorage::Plaintext)
    }
}

impl CredentialStore {
    pub fn new(storage: CredentialStorage) -> Self {
        Self { storage }
    }

    /// Keyring-backed store when requested and compiled in, plaintext otherwise
    pub fn for_keyring(use_keyring: bool) -> Result<Self> {
        if !use_keyring {
            return Ok(Self::default());
        }
        #[cfg(feature = "secure-storage")]
        {
            Ok(Self::new(CredentialStorage::Keyring))
        }
        #[cfg(not(feature = "secure-storage"))]
        {
            Err(ConfigError::CredentialError(
                "keyring storage requested but the secure-storage feature is not enabled"
                    .to_string(),
            ))
        }
    }

    /// Store a key; returns the value to write into the config file
    pub fn store_credential(&self, name: &str, value: &str) -> Result<String> {
        match self.storage {
            #[cfg(feature = "secure-storage")]
            CredentialStorage::Keyring => {
                let entry = keyring::Entry::new(SERVICE_NAME, name)
                    .map_err(|e| ConfigError::KeyringError(e.to_string()))?;
                entry.set_password(value).map_err(|e| {
                    ConfigError::KeyringError(format!(
                        "Failed to store credential in keyring: {}",
                        e
                    ))
                })?;
                Ok(format!("{}{}", KEYRING_PREFIX, name))
            }
            CredentialStorage::Plaintext => {
                let _ = name;
                Ok(value.to_string())
            }
        }
    }

    /// Resolve a stored value: keyring references are looked up, anything else is the key
    pub fn get_credential(&self, value: &str) -> Result<String> {
        let Some(name) = value.strip_prefix(KEYRING_PREFIX) else {
            return Ok(value.to_string());
        };

        #[cfg(feature = "secure-storage")]
        {
            let entry = keyring::Entry::new(SERVICE_NAME, name)
                .map_err(|e| ConfigError::KeyringError(e.to_string()))?;
            entry.get_password().map_err(|e| {
                ConfigError::KeyringError(format!(
                    "Failed to retrieve credential '{}' from keyring: {}",
                    name, e
                ))
            })
        }
        #[cfg(not(feature = "secure-storage"))]
        {
            Err(ConfigError::CredentialError(format!(
                "Credential '{}' references keyring but secure-storage feature is not enabled",
                name
            )))
        }
    }

    /// Drop the keyring entry behind a stored value; plaintext values need nothing
    pub fn delete_credential(&self, value: &str) -> Result<()> {
        let Some(name) = value.strip_prefix(KEYRING_PREFIX) else {
            return Ok(());
        };

        #[cfg(feature = "secure-storage")]
        {
            let entry = keyring::Entry::new(SERVICE_NAME, name)
                .map_err(|e| ConfigError::KeyringError(e.to_string()))?;
            match entry.delete_credential() {
                Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
                Err(e) => Err(ConfigError::KeyringError(format!(
                    "Failed to delete credential from keyring: {}",
                    e
                ))),
            }
        }
        #[cfg(not(feature = "secure-storage"))]
        {
            tracing::warn!(name, "Keyring reference left behind: secure-storage is disabled");
            Ok(())
        }
    }

    /// Check if a value is a keyring reference
    pub fn is_keyring_reference(value: &str) -> bool {
        value.starts_with(KEYRING_PREFIX)
    }

    /// Get the current storage backend
    pub fn storage_backend(&self) -> &str {
        match self.storage {
            #[cfg(feature = "secure-storage")]
            CredentialStorage::Keyring => "keyring",
            CredentialStorage::Plaintext => "plaintext",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plaintext_storage() {
        let store = CredentialStore::default();

        let stored = store.store_credential("work", "04secret").unwrap();
        assert_eq!(stored, "04secret");
        assert_eq!(store.get_credential(&stored).unwrap(), "04secret");
        assert_eq!(store.storage_backend(), "plaintext");
    }

    #[test]
    fn test_keyring_reference_detection() {
        assert!(CredentialStore::is_keyring_reference("keyring:work"));
        assert!(!CredentialStore::is_keyring_reference("04secret"));
        assert!(!CredentialStore::is_keyring_reference(""));
    }

    #[test]
    fn test_delete_plaintext_is_noop() {
        let store = CredentialStore::default();
        assert!(store.delete_credential("04secret").is_ok());
    }

    #[cfg(not(feature = "secure-storage"))]
    #[test]
    fn test_keyring_reference_without_feature() {
        let store = CredentialStore::default();
        let err = store.get_credential("keyring:work").unwrap_err();
        assert!(matches!(err, ConfigError::CredentialError(_)));
        assert!(CredentialStore::for_keyring(true).is_err());
    }

    #[cfg(feature = "secure-storage")]
    #[test]
    #[ignore = "Requires keyring service to be available"]
    fn test_keyring_storage() {
        let store = CredentialStore::for_keyring(true).unwrap();

        let reference = store.store_credential("s2ctl-test", "04value").unwrap();
        assert!(reference.starts_with(KEYRING_PREFIX));
        assert_eq!(store.get_credential(&reference).unwrap(), "04value");

        let _ = store.delete_credential(&reference);
    }
}
