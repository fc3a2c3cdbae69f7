//! Player profiles
//!
//! A profile keeps the best depth reached and the lifetime count of collected
//! items. Stores only move raw strings; sealing, credential checks and merging
//! live in the provided trait methods so every backend behaves the same.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::persistence::{self, EnvelopeError};
use crate::session::RunReport;

/// Storage key prefix, followed by the lowercased player name
pub const KEY_PREFIX: &str = "echoshift_user_";

const PASSCODE_CONTEXT: &str = "echoshift 2025 profile passcode";

/// Storage key for a player name
pub fn profile_key(name: &str) -> String {
    format!("{}{}", KEY_PREFIX, name.trim().to_lowercase())
}

fn passcode_digest(key: &str, passcode: &str) -> String {
    let material = format!("{}:{}", key, passcode);
    blake3::Hash::from(blake3::derive_key(PASSCODE_CONTEXT, material.as_bytes()))
        .to_hex()
        .to_string()
}

/// Persisted per-player record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
    passcode_digest: String,
    pub max_depth: i32,
    pub total_collected: u64,
}

impl PlayerProfile {
    fn new(name: &str, passcode: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            passcode_digest: passcode_digest(&profile_key(name), passcode),
            max_depth: 0,
            total_collected: 0,
        }
    }

    pub fn verify(&self, passcode: &str) -> bool {
        passcode_digest(&profile_key(&self.name), passcode) == self.passcode_digest
    }

    /// Fold a finished run in: best depth is a max, collected items a sum
    pub fn merge_run(&mut self, report: &RunReport) {
        self.max_depth = self.max_depth.max(report.final_depth);
        self.total_collected += u64::from(report.collected);
    }
}

/// Result of a successful login
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    /// First login under this name: a fresh profile was written
    Created(PlayerProfile),
    Existing(PlayerProfile),
}

impl LoginOutcome {
    pub fn profile(&self) -> &PlayerProfile {
        match self {
            LoginOutcome::Created(p) | LoginOutcome::Existing(p) => p,
        }
    }
}

/// Profile store failure
#[derive(Debug)]
pub enum ProfileError {
    Io(std::io::Error),
    /// Stored record exists but cannot be trusted; login must be refused
    Corrupt { key: String, source: EnvelopeError },
    Encode(serde_json::Error),
    InvalidPasscode,
    MissingCredentials,
    UnknownPlayer(String),
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileError::Io(e) => write!(f, "profile I/O error: {}", e),
            ProfileError::Corrupt { key, source } => write!(f, "data corruption in {}: {}", key, source),
            ProfileError::Encode(e) => write!(f, "profile encode error: {}", e),
            ProfileError::InvalidPasscode => write!(f, "access denied: invalid passcode"),
            ProfileError::MissingCredentials => write!(f, "name and passcode required"),
            ProfileError::UnknownPlayer(name) => write!(f, "no profile for {}", name),
        }
    }
}

impl std::error::Error for ProfileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProfileError::Io(e) => Some(e),
            ProfileError::Corrupt { source, .. } => Some(source),
            ProfileError::Encode(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ProfileError {
    fn from(e: std::io::Error) -> Self {
        ProfileError::Io(e)
    }
}

impl From<serde_json::Error> for ProfileError {
    fn from(e: serde_json::Error) -> Self {
        ProfileError::Encode(e)
    }
}

/// Backend for persisted profiles
pub trait ProfileStore {
    /// Raw stored text for a key, `None` when absent
    fn read_raw(&self, key: &str) -> Result<Option<String>, ProfileError>;

    fn write_raw(&mut self, key: &str, data: &str) -> Result<(), ProfileError>;

    /// Load and verify a profile
    fn load(&self, name: &str) -> Result<Option<PlayerProfile>, ProfileError> {
        let key = profile_key(name);
        match self.read_raw(&key)? {
            None => Ok(None),
            Some(text) => persistence::open(&text)
                .map(Some)
                .map_err(|source| ProfileError::Corrupt { key, source }),
        }
    }

    fn save(&mut self, profile: &PlayerProfile) -> Result<(), ProfileError> {
        let text = persistence::seal(profile)?;
        self.write_raw(&profile_key(&profile.name), &text)
    }

    /// Authenticate, registering unknown names on first use
    fn login(&mut self, name: &str, passcode: &str) -> Result<LoginOutcome, ProfileError> {
        if name.trim().is_empty() || passcode.trim().is_empty() {
            return Err(ProfileError::MissingCredentials);
        }
        match self.load(name)? {
            Some(profile) => {
                if !profile.verify(passcode) {
                    log::warn!("Rejected login for {}", profile.name);
                    return Err(ProfileError::InvalidPasscode);
                }
                log::info!("Welcome back {}", profile.name);
                Ok(LoginOutcome::Existing(profile))
            }
            None => {
                let profile = PlayerProfile::new(name, passcode);
                self.save(&profile)?;
                log::info!("Registered new profile {}", profile.name);
                Ok(LoginOutcome::Created(profile))
            }
        }
    }

    /// Merge a finished run into an existing profile
    fn record_run(&mut self, name: &str, report: &RunReport) -> Result<PlayerProfile, ProfileError> {
        let mut profile = self
            .load(name)?
            .ok_or_else(|| ProfileError::UnknownPlayer(name.to_string()))?;
        profile.merge_run(report);
        self.save(&profile)?;
        log::info!(
            "Profile {} updated: best depth {}, lifetime collected {}",
            profile.name,
            profile.max_depth,
            profile.total_collected
        );
        Ok(profile)
    }
}

/// In-memory store (tests, embedding hosts with their own persistence)
#[derive(Debug, Clone, Default)]
pub struct MemoryProfileStore {
    entries: HashMap<String, String>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ProfileStore for MemoryProfileStore {
    fn read_raw(&self, key: &str) -> Result<Option<String>, ProfileError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write_raw(&mut self, key: &str, data: &str) -> Result<(), ProfileError> {
        self.entries.insert(key.to_string(), data.to_string());
        Ok(())
    }
}

/// One JSON file per player inside a directory
///
/// Files are named by digest, so every record stays flat inside `dir`
/// whatever the player typed as a name.
#[derive(Debug, Clone)]
pub struct FileProfileStore {
    dir: PathBuf,
}

impl FileProfileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File for a key, named by the key's digest since player names may hold any character
    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", blake3::hash(key.as_bytes()).to_hex()))
    }
}

impl ProfileStore for FileProfileStore {
    fn read_raw(&self, key: &str) -> Result<Option<String>, ProfileError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write through a temp file so a crash never leaves a half-written record
    fn write_raw(&mut self, key: &str, data: &str) -> Result<(), ProfileError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, data)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}
