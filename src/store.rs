//! Saved sprite collection and its commit rules
//!
//! The collection is an ordered list of distinct sprites. Edits are
//! reconciled into it by comparing the identity a session started from
//! ([`Origin`]) with the value the user ended up with.
//!
//! # Persistence
//!
//! The collection is stored as tokens joined with `,` in a single named
//! slot of a [`Storage`] backend. Loading drops entries that decode to the
//! empty sprite and any repeated values.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use thiserror::Error;

use crate::bitgrid::Sprite;
use crate::codec::{decode, encode};

/// Slot holding the saved collection
pub const COLLECTION_SLOT: &str = "savedSprites";

/// Slot holding the share fragment of the sprite being edited
pub const FRAGMENT_SLOT: &str = "hash";

/// Separator between tokens in the persisted collection
pub const DELIMITER: char = ',';

/// Identity of the sprite a session was opened from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Origin {
    /// A brand-new sprite that has never been saved
    #[default]
    New,
    /// A sprite value that may be present in the collection
    Existing(Sprite),
}

impl Origin {
    /// Map a decoded value to an origin; the empty sprite means "new".
    pub fn from_sprite(sprite: Sprite) -> Self {
        if sprite.is_empty() {
            Origin::New
        } else {
            Origin::Existing(sprite)
        }
    }

    pub fn sprite(self) -> Option<Sprite> {
        match self {
            Origin::New => None,
            Origin::Existing(sprite) => Some(sprite),
        }
    }
}

/// What a commit did to the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Deleted { index: usize },
    Overwritten { index: usize },
    Appended { index: usize },
    Unchanged,
}

/// Ordered, duplicate-free list of saved sprites.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpriteCollection {
    sprites: Vec<Sprite>,
}

impl SpriteCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection, keeping the first occurrence of each value.
    pub fn from_sprites(sprites: impl IntoIterator<Item = Sprite>) -> Self {
        let mut collection = Self::new();
        for sprite in sprites {
            if !collection.contains(sprite) {
                collection.sprites.push(sprite);
            }
        }
        collection
    }

    pub fn as_slice(&self) -> &[Sprite] {
        &self.sprites
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn contains(&self, sprite: Sprite) -> bool {
        self.sprites.contains(&sprite)
    }

    pub fn position(&self, sprite: Sprite) -> Option<usize> {
        self.sprites.iter().position(|s| *s == sprite)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sprite> {
        self.sprites.iter()
    }

    /// Reconcile an edit into the collection.
    ///
    /// Rules, in order:
    /// 1. origin present and `working` empty: delete it
    /// 2. origin present: overwrite it in place
    /// 3. otherwise: append `working`
    ///
    /// An empty `working` value is never appended, and a value already in
    /// the collection is not added a second time.
    pub fn commit(&mut self, origin: Origin, working: Sprite) -> CommitOutcome {
        let index = origin.sprite().and_then(|s| self.position(s));

        match index {
            Some(index) if working.is_empty() => {
                self.sprites.remove(index);
                CommitOutcome::Deleted { index }
            }
            Some(index) => {
                self.sprites[index] = working;
                // Drop a second copy of `working` elsewhere in the list
                if let Some(dup) = (0..self.sprites.len()).find(|&i| i != index && self.sprites[i] == working) {
                    self.sprites.remove(dup);
                    let index = if dup < index { index - 1 } else { index };
                    return CommitOutcome::Overwritten { index };
                }
                CommitOutcome::Overwritten { index }
            }
            None if working.is_empty() || self.contains(working) => CommitOutcome::Unchanged,
            None => {
                self.sprites.push(working);
                CommitOutcome::Appended { index: self.sprites.len() - 1 }
            }
        }
    }

    /// Serialize as comma-joined tokens.
    pub fn to_persisted(&self) -> String {
        self.sprites.iter().map(|s| encode(*s)).collect::<Vec<_>>().join(&DELIMITER.to_string())
    }

    /// Parse the persisted form, dropping empty, corrupt and repeated entries.
    pub fn from_persisted(text: &str) -> Self {
        let mut dropped = 0usize;
        let sprites = text
            .split(DELIMITER)
            .map(decode)
            .filter(|s| {
                let keep = !s.is_empty();
                if !keep {
                    dropped += 1;
                }
                keep
            })
            .collect::<Vec<_>>();
        // A blank slot splits into one empty piece; that is not corruption
        if dropped > 0 && !text.trim().is_empty() {
            warn!("Dropped {} empty or unreadable sprite token(s) while loading", dropped);
        }
        Self::from_sprites(sprites)
    }
}

impl<'a> IntoIterator for &'a SpriteCollection {
    type Item = &'a Sprite;
    type IntoIter = std::slice::Iter<'a, Sprite>;

    fn into_iter(self) -> Self::IntoIter {
        self.sprites.iter()
    }
}

/// Apply the commit rules to a copy of `collection`.
pub fn commit(origin: Origin, working: Sprite, collection: &SpriteCollection) -> SpriteCollection {
    let mut next = collection.clone();
    next.commit(origin, working);
    next
}

/// Error from a storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Named string slots, the persistence port of the editor.
pub trait Storage {
    /// Read a slot; `Ok(None)` if it was never written.
    fn read(&self, slot: &str) -> Result<Option<String>, StorageError>;

    /// Replace the contents of a slot.
    fn write(&mut self, slot: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory slots
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slot(mut self, slot: &str, value: &str) -> Self {
        self.slots.insert(slot.to_string(), value.to_string());
        self
    }
}

impl Storage for MemoryStorage {
    fn read(&self, slot: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.get(slot).cloned())
    }

    fn write(&mut self, slot: &str, value: &str) -> Result<(), StorageError> {
        self.slots.insert(slot.to_string(), value.to_string());
        Ok(())
    }
}

/// One file per slot inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(slot)
    }
}

impl Storage for FileStorage {
    fn read(&self, slot: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(slot);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    fn write(&mut self, slot: &str, value: &str) -> Result<(), StorageError> {
        let path = self.slot_path(slot);
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|source| StorageError::Io {
                path: self.dir.clone(),
                source,
            })?;
        }
        fs::write(&path, value).map_err(|source| StorageError::Io { path, source })
    }
}

/// The saved collection bound to its storage slot.
///
/// Loaded once at construction and written back on every commit.
#[derive(Debug)]
pub struct SpriteStore<S: Storage> {
    storage: S,
    collection: SpriteCollection,
}

impl<S: Storage> SpriteStore<S> {
    /// Load the collection from `storage`.
    pub fn load(storage: S) -> Result<Self, StorageError> {
        let text = storage.read(COLLECTION_SLOT)?.unwrap_or_default();
        let collection = SpriteCollection::from_persisted(&text);
        debug!("Loaded {} saved sprite(s)", collection.len());
        Ok(Self { storage, collection })
    }

    pub fn collection(&self) -> &SpriteCollection {
        &self.collection
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Reconcile an edit and persist the result.
    ///
    /// The in-memory collection only changes once the slot write succeeds.
    pub fn commit(&mut self, origin: Origin, working: Sprite) -> Result<CommitOutcome, StorageError> {
        let mut next = self.collection.clone();
        let outcome = next.commit(origin, working);
        self.storage.write(COLLECTION_SLOT, &next.to_persisted())?;
        self.collection = next;
        debug!("Commit {:?} -> {}: {:?}", origin, working, outcome);
        Ok(outcome)
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}
