//! Editor workspace: saved collection, share fragment and the open session
//!
//! The workspace is the application state of the editor. It is built once
//! from a [`Storage`] backend: the saved collection comes from one slot and
//! the share fragment from another. The fragment seeds both the session's
//! original identity and its working value. Every commit persists the
//! collection and replaces the fragment with the new working token.

use log::debug;
use rand::Rng;

use crate::bitgrid::Sprite;
use crate::codec::{decode, decode_opt, encode};
use crate::gallery::initial_sprites;
use crate::session::EditSession;
use crate::store::{CommitOutcome, SpriteCollection, SpriteStore, Storage, StorageError, FRAGMENT_SLOT};
use crate::transforms::{flip, generate_random_sprites, invert};

/// Number of random suggestions generated at startup
pub const DEFAULT_RANDOM_COUNT: usize = 100;

/// Editor state bound to a storage backend.
#[derive(Debug)]
pub struct Workspace<S: Storage> {
    store: SpriteStore<S>,
    session: EditSession,
    initial_sprites: Vec<Sprite>,
    random_sprites: Vec<Sprite>,
}

impl<S: Storage> Workspace<S> {
    /// Load the collection and open the sprite named by the share fragment.
    pub fn init<R: Rng + ?Sized>(storage: S, random_count: usize, rng: &mut R) -> Result<Self, StorageError> {
        let fragment = storage.read(FRAGMENT_SLOT)?;
        let sprite = decode_opt(fragment.as_deref().map(|f| f.trim_start_matches('#')));
        let store = SpriteStore::load(storage)?;
        debug!("Opening {} from share fragment", sprite);

        Ok(Self {
            store,
            session: EditSession::open(sprite),
            initial_sprites: initial_sprites(),
            random_sprites: generate_random_sprites(random_count, rng),
        })
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut EditSession {
        &mut self.session
    }

    pub fn collection(&self) -> &SpriteCollection {
        self.store.collection()
    }

    pub fn initial_sprites(&self) -> &[Sprite] {
        &self.initial_sprites
    }

    pub fn random_sprites(&self) -> &[Sprite] {
        &self.random_sprites
    }

    pub fn storage(&self) -> &S {
        self.store.storage()
    }

    /// Switch to another sprite, starting a fresh session.
    pub fn open(&mut self, sprite: Sprite) {
        self.session = EditSession::open(sprite);
    }

    /// Open a token, as when following a shared link.
    pub fn open_token(&mut self, token: &str) {
        self.open(decode(token));
    }

    /// Mirror the working sprite.
    pub fn flip(&mut self, horizontal: bool) -> Sprite {
        let flipped = flip(self.session.working(), horizontal);
        self.session.set_working(flipped);
        flipped
    }

    pub fn invert(&mut self) -> Sprite {
        let inverted = invert(self.session.working());
        self.session.set_working(inverted);
        inverted
    }

    /// Reconcile the working sprite into the collection and the fragment.
    ///
    /// The fragment is replaced rather than appended, so no extra history
    /// entry is created. It is written first: when that write fails nothing
    /// is persisted, and when the collection write fails afterwards the
    /// fragment already names the working sprite while the saved collection
    /// (on disk and in memory) is left as it was.
    pub fn commit(&mut self) -> Result<CommitOutcome, StorageError> {
        let working = self.session.working();
        self.store.storage_mut().write(FRAGMENT_SLOT, &encode(working))?;
        self.store.commit(self.session.original(), working)
    }

    /// Shareable link for the working sprite: `base#<Token>`.
    pub fn share_url(&self, base: &str) -> String {
        share_url(base, self.session.working())
    }

    pub fn into_storage(self) -> S {
        self.store.into_storage()
    }
}

/// Shareable link for a sprite: `base#<Token>`, replacing any fragment
/// already on `base`.
///
/// ```
/// use sprite5::bitgrid::Sprite;
/// use sprite5::editor::share_url;
///
/// let url = share_url("https://example.com/#0x1", Sprite::from_bits_truncate(0x1F));
/// assert_eq!(url, "https://example.com/#0x1F");
/// ```
pub fn share_url(base: &str, sprite: Sprite) -> String {
    let base = base.split('#').next().unwrap_or(base);
    format!("{}#{}", base, encode(sprite))
}
