//! Session store: transient marketplace state behind a storage interface.
//!
//! Cart, conversation, and message state lives behind the [`SessionStore`]
//! trait instead of a shared mutable global. Handlers receive the store
//! through [`crate::state::AppState`] and mutate carts only through
//! [`SessionStore::with_cart`], which runs the whole read-modify-write under
//! one exclusive lock. Reads hand out cloned snapshots, so no caller ever
//! holds a reference into the store.

mod memory;

pub use memory::MemoryStore;

use hondumarket_core::{
    Cart, CartError, Conversation, ConversationId, Message, Money, ProductId, UserId,
};

/// Errors from session store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The conversation does not exist.
    #[error("conversation not found: {0}")]
    ConversationNotFound(ConversationId),

    /// The sender is not a participant of the conversation.
    #[error("user {0} is not a participant of this conversation")]
    NotParticipant(UserId),

    /// A conversation must have at least two participants.
    #[error("conversation needs at least two participants")]
    TooFewParticipants,

    /// A cart-level rule was violated.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// A writer panicked while holding the store lock.
    #[error("session store lock poisoned")]
    Poisoned,
}

/// Storage interface for transient marketplace state.
///
/// Implementations must be safe for concurrent use: reads return isolated
/// snapshots and `with_cart` is atomic with respect to all other operations.
pub trait SessionStore: Send + Sync {
    /// Snapshot of a user's cart, if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if the store lock is poisoned.
    fn cart(&self, user_id: &UserId) -> Result<Option<Cart>, StoreError>;

    /// Transactional read-modify-write on a user's cart.
    ///
    /// Creates an empty active cart for the user if none exists yet, runs
    /// `f` on it under an exclusive lock, and returns a snapshot of the
    /// result. If `f` fails, the cart is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Cart`] if `f` rejects the mutation, or
    /// [`StoreError::Poisoned`] if the store lock is poisoned.
    fn with_cart(
        &self,
        user_id: &UserId,
        f: &mut dyn FnMut(&mut Cart) -> Result<(), CartError>,
    ) -> Result<Cart, StoreError>;

    /// Conversations the user participates in, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if the store lock is poisoned.
    fn conversations_for(&self, user_id: &UserId) -> Result<Vec<Conversation>, StoreError>;

    /// Snapshot of a conversation, if it exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Poisoned`] if the store lock is poisoned.
    fn conversation(&self, id: &ConversationId) -> Result<Option<Conversation>, StoreError>;

    /// Messages in a conversation, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ConversationNotFound`] if the conversation does
    /// not exist, or [`StoreError::Poisoned`] on a poisoned lock.
    fn messages_in(&self, id: &ConversationId) -> Result<Vec<Message>, StoreError>;

    /// Start a conversation between participants.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TooFewParticipants`] for fewer than two
    /// participants, or [`StoreError::Poisoned`] on a poisoned lock.
    fn start_conversation(
        &self,
        participants: Vec<UserId>,
        subject: String,
    ) -> Result<Conversation, StoreError>;

    /// Append a message to a conversation.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ConversationNotFound`] if the conversation does
    /// not exist, [`StoreError::NotParticipant`] if the sender is not a
    /// participant, or [`StoreError::Poisoned`] on a poisoned lock.
    fn append_message(
        &self,
        conversation_id: &ConversationId,
        sender_id: &UserId,
        body: String,
    ) -> Result<Message, StoreError>;
}

/// Cart convenience operations built on [`SessionStore::with_cart`].
///
/// These keep the status and totals rules in one place; route handlers call
/// these rather than composing closures themselves.
pub trait CartOps: SessionStore {
    /// Add units of a product to the user's cart.
    ///
    /// # Errors
    ///
    /// See [`SessionStore::with_cart`].
    fn add_item(
        &self,
        user_id: &UserId,
        product_id: ProductId,
        title: String,
        unit_price: Money,
        quantity: u32,
    ) -> Result<Cart, StoreError> {
        self.with_cart(user_id, &mut |cart| {
            cart.add_item(
                product_id.clone(),
                title.clone(),
                unit_price,
                quantity,
                chrono::Utc::now(),
            )?;
            Ok(())
        })
    }

    /// Set the quantity of a cart line; 0 removes the line.
    ///
    /// # Errors
    ///
    /// See [`SessionStore::with_cart`].
    fn update_item_quantity(
        &self,
        user_id: &UserId,
        line_id: &hondumarket_core::LineItemId,
        quantity: u32,
    ) -> Result<Cart, StoreError> {
        self.with_cart(user_id, &mut |cart| {
            cart.update_quantity(line_id, quantity, chrono::Utc::now())
        })
    }

    /// Remove a line from the user's cart.
    ///
    /// # Errors
    ///
    /// See [`SessionStore::with_cart`].
    fn remove_item(
        &self,
        user_id: &UserId,
        line_id: &hondumarket_core::LineItemId,
    ) -> Result<Cart, StoreError> {
        self.with_cart(user_id, &mut |cart| {
            cart.remove_item(line_id, chrono::Utc::now())
        })
    }

    /// Check the user's cart out (terminal).
    ///
    /// # Errors
    ///
    /// See [`SessionStore::with_cart`].
    fn checkout(&self, user_id: &UserId) -> Result<Cart, StoreError> {
        self.with_cart(user_id, &mut |cart| cart.checkout(chrono::Utc::now()))
    }

    /// Abandon the user's cart (terminal).
    ///
    /// # Errors
    ///
    /// See [`SessionStore::with_cart`].
    fn abandon(&self, user_id: &UserId) -> Result<Cart, StoreError> {
        self.with_cart(user_id, &mut |cart| cart.abandon(chrono::Utc::now()))
    }
}

impl<S: SessionStore + ?Sized> CartOps for S {}
