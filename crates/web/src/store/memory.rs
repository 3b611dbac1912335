//! In-memory session store.
//!
//! Backs development and test deployments; a database-backed implementation
//! can replace it behind the same [`SessionStore`] trait. State is process
//! local and lost on restart.

use std::collections::BTreeMap;
use std::sync::RwLock;

use chrono::Utc;
use hondumarket_core::{
    Cart, CartError, Conversation, ConversationId, CurrencyCode, Message, MessageId, UserId,
};

use super::{SessionStore, StoreError};

/// Typed store contents, guarded by one lock so cart/conversation/message
/// updates never interleave.
#[derive(Debug, Default)]
struct StoreState {
    carts: BTreeMap<UserId, Cart>,
    conversations: Vec<Conversation>,
    messages: Vec<Message>,
}

/// In-memory [`SessionStore`] implementation.
#[derive(Debug)]
pub struct MemoryStore {
    state: RwLock<StoreState>,
    currency: CurrencyCode,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new(currency: CurrencyCode) -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            currency,
        }
    }

    /// Create a store seeded with the demo state: one empty active cart for
    /// the demo user, no conversations, no messages.
    #[must_use]
    pub fn seeded() -> Self {
        let store = Self::new(CurrencyCode::HNL);
        {
            let mut state = store
                .state
                .write()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            let demo = UserId::demo();
            state.carts.insert(
                demo.clone(),
                Cart::empty(demo, CurrencyCode::HNL, Utc::now()),
            );
        }
        store
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, StoreState>, StoreError> {
        self.state.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, StoreState>, StoreError> {
        self.state.write().map_err(|_| StoreError::Poisoned)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::seeded()
    }
}

impl SessionStore for MemoryStore {
    fn cart(&self, user_id: &UserId) -> Result<Option<Cart>, StoreError> {
        Ok(self.read()?.carts.get(user_id).cloned())
    }

    fn with_cart(
        &self,
        user_id: &UserId,
        f: &mut dyn FnMut(&mut Cart) -> Result<(), CartError>,
    ) -> Result<Cart, StoreError> {
        let mut state = self.write()?;
        let cart = state
            .carts
            .entry(user_id.clone())
            .or_insert_with(|| Cart::empty(user_id.clone(), self.currency, Utc::now()));

        // Mutate a working copy so a failed closure leaves the stored cart
        // untouched.
        let mut working = cart.clone();
        f(&mut working)?;
        *cart = working.clone();
        Ok(working)
    }

    fn conversations_for(&self, user_id: &UserId) -> Result<Vec<Conversation>, StoreError> {
        let state = self.read()?;
        let mut conversations: Vec<Conversation> = state
            .conversations
            .iter()
            .filter(|c| c.has_participant(user_id))
            .cloned()
            .collect();
        conversations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(conversations)
    }

    fn conversation(&self, id: &ConversationId) -> Result<Option<Conversation>, StoreError> {
        Ok(self
            .read()?
            .conversations
            .iter()
            .find(|c| &c.id == id)
            .cloned())
    }

    fn messages_in(&self, id: &ConversationId) -> Result<Vec<Message>, StoreError> {
        let state = self.read()?;
        if !state.conversations.iter().any(|c| &c.id == id) {
            return Err(StoreError::ConversationNotFound(id.clone()));
        }
        Ok(state
            .messages
            .iter()
            .filter(|m| &m.conversation_id == id)
            .cloned()
            .collect())
    }

    fn start_conversation(
        &self,
        participants: Vec<UserId>,
        subject: String,
    ) -> Result<Conversation, StoreError> {
        if participants.len() < 2 {
            return Err(StoreError::TooFewParticipants);
        }

        let conversation = Conversation {
            id: ConversationId::generate(),
            participants,
            subject,
            created_at: Utc::now(),
        };

        self.write()?.conversations.push(conversation.clone());
        Ok(conversation)
    }

    fn append_message(
        &self,
        conversation_id: &ConversationId,
        sender_id: &UserId,
        body: String,
    ) -> Result<Message, StoreError> {
        let mut state = self.write()?;

        let conversation = state
            .conversations
            .iter()
            .find(|c| &c.id == conversation_id)
            .ok_or_else(|| StoreError::ConversationNotFound(conversation_id.clone()))?;

        if !conversation.has_participant(sender_id) {
            return Err(StoreError::NotParticipant(sender_id.clone()));
        }

        let message = Message {
            id: MessageId::generate(),
            conversation_id: conversation_id.clone(),
            sender_id: sender_id.clone(),
            body,
            sent_at: Utc::now(),
        };

        state.messages.push(message.clone());
        Ok(message)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::CartOps;
    use hondumarket_core::{CartStatus, Money, ProductId};
    use rust_decimal::Decimal;

    fn price(centavos: i64) -> Money {
        Money::new(Decimal::new(centavos, 2), CurrencyCode::HNL)
    }

    #[test]
    fn test_seeded_demo_cart_initial_values() {
        let store = MemoryStore::seeded();
        let cart = store.cart(&UserId::demo()).unwrap().expect("demo cart");

        assert_eq!(cart.user_id, UserId::demo());
        assert_eq!(cart.status, CartStatus::Active);
        assert!(cart.items.is_empty());
        assert!(cart.totals.subtotal.is_zero());
        assert!(cart.totals.tax.is_zero());
        assert!(cart.totals.shipping.is_zero());
        assert!(cart.totals.total.is_zero());
    }

    #[test]
    fn test_reads_do_not_mutate() {
        let store = MemoryStore::seeded();

        for _ in 0..10 {
            let _ = store.cart(&UserId::demo()).unwrap();
            let _ = store.conversations_for(&UserId::demo()).unwrap();
        }

        let cart = store.cart(&UserId::demo()).unwrap().unwrap();
        assert!(cart.items.is_empty());
        assert!(cart.totals.total.is_zero());
        assert!(store.conversations_for(&UserId::demo()).unwrap().is_empty());
    }

    #[test]
    fn test_read_returns_isolated_snapshot() {
        let store = MemoryStore::seeded();
        let mut snapshot = store.cart(&UserId::demo()).unwrap().unwrap();

        // Mutating the snapshot must not leak into the store.
        snapshot.status = CartStatus::Abandoned;

        let fresh = store.cart(&UserId::demo()).unwrap().unwrap();
        assert_eq!(fresh.status, CartStatus::Active);
    }

    #[test]
    fn test_with_cart_creates_cart_on_first_write() {
        let store = MemoryStore::seeded();
        let user = UserId::new("buyer-77");
        assert!(store.cart(&user).unwrap().is_none());

        let cart = store
            .add_item(
                &user,
                ProductId::new("p1"),
                "Cafe de Marcala".to_owned(),
                price(120_00),
                1,
            )
            .unwrap();

        assert_eq!(cart.user_id, user);
        assert_eq!(cart.item_count(), 1);
        assert!(store.cart(&user).unwrap().is_some());
    }

    #[test]
    fn test_failed_mutation_leaves_cart_unchanged() {
        let store = MemoryStore::seeded();
        let user = UserId::demo();
        store
            .add_item(
                &user,
                ProductId::new("p1"),
                "Cafe".to_owned(),
                price(100_00),
                2,
            )
            .unwrap();

        // Mismatched currency is rejected mid-closure.
        let result = store.add_item(
            &user,
            ProductId::new("p2"),
            "Hamaca".to_owned(),
            Money::new(Decimal::new(10_00, 2), CurrencyCode::USD),
            1,
        );
        assert!(matches!(result, Err(StoreError::Cart(_))));

        let cart = store.cart(&user).unwrap().unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.totals.subtotal.amount, Decimal::new(200_00, 2));
    }

    #[test]
    fn test_overflowing_amount_rejected_without_breaking_store() {
        let store = MemoryStore::seeded();
        let user = UserId::demo();

        // An amount at the decimal ceiling must come back as a cart error,
        // not panic inside the write lock.
        let result = store.add_item(
            &user,
            ProductId::new("p1"),
            "Cafe".to_owned(),
            Money::new(Decimal::MAX, CurrencyCode::HNL),
            2,
        );
        assert!(matches!(result, Err(StoreError::Cart(CartError::Money(_)))));

        // The store still serves every user afterwards.
        let cart = store.cart(&user).unwrap().unwrap();
        assert!(cart.items.is_empty());
        store
            .add_item(
                &user,
                ProductId::new("p2"),
                "Hamaca".to_owned(),
                price(250_00),
                1,
            )
            .unwrap();
    }

    #[test]
    fn test_abandon_blocks_further_mutation() {
        let store = MemoryStore::seeded();
        let user = UserId::demo();

        let cart = store.abandon(&user).unwrap();
        assert_eq!(cart.status, CartStatus::Abandoned);

        let result = store.add_item(
            &user,
            ProductId::new("p1"),
            "Cafe".to_owned(),
            price(100_00),
            1,
        );
        assert!(matches!(
            result,
            Err(StoreError::Cart(CartError::NotActive(_)))
        ));
    }

    #[test]
    fn test_checkout_blocks_further_mutation() {
        let store = MemoryStore::seeded();
        let user = UserId::demo();
        store
            .add_item(
                &user,
                ProductId::new("p1"),
                "Cafe".to_owned(),
                price(100_00),
                1,
            )
            .unwrap();

        let cart = store.checkout(&user).unwrap();
        assert_eq!(cart.status, CartStatus::CheckedOut);

        let result = store.add_item(
            &user,
            ProductId::new("p2"),
            "Hamaca".to_owned(),
            price(250_00),
            1,
        );
        assert!(matches!(
            result,
            Err(StoreError::Cart(CartError::NotActive(_)))
        ));
    }

    #[test]
    fn test_conversations_start_empty() {
        let store = MemoryStore::seeded();
        assert!(store.conversations_for(&UserId::demo()).unwrap().is_empty());
    }

    #[test]
    fn test_start_conversation_and_append() {
        let store = MemoryStore::seeded();
        let buyer = UserId::new("buyer-1");
        let seller = UserId::new("seller-1");

        let conv = store
            .start_conversation(
                vec![buyer.clone(), seller.clone()],
                "Hamaca artesanal".to_owned(),
            )
            .unwrap();

        let msg = store
            .append_message(&conv.id, &buyer, "Hola, sigue disponible?".to_owned())
            .unwrap();
        assert_eq!(msg.sender_id, buyer);

        let messages = store.messages_in(&conv.id).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages.first().unwrap().body, "Hola, sigue disponible?");

        // Both participants see the conversation; strangers do not.
        assert_eq!(store.conversations_for(&seller).unwrap().len(), 1);
        assert!(store
            .conversations_for(&UserId::new("stranger"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_start_conversation_needs_two_participants() {
        let store = MemoryStore::seeded();
        let result = store.start_conversation(vec![UserId::demo()], "solo".to_owned());
        assert!(matches!(result, Err(StoreError::TooFewParticipants)));
    }

    #[test]
    fn test_append_to_missing_conversation_fails() {
        let store = MemoryStore::seeded();
        let result = store.append_message(
            &ConversationId::new("missing"),
            &UserId::demo(),
            "hola".to_owned(),
        );
        assert!(matches!(result, Err(StoreError::ConversationNotFound(_))));
    }

    #[test]
    fn test_non_participant_cannot_post() {
        let store = MemoryStore::seeded();
        let conv = store
            .start_conversation(
                vec![UserId::new("buyer-1"), UserId::new("seller-1")],
                "Cafe".to_owned(),
            )
            .unwrap();

        let result =
            store.append_message(&conv.id, &UserId::new("stranger"), "spam".to_owned());
        assert!(matches!(result, Err(StoreError::NotParticipant(_))));
    }

    #[test]
    fn test_messages_in_missing_conversation_fails() {
        let store = MemoryStore::seeded();
        let result = store.messages_in(&ConversationId::new("missing"));
        assert!(matches!(result, Err(StoreError::ConversationNotFound(_))));
    }

    #[test]
    fn test_concurrent_mutations_keep_totals_consistent() {
        use std::sync::Arc;

        let store = Arc::new(MemoryStore::seeded());
        let user = UserId::demo();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                let user = user.clone();
                std::thread::spawn(move || {
                    store
                        .add_item(
                            &user,
                            ProductId::new(format!("p{i}")),
                            format!("Producto {i}"),
                            Money::new(Decimal::new(10_00, 2), CurrencyCode::HNL),
                            1,
                        )
                        .unwrap();
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let cart = store.cart(&user).unwrap().unwrap();
        assert_eq!(cart.items.len(), 8);
        assert_eq!(cart.totals.subtotal.amount, Decimal::new(80_00, 2));
        assert_eq!(cart.totals.total.amount, Decimal::new(80_00, 2));
    }
}
