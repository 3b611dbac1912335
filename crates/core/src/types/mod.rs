//! Core types for HonduMarket.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod auth;
pub mod cart;
pub mod email;
pub mod id;
pub mod messaging;
pub mod money;
pub mod status;

pub use auth::{AuthResponse, AuthUser, AuthUserSummary, JwtPayload, LoginCredentials, RegisterData};
pub use cart::{Cart, CartError, CartTotals, LineItem};
pub use email::{Email, EmailError};
pub use id::*;
pub use messaging::{Conversation, Message};
pub use money::{CurrencyCode, Money, MoneyError};
pub use status::{CartStatus, UserRole};
