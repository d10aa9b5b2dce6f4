//! Domain core of the Lumina Living storefront: the product catalog, the
//! session cart, the shop view-model, and the assistant chat session.

pub mod cart;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod error;
pub mod filter;
pub mod product;

// Re-export common error type
pub use error::LuminaError;

pub use cart::{CartLine, CartState, CartStore, CheckoutSummary};
pub use catalog::Catalog;
pub use chat::{ChatError, ChatMessage, ChatPhase, ChatRole, ChatSession, ChatTurn, PendingTurn};
pub use config::GatewayConfig;
pub use filter::{CategoryFilter, FilterSelection, SortMode, derive_view};
pub use product::{Category, Product};
