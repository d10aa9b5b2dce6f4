//! One storefront browsing session.
//!
//! [`StoreSession`] owns the session's cart, shop selection and chat, and turns
//! parsed commands into rendered output. The cart is only written through its
//! intents; the prompt badge and the open cart drawer read from a subscription.

use colored::Colorize;
use lumina_core::{
    CartState, CartStore, Catalog, ChatError, ChatSession, FilterSelection, derive_view,
};
use lumina_interaction::AssistantGateway;
use tokio::sync::watch;

use crate::command::Command;
use crate::render;

const FEATURED_COUNT: usize = 4;
const PRODUCT_NOT_FOUND: &str = "Product not found.";

/// What the REPL should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Output(String),
    Quit,
}

impl Outcome {
    fn text(text: impl Into<String>) -> Self {
        Self::Output(text.into())
    }
}

pub struct StoreSession {
    catalog: Catalog,
    cart: CartStore,
    cart_view: watch::Receiver<CartState>,
    selection: FilterSelection,
    chat: ChatSession,
    gateway: AssistantGateway,
}

impl StoreSession {
    pub fn new(catalog: Catalog, gateway: AssistantGateway) -> Self {
        let cart = CartStore::new();
        let cart_view = cart.subscribe();
        Self {
            catalog,
            cart,
            cart_view,
            selection: FilterSelection::default(),
            chat: ChatSession::new(),
            gateway,
        }
    }

    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    /// Prompt text with the cart badge.
    pub fn prompt(&self) -> String {
        let count = self.cart_view.borrow().count();
        if count == 0 {
            "lumina> ".to_string()
        } else {
            format!("lumina [{count}]> ")
        }
    }

    /// Renders the cart drawer if the cart changed since the last call and
    /// the drawer is open.
    pub fn take_cart_update(&mut self) -> Option<String> {
        if !self.cart_view.has_changed().unwrap_or(false) {
            return None;
        }
        let state = self.cart_view.borrow_and_update();
        state.is_panel_open().then(|| render::cart_panel(&state))
    }

    pub async fn execute(&mut self, command: Command) -> Outcome {
        tracing::debug!(?command, "Executing command");
        match command {
            Command::Quit => Outcome::Quit,
            Command::Help => Outcome::text(help()),
            Command::Home => Outcome::text(render::home(self.catalog.featured(FEATURED_COUNT))),
            Command::Shop => Outcome::text(self.shop()),
            Command::Category(category) => {
                self.selection.category = category;
                Outcome::text(self.shop())
            }
            Command::Sort(sort) => {
                self.selection.sort = sort;
                Outcome::text(self.shop())
            }
            Command::Product(id) => match self.catalog.find(&id) {
                Some(product) => Outcome::text(render::product_details(product)),
                None => Outcome::text(PRODUCT_NOT_FOUND),
            },
            Command::Tips(id) => self.styling_tips(&id).await,
            Command::Add(id) => match self.catalog.find(&id) {
                Some(product) => {
                    self.cart.add_to_cart(product);
                    Outcome::text(format!("Added {} to your cart.", product.name))
                }
                None => Outcome::text(PRODUCT_NOT_FOUND),
            },
            Command::Remove(id) => {
                self.cart.remove_from_cart(&id);
                Outcome::text("")
            }
            Command::Quantity(id, quantity) => {
                self.cart.update_quantity(&id, quantity);
                Outcome::text("")
            }
            Command::Increment(id) => self.step_quantity(&id, 1),
            Command::Decrement(id) => self.step_quantity(&id, -1),
            Command::Cart => {
                self.cart.set_panel_open(true);
                let state = self.cart_view.borrow_and_update();
                Outcome::text(render::cart_panel(&state))
            }
            Command::Close => {
                self.cart.set_panel_open(false);
                Outcome::text("")
            }
            Command::Clear => {
                self.cart.clear_cart();
                Outcome::text("")
            }
            Command::Checkout => match self.cart.checkout() {
                Some(summary) => Outcome::text(format!(
                    "Checkout functionality coming soon! ({}, {})",
                    render::item_count(summary.count),
                    render::format_price(summary.total)
                )),
                None => Outcome::text("Your cart is empty"),
            },
            Command::Chat(text) => self.send_chat(&text).await,
        }
    }

    fn shop(&self) -> String {
        let view = derive_view(self.catalog.products(), &self.selection);
        render::shop(&self.selection, &view)
    }

    // Mirrors the drawer's +/- buttons, which send the current quantity ± 1.
    fn step_quantity(&mut self, id: &str, delta: i64) -> Outcome {
        let current = self.cart.snapshot().line(id).map(|line| line.quantity());
        match current {
            Some(quantity) => {
                self.cart.update_quantity(id, i64::from(quantity) + delta);
                Outcome::text("")
            }
            None => Outcome::text(format!("'{id}' is not in your cart.")),
        }
    }

    async fn styling_tips(&self, id: &str) -> Outcome {
        let Some(product) = self.catalog.find(id) else {
            return Outcome::text(PRODUCT_NOT_FOUND);
        };
        let tips = self
            .gateway
            .get_styling_tips(&product.name, &product.description)
            .await;
        Outcome::text(format!("{}\n{}", "AI Styling Guide".bold(), tips))
    }

    async fn send_chat(&mut self, text: &str) -> Outcome {
        let pending = match self.chat.begin_send(text) {
            Ok(pending) => pending,
            Err(ChatError::EmptyMessage) => return Outcome::text(""),
            Err(err) => return Outcome::text(err.to_string()),
        };

        let reply = self
            .gateway
            .get_assistant_reply(&pending.history, &pending.message)
            .await;

        match self.chat.complete(reply) {
            Ok(message) => Outcome::text(render::chat_message(message)),
            Err(err) => Outcome::text(err.to_string()),
        }
    }
}

fn help() -> String {
    let usage = [
        ("/home", "Featured products"),
        ("/shop", "Browse the collection"),
        ("/category <name|all>", "Filter by room"),
        ("/sort <featured|low-high|high-low>", "Order by price"),
        ("/product <id>", "Product details"),
        ("/tips <id>", "AI styling tips for a product"),
        ("/add <id>", "Add one to the cart"),
        ("/remove <id>", "Remove a cart line"),
        ("/qty <id> <n>", "Set a line quantity (0 removes)"),
        ("/inc <id>, /dec <id>", "Step a line quantity"),
        ("/cart, /close", "Open or close the cart drawer"),
        ("/clear", "Empty the cart"),
        ("/checkout", "Check out"),
        ("/help", "This list"),
        ("quit", "Leave the store"),
    ];

    let mut out = String::from("Anything else you type goes to the Lumina assistant.\n");
    for (command, description) in usage {
        out.push_str(&format!("  {:<38} {}\n", command.bright_cyan(), description));
    }
    out
}
