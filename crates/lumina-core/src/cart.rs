//! Session cart state.
//!
//! [`CartStore`] owns the only writable copy of [`CartState`]. Writes go
//! through the intent methods; readers either take a snapshot or hold a
//! `watch::Receiver` from [`CartStore::subscribe`]. Every mutation runs inside
//! `send_if_modified`, so `count` and `total` are recomputed before any
//! receiver can observe the new state.

use serde::Serialize;
use tokio::sync::watch;

use crate::product::Product;

/// One product and how many of it are in the cart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    product: Product,
    quantity: u32,
}

impl CartLine {
    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn id(&self) -> &str {
        &self.product.id
    }

    /// Always at least 1.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// `price * quantity`
    pub fn line_total(&self) -> f64 {
        self.product.price * f64::from(self.quantity)
    }
}

/// Snapshot of the cart as seen by readers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CartState {
    lines: Vec<CartLine>,
    count: u64,
    total: f64,
    panel_open: bool,
}

impl CartState {
    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id() == product_id)
    }

    /// Sum of quantities.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Sum of `price * quantity` over all lines.
    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.lines.iter().position(|line| line.id() == product_id)
    }

    fn recompute(&mut self) {
        self.count = self.lines.iter().map(|line| u64::from(line.quantity)).sum();
        self.total = self.lines.iter().map(CartLine::line_total).sum();
    }
}

/// What was in the cart when it was checked out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CheckoutSummary {
    pub count: u64,
    pub total: f64,
}

/// Owner of one session's cart.
#[derive(Debug)]
pub struct CartStore {
    state: watch::Sender<CartState>,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore {
    /// Creates an empty cart with the panel closed.
    pub fn new() -> Self {
        let (state, _) = watch::channel(CartState::default());
        Self { state }
    }

    /// Returns a receiver that observes every committed cart state.
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.state.subscribe()
    }

    /// Clones the current state.
    pub fn snapshot(&self) -> CartState {
        self.state.borrow().clone()
    }

    pub fn count(&self) -> u64 {
        self.state.borrow().count()
    }

    pub fn total(&self) -> f64 {
        self.state.borrow().total()
    }

    pub fn is_panel_open(&self) -> bool {
        self.state.borrow().is_panel_open()
    }

    /// Adds one unit of `product`, appending a new line if it is not yet in
    /// the cart. Does not open the panel.
    pub fn add_to_cart(&self, product: &Product) {
        self.state.send_modify(|state| {
            match state.position(&product.id) {
                Some(index) => {
                    let line = &mut state.lines[index];
                    line.quantity = line.quantity.saturating_add(1);
                }
                None => state.lines.push(CartLine {
                    product: product.clone(),
                    quantity: 1,
                }),
            }
            state.recompute();
        });
        tracing::debug!(product_id = %product.id, "Added to cart");
    }

    /// Removes the line for `product_id`. Absent ids are ignored.
    pub fn remove_from_cart(&self, product_id: &str) {
        let removed = self.state.send_if_modified(|state| {
            let Some(index) = state.position(product_id) else {
                return false;
            };
            state.lines.remove(index);
            state.recompute();
            true
        });
        if removed {
            tracing::debug!(product_id, "Removed from cart");
        }
    }

    /// Sets the quantity of an existing line.
    ///
    /// A quantity of zero or less removes the line. Quantities beyond
    /// `u32::MAX` are clamped. Absent ids are ignored.
    pub fn update_quantity(&self, product_id: &str, new_quantity: i64) {
        if new_quantity <= 0 {
            self.remove_from_cart(product_id);
            return;
        }
        let quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
        let changed = self.state.send_if_modified(|state| {
            let Some(index) = state.position(product_id) else {
                return false;
            };
            if state.lines[index].quantity == quantity {
                return false;
            }
            state.lines[index].quantity = quantity;
            state.recompute();
            true
        });
        if changed {
            tracing::debug!(product_id, quantity, "Updated cart quantity");
        }
    }

    /// Empties the cart. The panel flag is left alone.
    pub fn clear_cart(&self) {
        let cleared = self.state.send_if_modified(|state| {
            if state.lines.is_empty() {
                return false;
            }
            state.lines.clear();
            state.recompute();
            true
        });
        if cleared {
            tracing::debug!("Cleared cart");
        }
    }

    pub fn set_panel_open(&self, open: bool) {
        self.state.send_if_modified(|state| {
            let changed = state.panel_open != open;
            state.panel_open = open;
            changed
        });
    }

    /// Summarises the cart, empties it, and closes the panel.
    ///
    /// Returns `None` and leaves the state untouched when the cart is empty.
    pub fn checkout(&self) -> Option<CheckoutSummary> {
        let mut summary = None;
        self.state.send_if_modified(|state| {
            if state.lines.is_empty() {
                return false;
            }
            summary = Some(CheckoutSummary {
                count: state.count,
                total: state.total,
            });
            state.lines.clear();
            state.recompute();
            state.panel_open = false;
            true
        });
        if let Some(summary) = &summary {
            tracing::info!(count = summary.count, total = summary.total, "Checked out cart");
        }
        summary
    }
}
