//! Text rendering of storefront views.

use colored::Colorize;
use lumina_core::{CartState, ChatMessage, ChatRole, FilterSelection, Product};

/// Formats a price as dollars with thousands separators: `$1,299`, `$19.99`.
pub fn format_price(amount: f64) -> String {
    let cents = (amount * 100.0).round() as u64;
    let dollars = cents / 100;
    let remainder = cents % 100;

    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if remainder == 0 {
        format!("${grouped}")
    } else {
        format!("${grouped}.{remainder:02}")
    }
}

/// `"1 item"`, `"3 items"`.
pub fn item_count(count: u64) -> String {
    if count == 1 {
        "1 item".to_string()
    } else {
        format!("{count} items")
    }
}

/// One-line product card.
pub fn product_card(product: &Product) -> String {
    format!(
        "{:>4}  {:<26} {:>10}  {:<12} ★ {:.1}",
        product.id.bright_black(),
        product.name.bold(),
        format_price(product.price).green(),
        product.category.to_string(),
        product.rating
    )
}

/// The shop grid for a derived view.
pub fn shop(selection: &FilterSelection, products: &[&Product]) -> String {
    let mut out = format!(
        "{}\n{}\n",
        "Our Collection".bold(),
        format!("Category: {}  Sort: {}", selection.category, selection.sort).bright_black()
    );
    if products.is_empty() {
        out.push_str("No products found in this category.");
        return out;
    }
    let cards: Vec<String> = products.iter().map(|p| product_card(p)).collect();
    out.push_str(&cards.join("\n"));
    out
}

/// The home page featured section.
pub fn home(featured: &[Product]) -> String {
    let mut out = format!(
        "{}\n{}\n\n{}\n",
        "Modern Living Perfected".bold(),
        "Thoughtfully designed furniture that blends comfort, craftsmanship, and timeless style."
            .bright_black(),
        "Featured".bold()
    );
    let cards: Vec<String> = featured.iter().map(product_card).collect();
    out.push_str(&cards.join("\n"));
    out
}

/// The product detail page.
pub fn product_details(product: &Product) -> String {
    format!(
        "{}\n{}  ·  {}  ·  ★ {:.1}\n\n{}\n\n{}\n{}",
        product.name.bold(),
        format_price(product.price).green(),
        product.category,
        product.rating,
        product.description,
        product.image.bright_black(),
        format!(
            "/add {id} to add to cart, /tips {id} for AI styling tips",
            id = product.id
        )
        .bright_black()
    )
}

/// The cart drawer. Callers only render it while the panel is open.
pub fn cart_panel(state: &CartState) -> String {
    let mut out = format!("{}\n", "Your Cart".bold());
    if state.is_empty() {
        out.push_str("Your cart is empty\nLooks like you haven't found anything yet.");
        return out;
    }

    for line in state.lines() {
        let product = line.product();
        out.push_str(&format!(
            "{:>4}  {:<26} {:<12} x{:<3} {:>10}\n",
            product.id.bright_black(),
            product.name,
            product.category.to_string(),
            line.quantity(),
            format_price(line.line_total()).green()
        ));
    }
    out.push_str(&format!(
        "Subtotal ({}): {}\n{}",
        item_count(state.count()),
        format_price(state.total()).bold(),
        "Shipping and taxes calculated at checkout.".bright_black()
    ));
    out
}

/// A chat bubble.
pub fn chat_message(message: &ChatMessage) -> String {
    match message.role {
        ChatRole::User => format!("> {}", message.text).green().to_string(),
        ChatRole::Assistant => {
            let lines: Vec<String> = message
                .text
                .lines()
                .map(|line| line.bright_blue().to_string())
                .collect();
            format!("{}\n{}", "[Lumina]".bright_magenta(), lines.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumina_core::{CartStore, Catalog};

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(0.0), "$0");
        assert_eq!(format_price(899.0), "$899");
        assert_eq!(format_price(1299.0), "$1,299");
        assert_eq!(format_price(1234567.5), "$1,234,567.50");
        assert_eq!(format_price(19.99), "$19.99");
    }

    #[test]
    fn test_cart_panel_lists_lines_and_subtotal() {
        colored::control::set_override(false);
        let store = CartStore::new();
        let sofa = Catalog::builtin().get("2").unwrap();
        store.add_to_cart(sofa);
        store.add_to_cart(sofa);

        let panel = cart_panel(&store.snapshot());
        assert!(panel.contains("Aria Velvet Sofa"));
        assert!(panel.contains("x2"));
        assert!(panel.contains("Subtotal (2 items): $4,998"));
    }

    #[test]
    fn test_single_item_subtotal_is_singular() {
        colored::control::set_override(false);
        let store = CartStore::new();
        store.add_to_cart(Catalog::builtin().get("7").unwrap());

        let panel = cart_panel(&store.snapshot());
        assert!(panel.contains("Subtotal (1 item): $329"));
        assert_eq!(item_count(0), "0 items");
    }

    #[test]
    fn test_empty_cart_panel() {
        colored::control::set_override(false);
        let panel = cart_panel(&CartStore::new().snapshot());
        assert!(panel.contains("Your cart is empty"));
    }

    #[test]
    fn test_empty_shop_view() {
        colored::control::set_override(false);
        let out = shop(&FilterSelection::default(), &[]);
        assert!(out.contains("No products found in this category."));
    }
}
