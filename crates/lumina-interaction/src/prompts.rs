//! Fixed prompt text sent to the hosted model.

use minijinja::{Environment, context};

use crate::error::GatewayError;

/// System persona for the chat assistant.
pub const ASSISTANT_PERSONA: &str = "\
You are 'Lumina', an expert interior design assistant for a high-end furniture store called Lumina Living.
Your goal is to help customers find the perfect furniture, offer styling advice, and answer questions about products.
Traits: Sophisticated, helpful, concise, warm.
If asked about products, assume we sell premium modern, industrial, and scandinavian styles.
Do not make up specific prices unless you know them from the context provided, but you can speak generally about high quality.
Keep responses under 100 words unless detailed advice is requested.";

const STYLING_TIPS_TEMPLATE: &str = r#"Give me 3 short, bulleted styling tips for this furniture piece: "{{ name }}". Description: {{ description }}. Keep it chic and actionable."#;

/// Renders the single-shot styling prompt for a product.
pub fn styling_tips_prompt(name: &str, description: &str) -> Result<String, GatewayError> {
    let env = Environment::new();
    let template = env.template_from_str(STYLING_TIPS_TEMPLATE)?;
    Ok(template.render(context! { name, description })?)
}
