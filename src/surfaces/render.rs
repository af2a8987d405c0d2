//! HTML and plain-text rendering of status blocks.

use super::StatusBlock;
use minijinja::{Environment, context};
use std::sync::Arc;
use thiserror::Error;

const STATUS_TEMPLATE_NAME: &str = "status.html";

const STATUS_TEMPLATE: &str = r#"<div class="status {{ level }}">
  <h3>{{ symbol }} {{ title }}</h3>
{%- if detail %}
  <p>{{ detail }}</p>
{%- endif %}
{%- if items %}
  <ul>
  {%- for item in items %}
    <li>{{ item }}</li>
  {%- endfor %}
  </ul>
{%- endif %}
</div>"#;

/// Errors returned while rendering a status block.
#[derive(Debug, Clone, Error)]
#[error("failed to render status block: {0}")]
pub struct RenderError(Arc<minijinja::Error>);

/// Renders `block` as an HTML fragment.
///
/// All text is HTML-escaped, so issue titles and tracker error messages can
/// be embedded safely.
///
/// # Errors
///
/// Returns [`RenderError`] when the template fails to render.
pub fn render_html(block: &StatusBlock) -> Result<String, RenderError> {
    let mut environment = Environment::new();
    environment
        .add_template(STATUS_TEMPLATE_NAME, STATUS_TEMPLATE)
        .map_err(|err| RenderError(Arc::new(err)))?;
    let template = environment
        .get_template(STATUS_TEMPLATE_NAME)
        .map_err(|err| RenderError(Arc::new(err)))?;
    template
        .render(context! {
            level => block.level(),
            symbol => block.level().symbol(),
            title => block.title(),
            detail => block.detail(),
            items => block.items(),
        })
        .map_err(|err| RenderError(Arc::new(err)))
}

/// Renders `block` as plain text for terminals and logs.
#[must_use]
pub fn render_text(block: &StatusBlock) -> String {
    let mut text = format!("{} {}", block.level().symbol(), block.title());
    if let Some(detail) = block.detail() {
        text.push_str("\n  ");
        text.push_str(detail);
    }
    for item in block.items() {
        text.push_str("\n  - ");
        text.push_str(item);
    }
    text
}
