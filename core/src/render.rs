//! Markup templates for list rows, the detail card, and page states.
//!
//! Every string that came from a record is escaped before it is embedded,
//! whether it lands in text content or in an attribute value. Absent
//! optional fields render as [`PLACEHOLDER`].

use crate::route::Route;
use crate::types::{ClothingItem, SizeLabel};

pub const PLACEHOLDER: &str = "—";

pub const LOADING_MESSAGE: &str = "Loading...";
pub const EMPTY_LIST_MESSAGE: &str = "No clothing items registered.";
pub const LIST_ERROR_MESSAGE: &str = "Failed to load the list.";
pub const MISSING_ID_MESSAGE: &str = "No ID provided in the query string.";
pub const NOT_FOUND_MESSAGE: &str = "Item not found.";
pub const DETAIL_ERROR_MESSAGE: &str = "Failed to load details.";

/// Escape text for HTML element content.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape text for a double- or single-quoted attribute value.
pub fn escape_attr(value: &str) -> String {
    escape_html(value)
}

/// How monetary values are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub symbol: &'static str,
    /// Between the symbol and the digits.
    pub spacing: &'static str,
    pub thousands: char,
    pub decimal: char,
}

impl CurrencyFormat {
    /// Brazilian real, `R$ 1.234,56` with a non-breaking space.
    pub const fn brl() -> Self {
        Self {
            symbol: "R$",
            spacing: "\u{a0}",
            thousands: '.',
            decimal: ',',
        }
    }

    /// US dollar, `$1,234.56`.
    pub const fn usd() -> Self {
        Self {
            symbol: "$",
            spacing: "",
            thousands: ',',
            decimal: '.',
        }
    }

    /// Two decimals, grouped thousands. Non-finite values render as zero.
    pub fn format(&self, value: f64) -> String {
        let value = if value.is_finite() { value } else { 0.0 };
        let cents = (value.abs() * 100.0).round() as u64;
        let units = (cents / 100).to_string();
        let mut grouped = String::with_capacity(units.len() + units.len() / 3);
        for (i, digit) in units.chars().enumerate() {
            if i > 0 && (units.len() - i) % 3 == 0 {
                grouped.push(self.thousands);
            }
            grouped.push(digit);
        }
        let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
        format!(
            "{sign}{}{}{grouped}{}{:02}",
            self.symbol,
            self.spacing,
            self.decimal,
            cents % 100
        )
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::brl()
    }
}

/// Record-to-markup templates bound to a currency format.
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    currency: CurrencyFormat,
}

impl Renderer {
    pub fn new(currency: CurrencyFormat) -> Self {
        Self { currency }
    }

    pub fn currency(&self) -> CurrencyFormat {
        self.currency
    }

    fn price(&self, item: &ClothingItem) -> String {
        item.price
            .map(|p| self.currency.format(p))
            .unwrap_or_else(|| PLACEHOLDER.to_string())
    }

    /// One `<li>` row with detail link and edit/delete buttons.
    pub fn render_list_item(&self, item: &ClothingItem) -> String {
        let id = escape_attr(&item.id.to_string());
        let name = escape_html(text_or_placeholder(&item.name));
        let size = escape_html(item.size.as_ref().map(SizeLabel::as_str).unwrap_or(PLACEHOLDER));
        let image = match non_blank(&item.image) {
            Some(src) => format!(
                r#"<img src="{}" alt="{}" class="thumb">"#,
                escape_attr(src),
                escape_attr(text_or_placeholder(&item.name)),
            ),
            None => String::new(),
        };
        let href = escape_attr(&Route::Detail(item.id.clone()).href());
        format!(
            r#"<li class="clothing-item" data-id="{id}">
  <div class="item-main">
    {image}
    <div>
      <a href="{href}" class="item-name">{name}</a>
      <div class="sub">{size} • {price}</div>
    </div>
  </div>
  <div>
    <button class="btn btn-edit" data-id="{id}" title="Edit">Edit</button>
    <button class="btn btn-delete" data-id="{id}" title="Delete">Delete</button>
  </div>
</li>"#,
            price = self.price(item),
        )
    }

    /// The whole list body, or the empty-state row when there is nothing to show.
    pub fn render_list(&self, items: &[ClothingItem]) -> String {
        if items.is_empty() {
            return render_list_message(EMPTY_LIST_MESSAGE);
        }
        items
            .iter()
            .map(|item| self.render_list_item(item))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The detail card with its edit/delete actions.
    pub fn render_detail(&self, item: &ClothingItem) -> String {
        let name = text_or_placeholder(&item.name);
        let image = match non_blank(&item.image) {
            Some(src) => format!(
                r#"<img src="{}" alt="{}" class="detail-img">"#,
                escape_attr(src),
                escape_attr(name),
            ),
            None => String::new(),
        };
        format!(
            r#"<div class="detail-top">
  {image}
  <div>
    <h3>{name}</h3>
    <p class="sub">{size} • {price}</p>
    <p class="description">{description}</p>
    <p class="meta"><strong>ID:</strong> {id}</p>
  </div>
</div>
<div class="detail-actions">
  <button id="btn-edit" class="btn">Edit</button>
  <button id="btn-delete" class="btn">Delete</button>
</div>"#,
            name = escape_html(name),
            size = escape_html(item.size.as_ref().map(SizeLabel::as_str).unwrap_or(PLACEHOLDER)),
            price = self.price(item),
            description = escape_html(text_or_placeholder(&item.description)),
            id = escape_html(&item.id.to_string()),
        )
    }
}

/// A status row inside the list container.
pub fn render_list_message(message: &str) -> String {
    format!(r#"<li class="state">{}</li>"#, escape_html(message))
}

/// A status paragraph inside the detail container.
pub fn render_message(message: &str) -> String {
    format!(r#"<p class="state">{}</p>"#, escape_html(message))
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn text_or_placeholder(value: &Option<String>) -> &str {
    non_blank(value).unwrap_or(PLACEHOLDER)
}
