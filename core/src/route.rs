//! Page routes and query-string identifiers.
//!
//! Pages pass the record identifier between each other as an `id` query
//! parameter. The form page selects its mode from it; the detail page treats
//! its absence as an error state.

use url::form_urlencoded;

use crate::types::ItemId;

pub const LIST_PAGE: &str = "index.html";
pub const DETAIL_PAGE: &str = "details.html";
pub const FORM_PAGE: &str = "item_form.html";

/// A navigation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    Detail(ItemId),
    /// `None` opens the form in create mode.
    Form(Option<ItemId>),
}

impl Route {
    /// Relative link to the page, with the id percent-encoded.
    pub fn href(&self) -> String {
        match self {
            Route::List => LIST_PAGE.to_string(),
            Route::Detail(id) => format!("{DETAIL_PAGE}?{}", id_query(id)),
            Route::Form(None) => FORM_PAGE.to_string(),
            Route::Form(Some(id)) => format!("{FORM_PAGE}?{}", id_query(id)),
        }
    }
}

fn id_query(id: &ItemId) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("id", &id.to_string())
        .finish()
}

/// Read the `id` parameter from a query string (with or without the leading
/// `?`). Empty values count as absent.
///
/// The id is kept as text: the page only knows what the URL says, and the
/// backend's own form of the id arrives with the record.
pub fn query_id(query: &str) -> Option<ItemId> {
    let query = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "id")
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(ItemId::Text)
}
