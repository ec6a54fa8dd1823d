//! Page controllers for the list, detail, and form pages.
//!
//! # Design
//! Each controller owns its page-local state (loaded records, form mode,
//! in-flight flags) and receives a `PageContext` carrying the client, the
//! templates, the `Transport`, and the `View`. Everything DOM-shaped goes
//! through `View`, so the controllers run unchanged against a browser shim
//! or a recording fake.
//!
//! Failure policy: backend and transport errors are caught here, logged, and
//! turned into an error notification, with the triggering control put back
//! into an actionable state. Nothing is retried automatically.

mod detail;
mod form;
mod list;

use std::time::Duration;

pub use detail::DetailController;
pub use form::{FormController, FormMode, SubmitOutcome};
pub use list::ListController;

use crate::client::ClothingClient;
use crate::config::ClientConfig;
use crate::notify::Notification;
use crate::render::Renderer;
use crate::route::Route;
use crate::types::{ItemForm, ItemId};

/// Delay before leaving the detail page after a delete.
pub const DELETE_REDIRECT_DELAY: Duration = Duration::from_millis(800);
/// Delay before showing the detail page after a save.
pub const SAVE_REDIRECT_DELAY: Duration = Duration::from_millis(700);

pub const DELETE_LABEL: &str = "Delete";
pub const DELETING_LABEL: &str = "Deleting...";

/// Load state shared by all pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    Loading,
    Loaded,
    Empty,
    Error(PageError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageError {
    /// The query string had no `id`.
    MissingId,
    /// The backend has no record for the requested id.
    NotFound,
    /// The backend or the network failed.
    Request,
}

/// An interactive element whose enabled state and label the pages drive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Control {
    /// Delete button of one list row.
    ItemDelete(ItemId),
    /// Delete button on the detail page.
    Delete,
    /// Form submit button.
    Submit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlState {
    pub enabled: bool,
    pub label: String,
}

impl ControlState {
    pub fn enabled(label: &str) -> Self {
        Self {
            enabled: true,
            label: label.to_string(),
        }
    }

    pub fn disabled(label: &str) -> Self {
        Self {
            enabled: false,
            label: label.to_string(),
        }
    }
}

/// Result of a user-triggered action that may hit the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The action did not apply in the current state.
    Ignored,
    /// The user declined the confirmation prompt.
    Cancelled,
    Completed,
    /// The request failed; the control is usable again.
    Failed,
}

/// DOM-facing side effects of the pages.
pub trait View {
    /// Replace the page's main container content.
    fn show(&mut self, markup: String);

    /// Ask the user a yes/no question.
    fn confirm(&mut self, prompt: &str) -> bool;

    fn set_control(&mut self, control: &Control, state: ControlState);

    /// Drop the list row for `id`.
    fn remove_item(&mut self, id: &ItemId);

    fn fill_form(&mut self, form: &ItemForm);

    fn notify(&mut self, notification: Notification);

    /// Go to `route` once `delay` has elapsed.
    fn navigate(&mut self, route: Route, delay: Duration);
}

impl<V: View + ?Sized> View for &mut V {
    fn show(&mut self, markup: String) {
        (**self).show(markup);
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        (**self).confirm(prompt)
    }

    fn set_control(&mut self, control: &Control, state: ControlState) {
        (**self).set_control(control, state);
    }

    fn remove_item(&mut self, id: &ItemId) {
        (**self).remove_item(id);
    }

    fn fill_form(&mut self, form: &ItemForm) {
        (**self).fill_form(form);
    }

    fn notify(&mut self, notification: Notification) {
        (**self).notify(notification);
    }

    fn navigate(&mut self, route: Route, delay: Duration) {
        (**self).navigate(route, delay);
    }
}

/// Everything a controller needs to do its work.
#[derive(Debug)]
pub struct PageContext<T, V> {
    pub client: ClothingClient,
    pub renderer: Renderer,
    pub transport: T,
    pub view: V,
}

impl<T, V> PageContext<T, V> {
    pub fn new(config: &ClientConfig, transport: T, view: V) -> Self {
        Self {
            client: ClothingClient::from_config(config),
            renderer: Renderer::new(config.currency),
            transport,
            view,
        }
    }
}
