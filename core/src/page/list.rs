use std::time::Duration;

use tracing::{error, info};

use super::{ActionOutcome, Control, ControlState, PageContext, PageError, PageState, View};
use super::{DELETE_LABEL, DELETING_LABEL};
use crate::http::Transport;
use crate::notify::Notification;
use crate::render::{render_list_message, EMPTY_LIST_MESSAGE, LIST_ERROR_MESSAGE, LOADING_MESSAGE};
use crate::route::Route;
use crate::types::{ClothingItem, ItemId};

const CONFIRM_DELETE: &str = "Are you sure you want to delete this item?";

/// The collection page: every item with edit and delete actions.
#[derive(Debug, Clone)]
pub struct ListController {
    state: PageState,
    items: Vec<ClothingItem>,
}

impl Default for ListController {
    fn default() -> Self {
        Self::new()
    }
}

impl ListController {
    pub fn new() -> Self {
        Self {
            state: PageState::Loading,
            items: Vec::new(),
        }
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    /// Items currently shown, in backend order.
    pub fn items(&self) -> &[ClothingItem] {
        &self.items
    }

    pub fn load<T: Transport, V: View>(&mut self, ctx: &mut PageContext<T, V>) -> PageState {
        self.state = PageState::Loading;
        ctx.view.show(render_list_message(LOADING_MESSAGE));

        match ctx.client.list_items_via(&mut ctx.transport) {
            Ok(items) => {
                self.state = if items.is_empty() {
                    PageState::Empty
                } else {
                    PageState::Loaded
                };
                ctx.view.show(ctx.renderer.render_list(&items));
                self.items = items;
            }
            Err(err) => {
                error!(error = %err, "failed to load clothing list");
                self.state = PageState::Error(PageError::Request);
                self.items.clear();
                ctx.view.show(render_list_message(LIST_ERROR_MESSAGE));
                ctx.view.notify(Notification::error(LIST_ERROR_MESSAGE));
            }
        }
        self.state
    }

    pub fn edit<T, V: View>(&self, ctx: &mut PageContext<T, V>, id: &ItemId) -> ActionOutcome {
        let Some(id) = self.find(id) else {
            return ActionOutcome::Ignored;
        };
        ctx.view.navigate(Route::Form(Some(id)), Duration::ZERO);
        ActionOutcome::Completed
    }

    /// Confirm, delete on the backend, then drop the local row.
    ///
    /// On failure the row stays and its button is re-enabled for a retry.
    pub fn delete<T: Transport, V: View>(&mut self, ctx: &mut PageContext<T, V>, id: &ItemId) -> ActionOutcome {
        let Some(id) = self.find(id) else {
            return ActionOutcome::Ignored;
        };
        if !ctx.view.confirm(CONFIRM_DELETE) {
            return ActionOutcome::Cancelled;
        }

        let control = Control::ItemDelete(id.clone());
        ctx.view.set_control(&control, ControlState::disabled(DELETING_LABEL));

        match ctx.client.delete_item_via(&mut ctx.transport, &id) {
            Ok(()) => {
                info!(%id, "deleted clothing item");
                self.items.retain(|item| item.id != id);
                ctx.view.remove_item(&id);
                ctx.view.notify(Notification::success("Item deleted successfully."));
                if self.items.is_empty() {
                    self.state = PageState::Empty;
                    ctx.view.show(render_list_message(EMPTY_LIST_MESSAGE));
                }
                ActionOutcome::Completed
            }
            Err(err) => {
                error!(error = %err, %id, "failed to delete clothing item");
                ctx.view.set_control(&control, ControlState::enabled(DELETE_LABEL));
                ctx.view.notify(Notification::error("Failed to delete the item."));
                ActionOutcome::Failed
            }
        }
    }

    /// The shown item's own id for an id the host read back from the page.
    fn find(&self, id: &ItemId) -> Option<ItemId> {
        self.items
            .iter()
            .find(|item| item.id.same_as(id))
            .map(|item| item.id.clone())
    }
}
