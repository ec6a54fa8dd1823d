use std::time::Duration;

use tracing::{error, info, warn};

use super::{ActionOutcome, Control, ControlState, PageContext, PageError, PageState, View};
use super::{DELETE_LABEL, DELETE_REDIRECT_DELAY, DELETING_LABEL};
use crate::http::Transport;
use crate::notify::Notification;
use crate::render::{
    render_message, DETAIL_ERROR_MESSAGE, LOADING_MESSAGE, MISSING_ID_MESSAGE, NOT_FOUND_MESSAGE,
};
use crate::route::{query_id, Route};
use crate::types::{ClothingItem, ItemId};

const CONFIRM_DELETE: &str = "Do you really want to delete this item?";

/// One item, addressed by the `id` query parameter.
#[derive(Debug, Clone)]
pub struct DetailController {
    id: Option<ItemId>,
    item: Option<ClothingItem>,
    state: PageState,
}

impl DetailController {
    pub fn new(id: Option<ItemId>) -> Self {
        Self {
            id,
            item: None,
            state: PageState::Loading,
        }
    }

    pub fn from_query(query: &str) -> Self {
        Self::new(query_id(query))
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    pub fn item(&self) -> Option<&ClothingItem> {
        self.item.as_ref()
    }

    pub fn load<T: Transport, V: View>(&mut self, ctx: &mut PageContext<T, V>) -> PageState {
        let Some(id) = self.id.clone() else {
            warn!("detail page opened without an id");
            self.state = PageState::Error(PageError::MissingId);
            ctx.view.show(render_message(MISSING_ID_MESSAGE));
            return self.state;
        };

        self.state = PageState::Loading;
        ctx.view.show(render_message(LOADING_MESSAGE));

        match ctx.client.get_item_via(&mut ctx.transport, &id) {
            Ok(Some(item)) => {
                ctx.view.show(ctx.renderer.render_detail(&item));
                self.item = Some(item);
                self.state = PageState::Loaded;
            }
            Ok(None) => {
                info!(%id, "clothing item not found");
                self.state = PageState::Error(PageError::NotFound);
                ctx.view.show(render_message(NOT_FOUND_MESSAGE));
            }
            Err(err) => {
                error!(error = %err, %id, "failed to load clothing item");
                self.state = PageState::Error(PageError::Request);
                ctx.view.show(render_message(DETAIL_ERROR_MESSAGE));
                ctx.view.notify(Notification::error(DETAIL_ERROR_MESSAGE));
            }
        }
        self.state
    }

    pub fn edit<T, V: View>(&self, ctx: &mut PageContext<T, V>) -> ActionOutcome {
        let Some(item) = &self.item else {
            return ActionOutcome::Ignored;
        };
        ctx.view.navigate(Route::Form(Some(item.id.clone())), Duration::ZERO);
        ActionOutcome::Completed
    }

    /// Confirm, delete, then head back to the list after a short delay.
    ///
    /// The button stays disabled on success since the page is going away.
    pub fn delete<T: Transport, V: View>(&mut self, ctx: &mut PageContext<T, V>) -> ActionOutcome {
        let Some(id) = self.item.as_ref().map(|item| item.id.clone()) else {
            return ActionOutcome::Ignored;
        };
        if !ctx.view.confirm(CONFIRM_DELETE) {
            return ActionOutcome::Cancelled;
        }

        ctx.view.set_control(&Control::Delete, ControlState::disabled(DELETING_LABEL));

        match ctx.client.delete_item_via(&mut ctx.transport, &id) {
            Ok(()) => {
                info!(%id, "deleted clothing item");
                self.item = None;
                ctx.view.notify(Notification::success("Item deleted successfully."));
                ctx.view.navigate(Route::List, DELETE_REDIRECT_DELAY);
                ActionOutcome::Completed
            }
            Err(err) => {
                error!(error = %err, %id, "failed to delete clothing item");
                ctx.view.set_control(&Control::Delete, ControlState::enabled(DELETE_LABEL));
                ctx.view.notify(Notification::error("Failed to delete the item."));
                ActionOutcome::Failed
            }
        }
    }
}
