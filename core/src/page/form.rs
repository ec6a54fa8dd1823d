use tracing::{error, info};

use super::{Control, ControlState, PageContext, View, SAVE_REDIRECT_DELAY};
use crate::error::ValidationError;
use crate::http::Transport;
use crate::notify::Notification;
use crate::route::{query_id, Route};
use crate::types::{ClothingItem, ItemForm, ItemId};

const LOADING_LABEL: &str = "Loading...";
const CREATE_LABEL: &str = "Save";
const EDIT_LABEL: &str = "Save changes";
const CREATING_LABEL: &str = "Creating...";
const SAVING_LABEL: &str = "Saving...";

/// Create a new item, or edit the one named by the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(ItemId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Not accepting submissions: edit preload pending or failed, or a
    /// previous submission is still in flight or already succeeded.
    Ignored,
    /// Validation failed; nothing was sent.
    Rejected(ValidationError),
    /// Saved; carries the id the detail page will show.
    Completed(ItemId),
    /// The request failed; the submit button is usable again.
    Failed,
}

#[derive(Debug, Clone)]
pub struct FormController {
    mode: FormMode,
    /// The record being edited, as the backend returned it.
    original: Option<ClothingItem>,
    ready: bool,
    submitting: bool,
}

impl FormController {
    pub fn new(mode: FormMode) -> Self {
        Self {
            mode,
            original: None,
            ready: false,
            submitting: false,
        }
    }

    pub fn from_query(query: &str) -> Self {
        Self::new(match query_id(query) {
            Some(id) => FormMode::Edit(id),
            None => FormMode::Create,
        })
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    /// Whether a submission would be accepted right now.
    pub fn is_ready(&self) -> bool {
        self.ready && !self.submitting
    }

    fn idle_label(&self) -> &'static str {
        match self.mode {
            FormMode::Create => CREATE_LABEL,
            FormMode::Edit(_) => EDIT_LABEL,
        }
    }

    /// Prepare the form. In edit mode the record is fetched and copied into
    /// the fields before the submit button is enabled; if that fails the
    /// button stays disabled.
    pub fn init<T: Transport, V: View>(&mut self, ctx: &mut PageContext<T, V>) -> bool {
        let id = match &self.mode {
            FormMode::Create => {
                self.ready = true;
                ctx.view.set_control(&Control::Submit, ControlState::enabled(CREATE_LABEL));
                return true;
            }
            FormMode::Edit(id) => id.clone(),
        };

        ctx.view.set_control(&Control::Submit, ControlState::disabled(LOADING_LABEL));

        match ctx.client.get_item_via(&mut ctx.transport, &id) {
            Ok(Some(item)) => {
                ctx.view.fill_form(&ItemForm::from_item(&item));
                self.original = Some(item);
                self.ready = true;
                ctx.view.set_control(&Control::Submit, ControlState::enabled(EDIT_LABEL));
            }
            Ok(None) => {
                info!(%id, "clothing item to edit not found");
                ctx.view.set_control(&Control::Submit, ControlState::disabled(EDIT_LABEL));
                ctx.view.notify(Notification::error("Item not found for editing."));
            }
            Err(err) => {
                error!(error = %err, %id, "failed to load clothing item for editing");
                ctx.view.set_control(&Control::Submit, ControlState::disabled(EDIT_LABEL));
                ctx.view.notify(Notification::error("Failed to load data for editing."));
            }
        }
        self.ready
    }

    /// Validate the inputs and create or replace the record.
    ///
    /// Validation failures never reach the transport.
    pub fn submit<T: Transport, V: View>(&mut self, ctx: &mut PageContext<T, V>, form: &ItemForm) -> SubmitOutcome {
        if !self.is_ready() {
            return SubmitOutcome::Ignored;
        }

        let draft = match form.collect().into_draft() {
            Ok(draft) => draft,
            Err(err) => {
                ctx.view.notify(Notification::error(err.to_string()));
                return SubmitOutcome::Rejected(err);
            }
        };

        self.submitting = true;
        let busy_label = match self.mode {
            FormMode::Create => CREATING_LABEL,
            FormMode::Edit(_) => SAVING_LABEL,
        };
        ctx.view.set_control(&Control::Submit, ControlState::disabled(busy_label));

        let result = match &self.original {
            None => ctx
                .client
                .create_item_via(&mut ctx.transport, &draft)
                .map(|created| (created.id, "Item created successfully.")),
            // The id goes back exactly as the backend sent it.
            Some(original) => ctx
                .client
                .replace_item_via(&mut ctx.transport, &original.id, &draft)
                .map(|()| (original.id.clone(), "Item updated successfully.")),
        };

        match result {
            Ok((id, message)) => {
                info!(%id, "saved clothing item");
                ctx.view.notify(Notification::success(message));
                ctx.view.navigate(Route::Detail(id.clone()), SAVE_REDIRECT_DELAY);
                SubmitOutcome::Completed(id)
            }
            Err(err) => {
                error!(error = %err, "failed to save clothing item");
                self.submitting = false;
                ctx.view.notify(Notification::error("Failed to save the item."));
                ctx.view
                    .set_control(&Control::Submit, ControlState::enabled(self.idle_label()));
                SubmitOutcome::Failed
            }
        }
    }
}
