/// Callback data carried by the tracking cancel button.
pub const CANCEL_TRACKING_CALLBACK: &str = "track:cancel";

/// Inline keyboard (buttons) attached to an outgoing message.
#[derive(Clone, Debug)]
pub struct InlineKeyboard {
    pub buttons: Vec<InlineButton>,
}

#[derive(Clone, Debug)]
pub struct InlineButton {
    pub label: String,
    pub callback_data: String,
}

impl InlineKeyboard {
    pub fn new(buttons: Vec<InlineButton>) -> Self {
        Self { buttons }
    }

    /// The single Cancel button attached to "tracking started" messages.
    pub fn cancel_tracking() -> Self {
        Self::new(vec![InlineButton {
            label: "❌ Cancel".to_string(),
            callback_data: CANCEL_TRACKING_CALLBACK.to_string(),
        }])
    }
}
