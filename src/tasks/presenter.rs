//! Presentation adapter background task

use std::sync::Arc;
use tracing::{debug, info};

use crate::{presentation::Presentation, state::AppState};

/// Re-render the display and notification whenever a published value changes
pub async fn presenter_task(state: Arc<AppState>) {
    info!("Starting presenter task");

    let mut subscription = state.subscribe();

    loop {
        let presentation = Presentation::render(&state.snapshot(), state.precision());
        let notification = presentation.notification.clone();

        if let Some(previous) = state.update_presentation(presentation) {
            if previous.notification != notification {
                debug!("Notification updated: {}", notification);
            }
            if previous.notification.visible != notification.visible {
                if notification.visible {
                    info!("Notification posted");
                } else {
                    info!("Notification withdrawn");
                }
            }
        }

        if subscription.changed().await.is_err() {
            debug!("Published values closed, presenter task exiting");
            break;
        }
    }
}
