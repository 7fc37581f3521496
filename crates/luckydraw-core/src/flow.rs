//! Async drivers tying the controller to a transport
//!
//! The controller sits in a `RefCell` shared with the page's event
//! handlers. These helpers borrow it only for the synchronous begin and
//! finish phases and release it across the network round trip.

use std::cell::RefCell;

use tracing::debug;

use crate::controller::{FlowOutcome, LuckyDraw};
use crate::transport::Transport;
use crate::view::View;

/// Select a file and run its analysis, `None` when no file was given
pub async fn select_file<V, T>(
    app: &RefCell<LuckyDraw<V, T::File>>,
    transport: &T,
    file: Option<T::File>,
) -> Option<FlowOutcome>
where
    V: View,
    T: Transport,
{
    let ticket = app.borrow_mut().select_file(file)?;
    let response = transport.analyze(&ticket.file).await;
    Some(app.borrow_mut().finish_analyze(ticket, response))
}

/// Make `file` the current file and analyze it, leaving the file name label as is
pub async fn analyze<V, T>(
    app: &RefCell<LuckyDraw<V, T::File>>,
    transport: &T,
    file: T::File,
) -> FlowOutcome
where
    V: View,
    T: Transport,
{
    let ticket = app.borrow_mut().begin_analyze(file);
    let response = transport.analyze(&ticket.file).await;
    app.borrow_mut().finish_analyze(ticket, response)
}

/// Run the draw flow with the page's current controls
pub async fn draw<V, T>(app: &RefCell<LuckyDraw<V, T::File>>, transport: &T) -> FlowOutcome
where
    V: View,
    T: Transport,
{
    let begun = app.borrow_mut().begin_draw();
    let ticket = match begun {
        Ok(ticket) => ticket,
        Err(err) => {
            debug!("draw not sent: {}", err);
            return FlowOutcome::Failed(err);
        }
    };
    let response = transport.draw(&ticket.file, &ticket.params).await;
    app.borrow_mut().finish_draw(ticket, response)
}
