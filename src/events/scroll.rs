use crate::handles::Listener;
use crate::nav::{self, SharedNavbar};
use crate::workflow::{self, SharedWorkflow};
use web_sys as web;

/// One window `scroll` listener feeding both trackers. The navbar samples on
/// every event; the workflow diagram goes through its scroll gate.
pub fn wire_scroll(
    window: &web::Window,
    navbar: SharedNavbar,
    workflow: Option<SharedWorkflow>,
) -> anyhow::Result<Listener> {
    Listener::new(window, "scroll", move |_ev| {
        nav::on_scroll(&navbar);
        if let Some(wf) = &workflow {
            workflow::on_scroll(wf);
        }
    })
}
