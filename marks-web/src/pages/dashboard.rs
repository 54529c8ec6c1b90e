use crate::services::{Backend, DashboardService, SignalModel};
use crate::{storage, Route};
use dioxus::prelude::*;
use marks_core::dashboard::{
    DashboardController, DashboardModel, ExpiryTracker, NOTIFICATION_TTL_MS,
};
use marks_ui::utils::sleep_ms;
use marks_ui::DashboardView;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, warn};

#[component]
pub fn Dashboard() -> Element {
    let backend: Signal<Backend> = use_context();
    let nav = navigator();
    let mut model = use_signal(DashboardModel::default);
    let service: DashboardService =
        use_hook(|| DashboardController::new(backend.peek().provider(), SignalModel(model)));

    // Initial load and the change feed. Both tasks belong to this scope; the
    // feed task owns the subscription, so cancelling it releases the feed.
    let feed_task = use_hook({
        let service = service.clone();
        move || {
            let loader = service.clone();
            spawn(async move { loader.load().await });
            match service.subscribe() {
                Ok(subscription) => {
                    let watcher = service.clone();
                    Some(spawn(async move { watcher.watch(subscription).await }))
                }
                Err(e) => {
                    warn!("Live updates unavailable: {e}");
                    None
                }
            }
        }
    });
    use_drop(move || {
        if let Some(task) = feed_task {
            debug!("Releasing realtime feed");
            task.cancel();
        }
    });

    // Expire each notification once
    let expiry = use_hook(|| Rc::new(RefCell::new(ExpiryTracker::default())));
    use_effect({
        let service = service.clone();
        move || {
            let due = expiry.borrow_mut().claim(model.read().notifications.items());
            for id in due {
                let service = service.clone();
                let expiry = expiry.clone();
                spawn(async move {
                    sleep_ms(NOTIFICATION_TTL_MS).await;
                    service.dismiss_notification(id);
                    expiry.borrow_mut().release(id);
                });
            }
        }
    });

    let on_submit = {
        let service = service.clone();
        move |_: ()| {
            let service = service.clone();
            spawn(async move {
                let outcome = service.submit_add().await;
                debug!("Add bookmark: {outcome:?}");
            });
        }
    };
    let on_request_delete = {
        let service = service.clone();
        move |id: String| service.request_delete(&id)
    };
    let on_dismiss_delete = {
        let service = service.clone();
        move |_: ()| service.dismiss_delete()
    };
    let on_confirm_delete = {
        let service = service.clone();
        move |_: ()| {
            let service = service.clone();
            spawn(async move { service.confirm_delete().await });
        }
    };
    let on_request_sign_out = {
        let service = service.clone();
        move |_: ()| service.request_sign_out()
    };
    let on_dismiss_sign_out = {
        let service = service.clone();
        move |_: ()| service.dismiss_sign_out()
    };
    let on_confirm_sign_out = {
        let service = service.clone();
        move |_: ()| {
            let service = service.clone();
            spawn(async move {
                if service.confirm_sign_out().await {
                    storage::clear_session();
                    nav.replace(Route::Landing {});
                }
            });
        }
    };
    let on_dismiss_notification = {
        let service = service.clone();
        move |id: u64| service.dismiss_notification(id)
    };

    let state: ReadSignal<DashboardModel> = model.into();

    rsx! {
        DashboardView {
            state,
            on_title_input: move |value: String| model.write().set_title(value),
            on_url_input: move |value: String| model.write().set_url(value),
            on_submit,
            on_request_delete,
            on_dismiss_delete,
            on_confirm_delete,
            on_request_sign_out,
            on_dismiss_sign_out,
            on_confirm_sign_out,
            on_dismiss_notification,
        }
    }
}
