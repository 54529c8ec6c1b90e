use marks_core::dashboard::{
    AddOutcome, DashboardController, DashboardModel, NotificationKind, SubmitBlocked,
};
use marks_core::memory::{InMemoryProvider, Operation};
use marks_core::{BookmarkProvider, NewBookmark, User, ValidationError};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

type Controller = DashboardController<Rc<RefCell<DashboardModel>>>;

fn tracing_init() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_line_number(true)
        .with_target(false)
        .with_file(true)
        .try_init();
}

fn user() -> User {
    User {
        id: "user-1".to_string(),
        email: Some("user-1@example.com".to_string()),
    }
}

async fn setup(provider: &InMemoryProvider) -> Controller {
    tracing_init();
    let model = Rc::new(RefCell::new(DashboardModel::default()));
    let controller = DashboardController::new(Rc::new(provider.clone()), model);
    controller.load().await;
    controller
}

fn fill_form(controller: &Controller, title: &str, url: &str) {
    let mut model = controller.model().borrow_mut();
    model.set_title(title);
    model.set_url(url);
}

#[tokio::test]
async fn test_load_shows_user_and_rows() {
    let provider = InMemoryProvider::with_user(user());
    provider.seed("Older", "https://older.example");
    provider.seed("Newer", "https://newer.example");

    let controller = setup(&provider).await;
    let model = controller.model().borrow();

    assert!(model.loaded);
    assert_eq!(model.user, Some(user()));
    assert_eq!(model.bookmarks, provider.rows());
    assert_eq!(provider.requests().lists, 1);
}

#[tokio::test]
async fn test_add_sends_exactly_one_insert() {
    let provider = InMemoryProvider::with_user(user());
    let controller = setup(&provider).await;
    fill_form(&controller, "  Example ", " https://example.com ");

    let outcome = controller.submit_add().await;

    assert_eq!(outcome, AddOutcome::Added);
    assert_eq!(
        provider.requests().inserts,
        vec![NewBookmark {
            title: "Example".to_string(),
            url: "https://example.com".to_string(),
            user_id: "user-1".to_string(),
        }]
    );
    let model = controller.model().borrow();
    assert_eq!(model.title, "");
    assert_eq!(model.url, "");
    assert!(!model.is_adding);
    assert_eq!(model.bookmarks.len(), 1);
    assert_eq!(
        model.notifications.latest().map(|n| n.kind),
        Some(NotificationKind::Success)
    );
}

#[tokio::test]
async fn test_blank_fields_send_nothing() {
    let provider = InMemoryProvider::with_user(user());
    let controller = setup(&provider).await;

    fill_form(&controller, "   ", "https://example.com");
    assert_eq!(
        controller.submit_add().await,
        AddOutcome::Blocked(SubmitBlocked::Invalid(ValidationError::EmptyTitle))
    );

    fill_form(&controller, "Example", "");
    assert_eq!(
        controller.submit_add().await,
        AddOutcome::Blocked(SubmitBlocked::Invalid(ValidationError::EmptyUrl))
    );

    let requests = provider.requests();
    assert!(requests.inserts.is_empty());
    assert_eq!(requests.lists, 1);
}

#[tokio::test]
async fn test_failed_insert_keeps_fields_and_skips_refresh() {
    let provider = InMemoryProvider::with_user(user());
    provider.set_failing(Operation::Insert, true);
    let controller = setup(&provider).await;
    fill_form(&controller, "Example", "https://example.com");

    assert_eq!(controller.submit_add().await, AddOutcome::Failed);

    let model = controller.model().borrow();
    assert_eq!(model.title, "Example");
    assert_eq!(model.url, "https://example.com");
    assert!(!model.is_adding);
    assert_eq!(
        model.notifications.latest().map(|n| n.message.as_str()),
        Some("Failed to add bookmark")
    );
    assert_eq!(provider.requests().lists, 1);
}

#[tokio::test]
async fn test_add_without_user_fails() {
    let provider = InMemoryProvider::new();
    let controller = setup(&provider).await;
    fill_form(&controller, "Example", "https://example.com");

    assert_eq!(controller.submit_add().await, AddOutcome::Failed);
    assert!(provider.requests().inserts.is_empty());
    assert_eq!(controller.model().borrow().title, "Example");
}

#[tokio::test]
async fn test_dismissed_delete_sends_nothing() {
    let provider = InMemoryProvider::with_user(user());
    let row = provider.seed("Example", "https://example.com");
    let controller = setup(&provider).await;

    controller.request_delete(&row.id);
    assert_eq!(
        controller.model().borrow().delete_request.target.as_deref(),
        Some(row.id.as_str())
    );
    controller.dismiss_delete();
    controller.confirm_delete().await;

    let model = controller.model().borrow();
    assert!(!model.delete_request.open);
    assert_eq!(model.delete_request.target, None);
    assert!(provider.requests().deletes.is_empty());
    assert_eq!(model.bookmarks.len(), 1);
}

#[tokio::test]
async fn test_confirmed_delete_sends_one_request() {
    let provider = InMemoryProvider::with_user(user());
    let row = provider.seed("Example", "https://example.com");
    let controller = setup(&provider).await;

    controller.request_delete(&row.id);
    controller.confirm_delete().await;
    controller.confirm_delete().await;

    assert_eq!(provider.requests().deletes, vec![row.id.clone()]);
    let model = controller.model().borrow();
    assert!(!model.delete_request.open);
    assert!(model.is_empty());
    assert_eq!(
        model.notifications.latest().map(|n| n.message.as_str()),
        Some("Bookmark deleted successfully")
    );
}

#[tokio::test]
async fn test_failed_delete_keeps_dialog_open() {
    let provider = InMemoryProvider::with_user(user());
    let row = provider.seed("Example", "https://example.com");
    provider.set_failing(Operation::Delete, true);
    let controller = setup(&provider).await;

    controller.request_delete(&row.id);
    controller.confirm_delete().await;

    let model = controller.model().borrow();
    assert!(model.delete_request.open);
    assert!(!model.delete_request.in_flight);
    assert_eq!(model.delete_request.target.as_deref(), Some(row.id.as_str()));
    assert_eq!(model.bookmarks.len(), 1);
    assert_eq!(
        model.notifications.latest().map(|n| n.kind),
        Some(NotificationKind::Error)
    );
}

#[tokio::test]
async fn test_failed_fetch_keeps_previous_list() {
    let provider = InMemoryProvider::with_user(user());
    provider.seed("Example", "https://example.com");
    let controller = setup(&provider).await;

    provider.set_failing(Operation::List, true);
    controller.refresh().await;

    let model = controller.model().borrow();
    assert_eq!(model.bookmarks.len(), 1);
    assert_eq!(
        model.notifications.latest().map(|n| n.message.as_str()),
        Some("Failed to load bookmarks")
    );
}

#[tokio::test]
async fn test_realtime_change_refreshes_list() {
    let provider = InMemoryProvider::with_user(user());
    let controller = setup(&provider).await;
    let subscription = controller.subscribe().unwrap();
    assert_eq!(provider.subscriber_count(), 1);

    // A change made by another client
    provider.seed("Elsewhere", "https://elsewhere.example");
    provider
        .insert_bookmark(NewBookmark {
            title: "Remote".to_string(),
            url: "https://remote.example".to_string(),
            user_id: "user-1".to_string(),
        })
        .await
        .unwrap();

    let _ = tokio::time::timeout(Duration::from_millis(50), controller.watch(subscription)).await;

    assert_eq!(controller.model().borrow().bookmarks, provider.rows());
    assert_eq!(controller.model().borrow().bookmarks.len(), 2);
    assert_eq!(provider.subscriber_count(), 0);
}

#[tokio::test]
async fn test_sign_out_clears_user() {
    let provider = InMemoryProvider::with_user(user());
    let controller = setup(&provider).await;

    assert!(!controller.confirm_sign_out().await);
    controller.request_sign_out();
    assert!(controller.confirm_sign_out().await);

    assert_eq!(provider.requests().sign_outs, 1);
    let model = controller.model().borrow();
    assert_eq!(model.user, None);
    assert!(!model.sign_out_request.open);
}

#[tokio::test]
async fn test_sign_out_failure_still_navigates() {
    let provider = InMemoryProvider::with_user(user());
    provider.set_failing(Operation::SignOut, true);
    let controller = setup(&provider).await;

    controller.request_sign_out();
    assert!(controller.confirm_sign_out().await);
}

#[tokio::test]
async fn test_add_then_delete_round_trip() {
    let provider = InMemoryProvider::with_user(user());
    let controller = setup(&provider).await;
    assert!(controller.model().borrow().is_empty());

    fill_form(&controller, "Example", "https://example.com");
    assert_eq!(controller.submit_add().await, AddOutcome::Added);

    let id = {
        let model = controller.model().borrow();
        assert_eq!(model.bookmarks.len(), 1);
        assert_eq!(model.bookmarks[0].title, "Example");
        assert_eq!(model.bookmarks[0].url, "https://example.com");
        model.bookmarks[0].id.clone()
    };

    controller.request_delete(&id);
    controller.confirm_delete().await;

    assert!(controller.model().borrow().is_empty());
    assert_eq!(provider.requests().inserts.len(), 1);
    assert_eq!(provider.requests().deletes, vec![id]);
}
