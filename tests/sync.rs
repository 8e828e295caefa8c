mod scenarii;

use join_board::board::search::{search, SearchFields};
use join_board::board::sync::{feedback_channel, BoardSync, RefreshEvent};
use join_board::board::Board;
use join_board::{Key, Status, Summary};


#[tokio::test]
async fn test_views_follow_changes() {
    let _ = env_logger::builder().is_test(true).try_init();

    let store = scenarii::sample_store();
    let (feedback_sender, feedback_receiver) = feedback_channel();
    let mut sync = BoardSync::new_with_feedback_channel(Board::new(&store), feedback_sender);
    let views = sync.subscribe();

    assert_eq!(*feedback_receiver.borrow(), RefreshEvent::NotStarted);
    assert!(views.borrow().columns.is_empty());

    sync.refresh().await.unwrap();
    assert_eq!(*feedback_receiver.borrow(), RefreshEvent::Finished { success: true });
    assert_eq!(views.borrow().cards().count(), 3);

    let id = sync.create_task(scenarii::valid_draft("Prepare the sprint review")).await.unwrap();
    assert_eq!(views.borrow().column(Status::ToDo).unwrap().cards.len(), 2);

    sync.move_task(&id, Status::ToDo, Status::Feedback).await.unwrap();
    {
        let view = views.borrow();
        let card = view.card(&id).unwrap();
        assert_eq!(card.status, Status::Feedback);
        assert_eq!(view.column(Status::Feedback).unwrap().placeholder(), None);
    }

    let found = search(&sync.latest(), "sprint", SearchFields::default());
    assert!(found.is_match(&id));
    assert_eq!(found.count(), 1);

    sync.delete_task(Status::Feedback, &id, |_| true).await.unwrap();
    assert!(sync.latest().card(&id).is_none());
    assert!(search(&sync.latest(), "sprint", SearchFields::default()).no_result);
    assert_eq!(sync.n_failed_refreshes(), 0);
}

#[tokio::test]
async fn test_view_is_reloaded_after_a_failed_move() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (store, behaviour) = scenarii::sample_store_with_mock();
    let mut sync = BoardSync::new(Board::new(&store));
    sync.refresh().await.unwrap();
    let id = Key::from(scenarii::CSS_TASK);
    assert!(sync.latest().card(&id).is_some());

    behaviour.lock().unwrap().put_behaviour = (0, 1);
    assert!(sync.move_task(&id, Status::Progress, Status::Done).await.is_err());

    // The view shows the task is lost for now
    assert!(sync.latest().card(&id).is_none());
    assert_eq!(sync.latest().column(Status::Progress).unwrap().placeholder(), Some("No tasks In progress".to_string()));
}

#[tokio::test]
async fn test_failed_subtask_toggle() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (store, behaviour) = scenarii::sample_store_with_mock();
    let mut sync = BoardSync::new(Board::new(&store));
    let id = Key::from(scenarii::RECIPE_TASK);
    let mut task = sync.board().get_task(Status::ToDo, &id).await.unwrap().unwrap();

    behaviour.lock().unwrap().put_behaviour = (0, 1);
    assert!(sync.toggle_subtask(&mut task, 1).await.is_err());

    assert_eq!(task.subtask_progress(), Some((1, 2)));
    assert_eq!(sync.latest().card(&id).unwrap().progress, Some((1, 2)));
}

#[tokio::test]
async fn test_failed_refresh() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (store, behaviour) = scenarii::sample_store_with_mock();
    let (feedback_sender, feedback_receiver) = feedback_channel();
    let mut sync = BoardSync::new_with_feedback_channel(Board::new(&store), feedback_sender);

    behaviour.lock().unwrap().get_behaviour = (0, 1);
    assert!(sync.refresh().await.is_err());
    assert_eq!(*feedback_receiver.borrow(), RefreshEvent::Finished { success: false });
    assert_eq!(sync.n_failed_refreshes(), 1);

    sync.refresh().await.unwrap();
    assert_eq!(sync.latest().cards().count(), 3);
}

#[tokio::test]
async fn test_summary() {
    let _ = env_logger::builder().is_test(true).try_init();

    let store = scenarii::sample_store();
    let summary = Summary::load(&store).await;

    assert_eq!(summary.to_do, Some(1));
    assert_eq!(summary.in_progress, Some(1));
    assert_eq!(summary.awaiting_feedback, Some(0));
    assert_eq!(summary.done, Some(1));
    assert_eq!(summary.on_board(), Some(2));
    assert_eq!(summary.deadline_label(), "September 2, 2030");
    assert_eq!(summary.urgent.as_ref().map(|u| u.count), Some(1));
    assert_eq!(summary.greeting.unwrap().to_string(), "Good morning, Sofia Müller");
}

#[tokio::test]
async fn test_summary_of_a_failing_store() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (store, behaviour) = scenarii::sample_store_with_mock();
    // The "to do" column cannot be counted
    behaviour.lock().unwrap().get_behaviour = (0, 1);
    let summary = Summary::load(&store).await;

    assert_eq!(summary.to_do, None);
    assert_eq!(summary.in_progress, Some(1));
    assert_eq!(summary.on_board(), None);
    assert!(summary.greeting.is_some());
}
