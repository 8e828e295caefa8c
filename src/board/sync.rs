//! Keeping a displayed board in sync with the store
//!
//! There is no notification from the store: a [`BoardSync`] simply reloads the whole board after every change it makes, and publishes the result in a `watch` channel.

use std::error::Error;
use std::fmt::{Display, Formatter};

use tokio::sync::watch;

use crate::board::view::BoardView;
use crate::board::Board;
use crate::key::Key;
use crate::status::Status;
use crate::task::{Task, TaskDraft};
use crate::traits::DocumentStore;

/// An event that happens while the board is reloaded
#[derive(Clone, Debug, PartialEq)]
pub enum RefreshEvent {
    /// No reload has happened yet
    NotStarted,
    /// A reload has started, after the given change
    Started { after: String },
    /// A reload is finished
    Finished { success: bool },
}

impl Display for RefreshEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RefreshEvent::NotStarted => write!(f, "Not started"),
            RefreshEvent::Started { after } => write!(f, "Reloading the board ({})...", after),
            RefreshEvent::Finished { success } => match success {
                true => write!(f, "Board successfully reloaded"),
                false => write!(f, "Board could not be reloaded"),
            },
        }
    }
}

impl Default for RefreshEvent {
    fn default() -> Self {
        Self::NotStarted
    }
}


/// See [`feedback_channel`]
pub type FeedbackSender = watch::Sender<RefreshEvent>;
/// See [`feedback_channel`]
pub type FeedbackReceiver = watch::Receiver<RefreshEvent>;

/// Create a feedback channel, that can be used to follow the reloads of a [`BoardSync`]
pub fn feedback_channel() -> (FeedbackSender, FeedbackReceiver) {
    watch::channel(RefreshEvent::default())
}


/// A [`Board`] that republishes its [`BoardView`] after each change
pub struct BoardSync<S> {
    board: Board<S>,

    view_sender: watch::Sender<BoardView>,
    /// Kept so that the channel stays open (and keeps the latest view) even when nobody is listening
    view_receiver: watch::Receiver<BoardView>,

    feedback_channel: Option<FeedbackSender>,
    n_failed_refreshes: u32,
}

impl<S> BoardSync<S>
where
    S: DocumentStore + Sync,
{
    /// Create a `BoardSync`. Its view is empty until [`Self::refresh`] is called
    pub fn new(board: Board<S>) -> Self {
        let (view_sender, view_receiver) = watch::channel(BoardView::default());
        Self { board, view_sender, view_receiver, feedback_channel: None, n_failed_refreshes: 0 }
    }

    pub fn new_with_feedback_channel(board: Board<S>, channel: FeedbackSender) -> Self {
        let mut sync = Self::new(board);
        sync.feedback_channel = Some(channel);
        sync
    }

    pub fn board(&self) -> &Board<S> {
        &self.board
    }

    /// Get notified of every new view of the board
    pub fn subscribe(&self) -> watch::Receiver<BoardView> {
        self.view_receiver.clone()
    }

    /// The last view that has been published
    pub fn latest(&self) -> BoardView {
        self.view_receiver.borrow().clone()
    }

    /// How many reloads have failed so far
    pub fn n_failed_refreshes(&self) -> u32 {
        self.n_failed_refreshes
    }

    /// Reload the board and publish it
    pub async fn refresh(&mut self) -> Result<(), Box<dyn Error>> {
        self.refresh_after("explicit refresh").await
    }

    async fn refresh_after(&mut self, change: &str) -> Result<(), Box<dyn Error>> {
        self.feedback(RefreshEvent::Started { after: change.to_string() });

        let result = BoardView::load(&self.board).await;
        let success = result.is_ok();
        let outcome = match result {
            Ok(view) => {
                // A closed channel only means nobody is listening
                let _ = self.view_sender.send(view);
                log::debug!("Board reloaded after {}", change);
                Ok(())
            },
            Err(err) => {
                self.n_failed_refreshes += 1;
                log::warn!("Unable to reload the board after {}: {}", change, err);
                Err(err)
            },
        };

        self.feedback(RefreshEvent::Finished { success });
        outcome
    }

    /// Reload after a change. A failed reload is logged, it does not turn a successful change into an error
    async fn refresh_quietly(&mut self, change: &str) {
        let _ = self.refresh_after(change).await;
    }

    fn feedback(&self, event: RefreshEvent) {
        if let Some(sender) = &self.feedback_channel {
            let _ = sender.send(event);
        }
    }

    pub async fn create_task(&mut self, draft: TaskDraft) -> Result<Key, Box<dyn Error>> {
        let result = self.board.create_task(draft).await;
        self.refresh_quietly("task creation").await;
        result
    }

    pub async fn edit_task(&mut self, status: Status, id: &Key, draft: TaskDraft) -> Result<Task, Box<dyn Error>> {
        let result = self.board.edit_task(status, id, draft).await;
        self.refresh_quietly("task edition").await;
        result
    }

    pub async fn delete_task<F>(&mut self, status: Status, id: &Key, confirm: F) -> Result<bool, Box<dyn Error>>
    where
        F: FnOnce(&str) -> bool,
    {
        let result = self.board.delete_task(status, id, confirm).await;
        if let Ok(false) = result {
            return result;
        }
        self.refresh_quietly("task deletion").await;
        result
    }

    /// Move a task, then reload the board.
    ///
    /// The board is reloaded even if the move failed halfway, so that the view shows where the task really is
    pub async fn move_task(&mut self, id: &Key, from: Status, to: Status) -> Result<bool, Box<dyn Error>> {
        let result = self.board.move_task(id, from, to).await;
        self.refresh_quietly("task move").await;
        result
    }

    pub async fn toggle_subtask(&mut self, task: &mut Task, index: usize) -> Result<Option<bool>, Box<dyn Error>> {
        let result = self.board.toggle_subtask(task, index).await;
        self.refresh_quietly("subtask toggle").await;
        result
    }

    pub async fn save_subtasks(&mut self, task: &Task) -> Result<(), Box<dyn Error>> {
        let result = self.board.save_subtasks(task).await;
        self.refresh_quietly("subtask edition").await;
        result
    }
}
