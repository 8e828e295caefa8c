//! This crate is a client for the Join kanban board.
//!
//! Everything is stored in a remote document store (e.g. a Firebase realtime database), that is reached over REST by the [`Client`](client::Client) of the [`client`] module. \
//! Anything that implements [`DocumentStore`](traits::DocumentStore) can replace it, like the in-memory (or file-backed) [`LocalStore`](cache::LocalStore), which is handy in tests and offline demos.
//!
//! On top of a store, this crate provides:
//! * a [`Session`](session::Session), to log users in and out, or sign them up,
//! * an [`AddressBook`](contacts::AddressBook), to manage the contacts tasks can be assigned to,
//! * a [`Board`](board::Board), to create, edit, move and delete tasks, and build what a board displays (see [`board::view`], [`board::search`] and [`board::sync`]),
//! * a [`Summary`](summary::Summary) of the board.
//!
//! There is no local cache and no conflict resolution: the last write wins, and a view is simply re-fetched after each change.

pub mod traits;
pub mod resource;
pub mod key;
pub use key::Key;

pub mod status;
pub use status::Status;
pub mod task;
pub use task::Task;
pub mod contact;
pub use contact::Contact;
pub mod validation;

pub mod session;
pub use session::Session;
pub mod contacts;
pub use contacts::AddressBook;
pub mod board;
pub use board::Board;
pub mod summary;
pub use summary::Summary;

pub mod client;
pub mod cache;
pub mod mock_behaviour;

pub mod config;
pub mod utils;
