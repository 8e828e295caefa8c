use std::path::Path;

use join_board::board::view::BoardView;
use join_board::cache::LocalStore;
use join_board::client::Client;
use join_board::config;
use join_board::traits::DocumentStore;
use join_board::{AddressBook, Board, Summary};

/// Prints the board, the address book and the summary of a store.
///
/// The store is the remote one (`JOIN_BASE_URL` overrides its default URL), unless a local JSON file is given as an argument
#[tokio::main]
async fn main() {
    env_logger::init();

    if let Ok(url) = std::env::var("JOIN_BASE_URL") {
        config::set(&config::BASE_URL, url);
    }

    match std::env::args().nth(1) {
        Some(path) => match LocalStore::from_file(Path::new(&path)) {
            Ok(store) => print_store(&store).await,
            Err(err) => log::error!("Unable to open the local store: {}", err),
        },
        None => match Client::from_config() {
            Ok(client) => {
                println!("Store: {}", client.url());
                print_store(&client).await
            },
            Err(err) => log::error!("Unable to create a client: {}", err),
        },
    }
}

async fn print_store<S>(store: &S)
where
    S: DocumentStore + Sync,
{
    println!("---- Board -----");
    match BoardView::load(&Board::new(store)).await {
        Ok(view) => join_board::utils::print_board(&view),
        Err(err) => log::error!("Unable to load the board: {}", err),
    }

    println!("---- Contacts -----");
    match AddressBook::new(store).grouped().await {
        Ok(groups) => join_board::utils::print_address_book(&groups),
        Err(err) => log::error!("Unable to load the contacts: {}", err),
    }

    println!("---- Summary -----");
    let summary = Summary::load(store).await;
    join_board::utils::print_summary(&summary);
}
