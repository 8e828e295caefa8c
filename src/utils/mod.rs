//! Some utility functions, mostly debug printers

use std::collections::BTreeMap;
use std::io::{stdin, stdout, Read, Write};

use crate::board::view::{BoardView, TaskCard};
use crate::contact::Contact;
use crate::summary::Summary;

/// A debug utility that pretty-prints a board
pub fn print_board(view: &BoardView) {
    for column in &view.columns {
        println!("COLUMN {} ({})", column.status.title(), column.cards.len());
        if let Some(placeholder) = column.placeholder() {
            println!("    {}", placeholder);
        }
        for card in &column.cards {
            print_card(card);
        }
    }
}

pub fn print_card(card: &TaskCard) {
    let progress = match card.progress {
        Some((done, total)) => format!(" [{}/{}]", done, total),
        None => String::new(),
    };
    let mut assignees: Vec<&str> = card.visible_assignees().iter().map(|a| a.initials.as_str()).collect();
    let hidden = card.hidden_assignees_label();
    if let Some(hidden) = &hidden {
        assignees.push(hidden);
    }
    println!("    {:<7} {}{}\t({}) {}\t{}", card.priority.label(), card.title, progress, card.category, assignees.join(" "), card.id);
}

/// A debug utility that pretty-prints an address book
pub fn print_address_book(groups: &BTreeMap<char, Vec<Contact>>) {
    for (letter, contacts) in groups {
        println!("{}", letter);
        for contact in contacts {
            println!("    {:<3} {}\t{}\t{}\t{}", contact.initials(), contact.name(), contact.mail(), contact.phone(), contact.id());
        }
    }
}

pub fn print_summary(summary: &Summary) {
    let counter = |count: Option<usize>| count.map(|c| c.to_string()).unwrap_or_else(|| "-".to_string());

    if let Some(greeting) = &summary.greeting {
        println!("{}", greeting);
    }
    println!("To-do: {}\tDone: {}", counter(summary.to_do), counter(summary.done));
    match &summary.urgent {
        None => println!("Urgent: 0\t{}", summary.deadline_label()),
        Some(urgent) => println!("{}: {}\t{}", urgent.priority, urgent.count, summary.deadline_label()),
    }
    println!("Tasks in board: {}\tIn progress: {}\tAwaiting feedback: {}",
        counter(summary.on_board()), counter(summary.in_progress), counter(summary.awaiting_feedback));
}


/// Wait for the user to press enter
pub fn pause() {
    let mut stdout = stdout();
    let _ = stdout.write_all(b"Press Enter to continue...");
    let _ = stdout.flush();
    let _ = stdin().read_exact(&mut [0]);
}
