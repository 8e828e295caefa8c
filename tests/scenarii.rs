#![allow(dead_code)]

//! Sample content of a store, shared by the integration tests
//!
//! This mimics what the remote store returns: keyed users, tasks grouped by column, and a session record

use std::sync::{Arc, Mutex};

use serde_json::json;

use join_board::cache::LocalStore;
use join_board::mock_behaviour::MockBehaviour;
use join_board::task::{Category, Priority, TaskDraft};

pub const ANTON: &str = "-NaAnton";
pub const BENEDIKT: &str = "-NbBenedikt";
pub const SOFIA: &str = "-NcSofia";

pub const RECIPE_TASK: &str = "-TaRecipe";
pub const CSS_TASK: &str = "-TbCss";
pub const TEMPLATE_TASK: &str = "-TcTemplate";

pub fn sample_content() -> serde_json::Value {
    json!({
        "loggedIn": {"name": "Sofia Müller"},
        "users": {
            ANTON: {"name": "Anton Mayer", "mail": "antom@gmail.com", "phone": "+49 1111 111 11 1", "color": "rgba(255, 122, 0, 1)", "password": "pw"},
            BENEDIKT: {"name": "Benedikt Ziegler", "mail": "benedikt@gmail.com", "phone": "+49 2222 222 22 2", "color": "rgba(110, 82, 255, 1)", "password": "pw"},
            SOFIA: {"name": "Sofia Müller", "mail": "sofiam@gmail.com", "color": "rgba(0, 190, 232, 1)", "password": "sofia1234"}
        },
        "tasks": {
            "toDo": {
                RECIPE_TASK: {
                    "title": "Kochwelt Page & Recipe Recommender",
                    "description": "Build start page with recipe recommendation.",
                    "date": "10/05/2030",
                    "prio": "2",
                    "category": "User Story",
                    "contacts": [ANTON, BENEDIKT],
                    "subtasks": [{"task": "Implement Recipe Recommendation", "checked": true}, {"task": "Start Page Layout", "checked": false}]
                }
            },
            "progress": {
                CSS_TASK: {
                    "title": "CSS Architecture Planning",
                    "description": "Define CSS naming conventions and structure.",
                    "date": "02/09/2030",
                    "prio": "1",
                    "category": "Technical Task",
                    "contacts": [BENEDIKT]
                }
            },
            "done": {
                TEMPLATE_TASK: {
                    "title": "HTML Base Template Creation",
                    "description": "Create reusable HTML base templates.",
                    "date": "09/03/2030",
                    "prio": "3",
                    "category": "Technical Task",
                    "contacts": [ANTON]
                }
            }
        }
    })
}

/// A store filled with [`sample_content`]
pub fn sample_store() -> LocalStore {
    LocalStore::with_content(sample_content())
}

/// A store filled with [`sample_content`], whose failures can be tuned with the returned behaviour
pub fn sample_store_with_mock() -> (LocalStore, Arc<Mutex<MockBehaviour>>) {
    let behaviour = Arc::new(Mutex::new(MockBehaviour::new()));
    let mut store = sample_store();
    store.set_mock_behaviour(Some(behaviour.clone()));
    (store, behaviour)
}

pub fn valid_draft(title: &str) -> TaskDraft {
    TaskDraft {
        title: title.to_string(),
        description: "Some description".to_string(),
        date: "24/12/2030".to_string(),
        priority: Priority::Urgent,
        category: Some(Category::TechnicalTask),
        ..TaskDraft::default()
    }
}
