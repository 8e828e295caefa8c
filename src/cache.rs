//! This module provides a local document store
//!
//! It mimics the behaviour of the remote store (hierarchical paths, generated keys, removed empty nodes), and can be used to mock it in tests, or to work offline on a local JSON file.

use std::path::PathBuf;
use std::path::Path;
use std::error::Error;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::key::Key;
use crate::mock_behaviour::{MockBehaviour, Request};
use crate::resource::normalize_path;
use crate::traits::DocumentStore;


/// A [`DocumentStore`] that keeps its documents in memory (and optionally in a local file)
#[derive(Debug)]
pub struct LocalStore {
    backing_file: Option<PathBuf>,
    data: Mutex<Value>,

    mock_behaviour: Option<Arc<Mutex<MockBehaviour>>>,
}

impl LocalStore {
    /// Initialize an empty store that only lives in memory
    pub fn new() -> Self {
        Self{
            backing_file: None,
            data: Mutex::new(Value::Object(Map::new())),
            mock_behaviour: None,
        }
    }

    /// Initialize a store with some initial content
    pub fn with_content(content: Value) -> Self {
        let mut content = content;
        prune(&mut content);
        if content.is_null() {
            content = Value::Object(Map::new());
        }
        Self{
            backing_file: None,
            data: Mutex::new(content),
            mock_behaviour: None,
        }
    }

    /// Initialize a store from the content of a valid backing file if it exists.
    /// Returns an error otherwise
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn Error>> {
        let data = match std::fs::File::open(path) {
            Err(err) => {
                return Err(format!("Unable to open file {:?}: {}", path, err).into());
            },
            Ok(file) => serde_json::from_reader(file)?,
        };

        let mut store = Self::with_content(data);
        store.backing_file = Some(PathBuf::from(path));
        Ok(store)
    }

    /// Initialize an empty store, that will be saved to `path` by [`Self::save_to_file`]
    pub fn new_with_file(path: &Path) -> Self {
        let mut store = Self::new();
        store.backing_file = Some(PathBuf::from(path));
        store
    }

    /// Make this store fail some requests, as described in a [`MockBehaviour`]
    pub fn set_mock_behaviour(&mut self, behaviour: Option<Arc<Mutex<MockBehaviour>>>) {
        self.mock_behaviour = behaviour;
    }

    /// Store the current content to its backing file
    pub fn save_to_file(&self) -> Result<(), Box<dyn Error>> {
        let path = match &self.backing_file {
            None => return Err("This store has no backing file".into()),
            Some(path) => path,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::File::create(path)?;
        serde_json::to_writer(file, &*self.lock())?;
        log::debug!("Saved local store to {:?}", path);
        Ok(())
    }

    /// Returns a copy of the whole content of this store
    pub fn snapshot(&self) -> Value {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Value> {
        match self.data.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn check_behaviour(&self, request: Request) -> Result<(), Box<dyn Error>> {
        match &self.mock_behaviour {
            None => Ok(()),
            Some(behaviour) => {
                let mut behaviour = match behaviour.lock() {
                    Ok(guard) => guard,
                    Err(poisoned) => poisoned.into_inner(),
                };
                behaviour.allow(request)
            },
        }
    }

    fn read(&self, path: &str) -> Value {
        let data = self.lock();
        let mut current: &Value = &data;
        for segment in segments(path) {
            let next = match current {
                Value::Object(map) => map.get(segment.as_str()),
                Value::Array(array) => segment.parse::<usize>().ok().and_then(|index| array.get(index)),
                _ => None,
            };
            current = match next {
                None => return Value::Null,
                Some(value) => value,
            };
        }
        current.clone()
    }

    fn write(&self, path: &str, body: Value) {
        let mut body = body;
        prune(&mut body);

        let mut data = self.lock();
        set_at(&mut *data, &segments(path), body);
        prune(&mut *data);
        if data.is_null() {
            *data = Value::Object(Map::new());
        }
    }
}

impl Default for LocalStore {
    fn default() -> Self {
        Self::new()
    }
}

fn segments(path: &str) -> Vec<String> {
    let normalized = normalize_path(path);
    normalized.split('/')
        .filter(|s| s.is_empty() == false)
        .map(|s| s.to_string())
        .collect()
}

fn set_at(node: &mut Value, segments: &[String], body: Value) {
    match segments.split_first() {
        None => *node = body,
        Some((head, rest)) => {
            make_container(node, head);
            match node {
                Value::Array(array) => {
                    let index = head.parse::<usize>().unwrap_or(array.len());
                    if index == array.len() {
                        array.push(Value::Null);
                    }
                    set_at(&mut array[index], rest, body);
                },
                Value::Object(map) => {
                    let child = map.entry(head.clone()).or_insert(Value::Null);
                    set_at(child, rest, body);
                },
                _ => {},
            }
        },
    }
}

/// Make sure `node` can hold a child called `segment`.
/// Arrays are kept as long as `segment` indexes into them (or right after their end), anything else becomes an object
fn make_container(node: &mut Value, segment: &str) {
    let keeps_array = match (&*node, segment.parse::<usize>()) {
        (Value::Array(array), Ok(index)) => index <= array.len(),
        _ => false,
    };
    if keeps_array || node.is_object() {
        return;
    }
    let converted = match node {
        Value::Array(array) => array_to_object(std::mem::take(array)),
        _ => Value::Object(Map::new()),
    };
    *node = converted;
}

fn array_to_object(array: Vec<Value>) -> Value {
    let map = array.into_iter()
        .enumerate()
        .map(|(index, value)| (index.to_string(), value))
        .collect();
    Value::Object(map)
}

/// Remove nulls and empty containers, just like the remote store never stores them
fn prune(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for child in map.values_mut() {
                prune(child);
            }
            map.retain(|_, child| is_empty(child) == false);
            if map.is_empty() {
                *value = Value::Null;
            }
        },
        Value::Array(array) => {
            for child in array.iter_mut() {
                prune(child);
            }
            while array.last().map(is_empty).unwrap_or(false) {
                array.pop();
            }
            if array.is_empty() {
                *value = Value::Null;
            }
        },
        _ => {},
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(array) => array.is_empty(),
        _ => false,
    }
}

#[async_trait]
impl DocumentStore for LocalStore {
    async fn get(&self, path: &str) -> Result<Value, Box<dyn Error>> {
        self.check_behaviour(Request::Get)?;
        Ok(self.read(path))
    }

    async fn put(&self, path: &str, body: &Value) -> Result<(), Box<dyn Error>> {
        self.check_behaviour(Request::Put)?;
        self.write(path, body.clone());
        Ok(())
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Key, Box<dyn Error>> {
        self.check_behaviour(Request::Post)?;
        let key = Key::generate();
        let child_path = format!("{}/{}", normalize_path(path), key);
        self.write(&child_path, body.clone());
        Ok(key)
    }

    async fn delete(&self, path: &str) -> Result<(), Box<dyn Error>> {
        self.check_behaviour(Request::Delete)?;
        self.write(path, Value::Null);
        Ok(())
    }
}
