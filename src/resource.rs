use std::error::Error;

use url::Url;

/// Just a wrapper around the base URL of a document store
#[derive(Clone, Debug)]
pub struct Resource {
    url: Url,
}

impl Resource {
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    pub fn url(&self) -> &Url { &self.url }

    /// Build the REST URL of a document, e.g. `tasks/toDo/-abc` becomes `{base}/tasks/toDo/-abc.json`
    pub fn document_url(&self, path: &str) -> Result<Url, Box<dyn Error>> {
        let base = self.url.as_str().trim_end_matches('/');
        let url = format!("{}/{}.json", base, normalize_path(path));
        Ok(Url::parse(&url)?)
    }
}

/// Remove empty segments (leading, trailing or doubled slashes) from a store path
pub fn normalize_path(path: &str) -> String {
    path.split('/')
        .filter(|segment| segment.is_empty() == false)
        .collect::<Vec<_>>()
        .join("/")
}

/// Build a store path from its segments
pub fn join_path<S: AsRef<str>>(segments: &[S]) -> String {
    let joined = segments.iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join("/");
    normalize_path(&joined)
}
