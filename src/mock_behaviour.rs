//! This module provides ways to tweak a [`LocalStore`](crate::cache::LocalStore), so that it can return errors on some tests

use std::error::Error;
use std::fmt::{Display, Formatter};

/// The requests a [`DocumentStore`](crate::traits::DocumentStore) can receive
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Request {
    Get,
    Put,
    Post,
    Delete,
}

impl Display for Request {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Request::Get => write!(f, "GET"),
            Request::Put => write!(f, "PUT"),
            Request::Post => write!(f, "POST"),
            Request::Delete => write!(f, "DELETE"),
        }
    }
}

/// How the requests of a mocked store will be answered during a given test
///
/// To have a request fail _n_ times after _m_ initial successes, set `(m, n)` for this request
#[derive(Default, Clone, Debug)]
pub struct MockBehaviour {
    /// While this is true, every request is allowed (and counters are left untouched)
    pub is_suspended: bool,

    pub get_behaviour: (u32, u32),
    pub put_behaviour: (u32, u32),
    pub post_behaviour: (u32, u32),
    pub delete_behaviour: (u32, u32),
}

impl MockBehaviour {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request will fail at once, `n_fails` times
    pub fn fail_now(n_fails: u32) -> Self {
        Self {
            is_suspended: false,
            get_behaviour: (0, n_fails),
            put_behaviour: (0, n_fails),
            post_behaviour: (0, n_fails),
            delete_behaviour: (0, n_fails),
        }
    }

    pub fn suspend(&mut self) {
        self.is_suspended = true;
    }
    pub fn resume(&mut self) {
        self.is_suspended = false;
    }

    /// Decide whether a request goes through, and update the counters accordingly
    pub fn allow(&mut self, request: Request) -> Result<(), Box<dyn Error>> {
        if self.is_suspended {
            return Ok(());
        }
        let counters = match request {
            Request::Get => &mut self.get_behaviour,
            Request::Put => &mut self.put_behaviour,
            Request::Post => &mut self.post_behaviour,
            Request::Delete => &mut self.delete_behaviour,
        };

        match *counters {
            (0, 0) => Ok(()),
            (0, failures) => {
                *counters = (0, failures - 1);
                log::debug!("Mock behaviour: failing a {} ({} more to fail)", request, failures - 1);
                Err(format!("Mocked behaviour requires this {} to fail this time", request).into())
            },
            (successes, failures) => {
                *counters = (successes - 1, failures);
                log::debug!("Mock behaviour: allowing a {} ({:?} left)", request, counters);
                Ok(())
            },
        }
    }

    pub fn can_get(&mut self) -> Result<(), Box<dyn Error>> {
        self.allow(Request::Get)
    }
    pub fn can_put(&mut self) -> Result<(), Box<dyn Error>> {
        self.allow(Request::Put)
    }
    pub fn can_post(&mut self) -> Result<(), Box<dyn Error>> {
        self.allow(Request::Post)
    }
    pub fn can_delete(&mut self) -> Result<(), Box<dyn Error>> {
        self.allow(Request::Delete)
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_mock_behaviour() {
        let mut ok = MockBehaviour::new();
        for _ in 0..5 {
            assert!(ok.can_get().is_ok());
            assert!(ok.can_delete().is_ok());
        }

        let mut now = MockBehaviour::fail_now(2);
        assert!(now.can_get().is_err());
        assert!(now.can_put().is_err());
        assert!(now.can_put().is_err());
        assert!(now.can_get().is_err());
        assert!(now.can_get().is_ok());
        assert!(now.can_put().is_ok());
        assert!(now.can_post().is_err());

        let mut custom = MockBehaviour{
            delete_behaviour: (0,1),
            put_behaviour: (1,2),
            ..MockBehaviour::default()
        };
        assert!(custom.allow(Request::Delete).is_err());
        assert!(custom.allow(Request::Delete).is_ok());
        assert!(custom.can_put().is_ok());
        assert!(custom.can_put().is_err());
        custom.suspend();
        assert!(custom.can_put().is_ok());
        custom.resume();
        assert!(custom.can_put().is_err());
        assert!(custom.can_put().is_ok());
    }
}
