//! The session: sole owner of the user cache and the initial loader.
//!
//! This is the surface the UI talks to. It exposes the filtered view, the
//! loading and error flags, and the mutation entry points. Everything here is
//! called from the UI thread only.

use tracing::debug;

use crate::fetch::{LoadState, Loader, UserSource};
use crate::model::{User, UserId};
use crate::store::{FilterView, UserStore};
use crate::validation::{self, FieldErrors, UserForm, ValidUser};

pub struct Session {
    store: UserStore,
    loader: Loader,
    query: String,
}

impl Session {
    pub fn new(source: impl UserSource) -> Self {
        Self {
            store: UserStore::new(),
            loader: Loader::new(source),
            query: String::new(),
        }
    }

    /// The UI is ready to show data: start the one fetch if it has not run yet.
    pub fn ready(&mut self) {
        if *self.loader.state() == LoadState::NotStarted {
            self.loader.start();
        }
    }

    /// Apply a finished fetch, if any. Returns true when the collection changed.
    pub fn poll(&mut self) -> bool {
        match self.loader.poll() {
            Some(users) => {
                self.store.load(users);
                true
            }
            None => false,
        }
    }

    /// Block until the in-flight fetch finishes and apply it.
    pub fn wait_loaded(&mut self) -> bool {
        match self.loader.wait() {
            Some(users) => {
                self.store.load(users);
                true
            }
            None => false,
        }
    }

    pub fn load_state(&self) -> &LoadState {
        self.loader.state()
    }

    pub fn is_loading(&self) -> bool {
        *self.loader.state() == LoadState::InFlight
    }

    pub fn error(&self) -> Option<&str> {
        match self.loader.state() {
            LoadState::Failed(reason) => Some(reason.as_str()),
            _ => None,
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        debug!(query = %self.query, "search query changed");
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Records matching the current search query.
    pub fn visible(&self) -> FilterView<'_> {
        self.store.filter(&self.query)
    }

    pub fn store(&self) -> &UserStore {
        &self.store
    }

    pub fn get(&self, id: &UserId) -> Option<&User> {
        self.store.get(id)
    }

    pub fn create(&mut self, input: ValidUser) -> UserId {
        self.store.create(input)
    }

    pub fn update(&mut self, id: &UserId, input: ValidUser) -> bool {
        self.store.update(id, input)
    }

    pub fn delete(&mut self, id: &UserId) -> bool {
        self.store.delete(id)
    }

    /// Validate raw form values and create (no target) or update (with target).
    ///
    /// On rejection nothing changes and the per-field messages are returned.
    pub fn submit(&mut self, form: &UserForm, target: Option<&UserId>) -> Result<UserId, FieldErrors> {
        let input = validation::validate(form)?;
        Ok(match target {
            Some(id) => {
                self.store.update(id, input);
                id.clone()
            }
            None => self.store.create(input),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;

    struct Fixed(Vec<User>);

    impl UserSource for Fixed {
        fn fetch_users(&self) -> Result<Vec<User>, FetchError> {
            Ok(self.0.clone())
        }
    }

    fn ana() -> User {
        User {
            id: "1".into(),
            name: "Ana Silva".into(),
            email: "ana@x.com".into(),
            city: "Natal".into(),
        }
    }

    #[test]
    fn empty_until_ready() {
        let mut s = Session::new(Fixed(vec![ana()]));
        assert!(!s.poll());
        assert!(!s.is_loading());
        assert_eq!(s.visible().count(), 0);
        s.ready();
        assert!(s.is_loading());
        assert!(s.wait_loaded());
        assert!(!s.is_loading());
        assert_eq!(s.visible().count(), 1);
    }

    #[test]
    fn submit_rejects_and_keeps_state() {
        let mut s = Session::new(Fixed(vec![]));
        let err = s.submit(&UserForm::new("", "nope", ""), None).unwrap_err();
        assert!(err.name.is_some());
        assert!(err.email.is_some());
        assert!(s.store().is_empty());
    }

    #[test]
    fn submit_creates_then_updates() {
        let mut s = Session::new(Fixed(vec![]));
        let id = s.submit(&UserForm::new("Bob", "bob@x.com", ""), None).unwrap();
        let same = s.submit(&UserForm::new("Bobby", "bob@x.com", "Lisboa"), Some(&id)).unwrap();
        assert_eq!(id, same);
        assert_eq!(s.store().len(), 1);
        assert_eq!(s.get(&id).unwrap().name, "Bobby");
    }

    #[test]
    fn submit_stores_city_as_typed() {
        let mut s = Session::new(Fixed(vec![]));
        let id = s.submit(&UserForm::new("Bob", "bob@x.com", "   "), None).unwrap();
        assert_eq!(s.get(&id).unwrap().city, "   ");
        s.submit(&UserForm::new("Bob", "bob@x.com", "  São Paulo  "), Some(&id)).unwrap();
        assert_eq!(s.get(&id).unwrap().city, "  São Paulo  ");
    }

    #[test]
    fn query_filters_visible() {
        let mut s = Session::new(Fixed(vec![ana()]));
        s.ready();
        s.wait_loaded();
        s.set_query("ANA");
        assert_eq!(s.visible().count(), 1);
        s.set_query("zz");
        assert_eq!(s.visible().count(), 0);
        assert_eq!(s.store().len(), 1);
    }
}
