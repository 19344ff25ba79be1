//! The collection cache: every user record the session knows about.
//!
//! Records are kept in a map keyed by id, with a separate order list so the
//! table keeps a stable layout. New records go to the front. `create`,
//! `update`, `delete` and `load` are the only ways to change the contents.

use std::collections::{HashMap, VecDeque};

use tracing::debug;

use crate::model::{User, UserId};
use crate::validation::ValidUser;

#[derive(Clone, Debug, Default)]
pub struct UserStore {
    order: VecDeque<UserId>,
    records: HashMap<UserId, User>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection. Repeated ids keep their first occurrence.
    pub fn load(&mut self, users: Vec<User>) {
        self.order.clear();
        self.records.clear();
        for user in users {
            if self.records.contains_key(&user.id) {
                debug!(id = %user.id, "skipping duplicate id in loaded data");
                continue;
            }
            self.order.push_back(user.id.clone());
            self.records.insert(user.id.clone(), user);
        }
        debug!(count = self.order.len(), "collection loaded");
    }

    /// Prepend a new record built from validated input and return its id.
    pub fn create(&mut self, input: ValidUser) -> UserId {
        let mut id = UserId::generate();
        while self.records.contains_key(&id) {
            id = UserId::generate();
        }
        let user = User {
            id: id.clone(),
            name: input.name().to_string(),
            email: input.email().to_string(),
            city: input.city().to_string(),
        };
        self.order.push_front(id.clone());
        self.records.insert(id.clone(), user);
        debug!(%id, "user created");
        id
    }

    /// Overwrite name, email and city of an existing record. Unknown ids are ignored.
    pub fn update(&mut self, id: &UserId, input: ValidUser) -> bool {
        match self.records.get_mut(id) {
            Some(user) => {
                user.name = input.name().to_string();
                user.email = input.email().to_string();
                user.city = input.city().to_string();
                debug!(%id, "user updated");
                true
            }
            None => {
                debug!(%id, "update ignored: no such user");
                false
            }
        }
    }

    /// Remove a record. Unknown ids are ignored.
    pub fn delete(&mut self, id: &UserId) -> bool {
        if self.records.remove(id).is_none() {
            debug!(%id, "delete ignored: no such user");
            return false;
        }
        self.order.retain(|o| o != id);
        debug!(%id, "user deleted");
        true
    }

    /// Records whose name contains `query`, ignoring case, in collection order.
    pub fn filter<'a>(&'a self, query: &str) -> FilterView<'a> {
        FilterView {
            store: self,
            needle: query.to_lowercase(),
            pos: 0,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &User> + '_ {
        self.order.iter().filter_map(|id| self.records.get(id))
    }

    pub fn get(&self, id: &UserId) -> Option<&User> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &UserId) -> bool {
        self.records.contains_key(id)
    }

    pub fn position(&self, id: &UserId) -> Option<usize> {
        self.order.iter().position(|o| o == id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Lazy, restartable view produced by [`UserStore::filter`]. Clone it to start over.
#[derive(Clone, Debug)]
pub struct FilterView<'a> {
    store: &'a UserStore,
    needle: String,
    pos: usize,
}

impl<'a> Iterator for FilterView<'a> {
    type Item = &'a User;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.store.order.get(self.pos) {
            self.pos += 1;
            if let Some(user) = self.store.records.get(id) {
                if self.needle.is_empty() || user.name.to_lowercase().contains(&self.needle) {
                    return Some(user);
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.store.order.len().saturating_sub(self.pos)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{UserForm, validate};

    fn mk_user(id: &str, name: &str) -> User {
        User {
            id: id.into(),
            name: name.to_string(),
            email: format!("{}@example.com", id),
            city: "Natal".to_string(),
        }
    }

    fn input(name: &str, email: &str, city: &str) -> ValidUser {
        validate(&UserForm::new(name, email, city)).unwrap()
    }

    fn seeded() -> UserStore {
        let mut s = UserStore::new();
        s.load(vec![mk_user("1", "Ana Silva"), mk_user("2", "Bruno Costa"), mk_user("3", "Carla Dias")]);
        s
    }

    fn ids(s: &UserStore) -> Vec<String> {
        s.iter().map(|u| u.id.to_string()).collect()
    }

    #[test]
    fn load_replaces_and_is_repeatable() {
        let mut s = seeded();
        s.load(vec![mk_user("9", "Zed")]);
        assert_eq!(ids(&s), vec!["9"]);
        s.load(vec![mk_user("9", "Zed")]);
        assert_eq!(ids(&s), vec!["9"]);
    }

    #[test]
    fn load_keeps_first_of_duplicate_ids() {
        let mut s = UserStore::new();
        s.load(vec![mk_user("1", "First"), mk_user("1", "Second")]);
        assert_eq!(s.len(), 1);
        assert_eq!(s.get(&"1".into()).unwrap().name, "First");
    }

    #[test]
    fn create_prepends_with_fresh_id() {
        let mut s = seeded();
        let before: Vec<String> = ids(&s);
        let id = s.create(input("Bob", "bob@x.com", ""));
        assert_eq!(s.len(), 4);
        let first = s.iter().next().unwrap();
        assert_eq!(first.id, id);
        assert_eq!(first.name, "Bob");
        assert_eq!(first.city, "");
        assert!(!before.contains(&id.to_string()));
    }

    #[test]
    fn create_allows_duplicate_names_and_emails() {
        let mut s = UserStore::new();
        let a = s.create(input("Bob", "bob@x.com", ""));
        let b = s.create(input("Bob", "bob@x.com", ""));
        assert_ne!(a, b);
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn update_keeps_id_and_position() {
        let mut s = seeded();
        let id = UserId::from("2");
        assert!(s.update(&id, input("Bruna", "bruna@x.com", "Recife")));
        assert_eq!(s.len(), 3);
        assert_eq!(s.position(&id), Some(1));
        let u = s.get(&id).unwrap();
        assert_eq!((u.name.as_str(), u.email.as_str(), u.city.as_str()), ("Bruna", "bruna@x.com", "Recife"));
        assert_eq!(s.get(&"1".into()).unwrap().name, "Ana Silva");
    }

    #[test]
    fn missing_ids_are_no_ops() {
        let mut s = seeded();
        let before: Vec<User> = s.iter().cloned().collect();
        assert!(!s.update(&"999".into(), input("X", "x@x.com", "")));
        assert!(!s.delete(&"999".into()));
        let after: Vec<User> = s.iter().cloned().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn delete_removes_only_target() {
        let mut s = seeded();
        assert!(s.delete(&"1".into()));
        assert_eq!(ids(&s), vec!["2", "3"]);
        assert!(!s.contains(&"1".into()));
    }

    #[test]
    fn filter_is_case_insensitive_and_ordered() {
        let s = seeded();
        let all: Vec<&str> = s.filter("").map(|u| u.id.as_str()).collect();
        assert_eq!(all, vec!["1", "2", "3"]);
        let hits: Vec<&str> = s.filter("AnA").map(|u| u.id.as_str()).collect();
        assert_eq!(hits, vec!["1"]);
        assert_eq!(s.filter("zz").count(), 0);
        let hits: Vec<&str> = s.filter("a s").map(|u| u.id.as_str()).collect();
        assert_eq!(hits, vec!["1"]);
    }

    #[test]
    fn filter_view_restarts_when_cloned() {
        let s = seeded();
        let view = s.filter("a");
        let first: Vec<&User> = view.clone().collect();
        let second: Vec<&User> = view.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn filter_does_not_mutate() {
        let s = seeded();
        let _ = s.filter("bruno").count();
        assert_eq!(s.len(), 3);
    }
}
