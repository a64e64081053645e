// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! In-memory contact store with failure injection.

use std::sync::{Arc, Mutex};

use cardlink_core::{Contact, ContactStore, StorageError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadFailure {
    NotFound,
    Other,
}

#[derive(Default)]
struct State {
    saved: Option<Vec<Contact>>,
    save_calls: usize,
    /// 1-based save call that fails.
    fail_on_save: Option<usize>,
    fail_all_saves: bool,
    load_failure: Option<LoadFailure>,
}

/// Shares state between clones, so a test keeps a handle after moving
/// the store into a repository.
#[derive(Clone, Default)]
pub struct FlakyStore {
    state: Arc<Mutex<State>>,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contacts(contacts: Vec<Contact>) -> Self {
        let store = Self::new();
        store.state.lock().unwrap().saved = Some(contacts);
        store
    }

    /// Fails the `n`th save call from now on (1 = the next one).
    pub fn fail_save_in(&self, n: usize) {
        let mut state = self.state.lock().unwrap();
        state.fail_on_save = Some(state.save_calls + n);
    }

    pub fn fail_next_save(&self) {
        self.fail_save_in(1);
    }

    pub fn fail_all_saves(&self, fail: bool) {
        self.state.lock().unwrap().fail_all_saves = fail;
    }

    pub fn fail_loads(&self, failure: Option<LoadFailure>) {
        self.state.lock().unwrap().load_failure = failure;
    }

    pub fn saved(&self) -> Option<Vec<Contact>> {
        self.state.lock().unwrap().saved.clone()
    }

    pub fn save_calls(&self) -> usize {
        self.state.lock().unwrap().save_calls
    }
}

impl ContactStore for FlakyStore {
    fn load_all(&self) -> Result<Vec<Contact>, StorageError> {
        let state = self.state.lock().unwrap();
        match state.load_failure {
            Some(LoadFailure::NotFound) => Err(StorageError::NotFound("contact snapshot".into())),
            Some(LoadFailure::Other) => Err(StorageError::Io(std::io::Error::other(
                "simulated read failure",
            ))),
            None => state
                .saved
                .clone()
                .ok_or_else(|| StorageError::NotFound("contact snapshot".into())),
        }
    }

    fn save_all(&mut self, contacts: &[Contact]) -> Result<(), StorageError> {
        let mut state = self.state.lock().unwrap();
        state.save_calls += 1;
        if state.fail_all_saves || state.fail_on_save == Some(state.save_calls) {
            return Err(StorageError::Io(std::io::Error::other(
                "simulated write failure",
            )));
        }
        state.saved = Some(contacts.to_vec());
        Ok(())
    }
}
