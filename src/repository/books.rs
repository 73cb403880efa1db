//! In-memory book store.
//!
//! Records live in an insertion-ordered map keyed by id, behind a single
//! mutex. Every operation holds the lock for its whole duration, so
//! mutations never interleave. Missing ids are reported as `None` / `false`;
//! turning those into HTTP errors is the service layer's job.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{Duration, Utc};
use indexmap::IndexMap;
use rand::Rng;

use crate::models::book::{Book, BookPayload, BookSummary};

/// Length of generated book ids
pub const ID_LENGTH: usize = 16;

const ID_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

fn generate_id() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LENGTH)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

#[derive(Clone, Default)]
pub struct BookStore {
    books: Arc<Mutex<IndexMap<String, Book>>>,
}

impl BookStore {
    // No operation can panic halfway through a mutation, so a poisoned map is
    // still consistent.
    fn lock(&self) -> MutexGuard<'_, IndexMap<String, Book>> {
        self.books.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert a new book and return its generated id
    pub fn create(&self, payload: BookPayload) -> String {
        let mut books = self.lock();

        let mut id = generate_id();
        while books.contains_key(&id) {
            id = generate_id();
        }

        let now = Utc::now();
        let mut book = Book {
            id: id.clone(),
            name: String::new(),
            year: None,
            author: None,
            summary: None,
            publisher: None,
            page_count: None,
            read_page: None,
            reading: None,
            finished: false,
            inserted_at: now,
            updated_at: now,
        };
        book.apply(payload);

        books.insert(id.clone(), book);
        id
    }

    /// `{id, name, publisher}` for every book, in insertion order
    pub fn list_summaries(&self) -> Vec<BookSummary> {
        self.lock().values().map(Book::summary_view).collect()
    }

    pub fn get(&self, id: &str) -> Option<Book> {
        self.lock().get(id).cloned()
    }

    /// Replace all editable fields of a book. Returns `false` if the id is unknown.
    pub fn update(&self, id: &str, payload: BookPayload) -> bool {
        let mut books = self.lock();
        let Some(book) = books.get_mut(id) else {
            return false;
        };

        book.apply(payload);
        // updatedAt must move forward even if the clock did not
        book.updated_at = Utc::now().max(book.updated_at + Duration::nanoseconds(1));
        true
    }

    /// Remove a book permanently. Returns `false` if the id is unknown.
    pub fn delete(&self, id: &str) -> bool {
        self.lock().shift_remove(id).is_some()
    }

    /// Number of stored books
    pub fn count(&self) -> usize {
        self.lock().len()
    }
}
