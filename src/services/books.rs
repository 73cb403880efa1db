//! Bookshelf service: payload validation on top of the book store

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookPayload, BookSummary},
    repository::Repository,
};

pub const ADD_SUCCESS: &str = "Book added successfully";
pub const ADD_FAIL_NO_NAME: &str = "Failed to add book. Please provide the book name";
pub const ADD_FAIL_READ_PAGE: &str =
    "Failed to add book. readPage cannot be greater than pageCount";

pub const GET_NOT_FOUND: &str = "Book not found";

pub const UPDATE_SUCCESS: &str = "Book updated successfully";
pub const UPDATE_FAIL_NO_NAME: &str = "Failed to update book. Please provide the book name";
pub const UPDATE_FAIL_READ_PAGE: &str =
    "Failed to update book. readPage cannot be greater than pageCount";
pub const UPDATE_NOT_FOUND: &str = "Failed to update book. Id not found";

pub const DELETE_SUCCESS: &str = "Book deleted successfully";
pub const DELETE_NOT_FOUND: &str = "Failed to delete book. Id not found";

/// Which write operation a payload is validated for; selects the messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOp {
    Add,
    Update,
}

impl WriteOp {
    fn no_name_message(self) -> &'static str {
        match self {
            WriteOp::Add => ADD_FAIL_NO_NAME,
            WriteOp::Update => UPDATE_FAIL_NO_NAME,
        }
    }

    fn read_page_message(self) -> &'static str {
        match self {
            WriteOp::Add => ADD_FAIL_READ_PAGE,
            WriteOp::Update => UPDATE_FAIL_READ_PAGE,
        }
    }
}

/// Check the write rules in order: name first, then readPage against
/// pageCount. Only the first violation is reported.
pub fn validate(payload: &BookPayload, op: WriteOp) -> AppResult<()> {
    if !payload.has_name() {
        return Err(AppError::Validation(op.no_name_message().to_string()));
    }
    if payload.read_page_exceeds_page_count() {
        return Err(AppError::Validation(op.read_page_message().to_string()));
    }
    Ok(())
}

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Validate and store a new book, returning its id
    pub fn create(&self, payload: BookPayload) -> AppResult<String> {
        validate(&payload, WriteOp::Add)?;
        let id = self.repository.books.create(payload);
        tracing::info!("Book created: id={}", id);
        Ok(id)
    }

    pub fn list(&self) -> Vec<BookSummary> {
        self.repository.books.list_summaries()
    }

    pub fn get(&self, id: &str) -> AppResult<Book> {
        self.repository
            .books
            .get(id)
            .ok_or_else(|| AppError::NotFound(GET_NOT_FOUND.to_string()))
    }

    /// Validate and replace an existing book
    pub fn update(&self, id: &str, payload: BookPayload) -> AppResult<()> {
        validate(&payload, WriteOp::Update)?;
        if !self.repository.books.update(id, payload) {
            tracing::debug!("Update of unknown book id={}", id);
            return Err(AppError::NotFound(UPDATE_NOT_FOUND.to_string()));
        }
        tracing::info!("Book updated: id={}", id);
        Ok(())
    }

    pub fn delete(&self, id: &str) -> AppResult<()> {
        if !self.repository.books.delete(id) {
            tracing::debug!("Delete of unknown book id={}", id);
            return Err(AppError::NotFound(DELETE_NOT_FOUND.to_string()));
        }
        tracing::info!("Book deleted: id={}", id);
        Ok(())
    }

    /// Number of books currently stored
    pub fn count(&self) -> usize {
        self.repository.books.count()
    }
}
