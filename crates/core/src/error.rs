use thiserror::Error;

use crate::catalog::CatalogError;
use crate::model::{LessonError, LessonIdError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Lesson(#[from] LessonError),
    #[error(transparent)]
    LessonId(#[from] LessonIdError),
}
