use crate::model::project::Project;

/// Error type for page policy checks
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    #[error("page not found: {0}")]
    NotFound(String),
    #[error("cannot delete the last page")]
    LastPage,
}

/// Check whether `page_id` may be deleted. A successful check still needs
/// user confirmation before the delete is issued.
pub fn check_delete_page(project: &Project, page_id: &str) -> Result<(), PageError> {
    if project.page(page_id).is_none() {
        return Err(PageError::NotFound(page_id.to_string()));
    }
    if project.pages.len() <= 1 {
        return Err(PageError::LastPage);
    }
    Ok(())
}

/// Normalize an edited page title: trimmed, empty means untitled
pub fn normalize_title(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
