use crate::error::AppError;

pub const MAX_COMMENT_LENGTH: usize = 300;

pub fn validate_comment_content(content: &str) -> Result<(), AppError> {
    if content.trim().is_empty() {
        return Err(AppError::validation("Comment content is required"));
    }

    if content.chars().count() > MAX_COMMENT_LENGTH {
        return Err(AppError::validation(
            "Comment cannot exceed 300 characters",
        ));
    }

    Ok(())
}
