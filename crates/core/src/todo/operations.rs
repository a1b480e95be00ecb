use super::error::TodoError;
use super::types::TodoItem;

/// Maximum number of characters in a task name.
pub const MAX_NAME_LENGTH: usize = 255;

/// Returns true if the task name contains `needle` (case-sensitive).
///
/// An empty needle matches every task.
pub fn name_matches(todo: &TodoItem, needle: &str) -> bool {
    todo.name.contains(needle)
}

/// Filters tasks whose name contains `needle`.
pub fn filter_by_name<'a>(todos: &'a [TodoItem], needle: &str) -> Vec<&'a TodoItem> {
    todos.iter().filter(|todo| name_matches(todo, needle)).collect()
}

/// Validates the identifiers of a record key.
pub fn validate_key(user_id: &str, todo_id: &str) -> Result<(), TodoError> {
    if user_id.trim().is_empty() {
        return Err(TodoError::EmptyUserId);
    }
    if todo_id.trim().is_empty() {
        return Err(TodoError::EmptyTodoId);
    }
    Ok(())
}

/// Validates a task name before it is written.
pub fn validate_name(name: &str) -> Result<(), TodoError> {
    if name.trim().is_empty() {
        return Err(TodoError::EmptyName);
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(TodoError::NameTooLong {
            max: MAX_NAME_LENGTH,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn todo(todo_id: &str, name: &str) -> TodoItem {
        TodoItem::new("u1", todo_id, name, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
    }

    #[test]
    fn test_filter_by_name_is_case_sensitive() {
        let todos = vec![todo("t1", "Buy milk"), todo("t2", "buy bread")];

        let matches = filter_by_name(&todos, "Buy");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].todo_id, "t1");
    }

    #[test]
    fn test_filter_by_empty_name_matches_all() {
        let todos = vec![todo("t1", "Buy milk"), todo("t2", "Walk dog")];
        assert_eq!(filter_by_name(&todos, "").len(), 2);
    }

    #[test]
    fn test_filter_by_name_without_match() {
        let todos = vec![todo("t1", "Buy milk")];
        assert!(filter_by_name(&todos, "xyz").is_empty());
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("u1", "t1").is_ok());
        assert_eq!(validate_key("", "t1"), Err(TodoError::EmptyUserId));
        assert_eq!(validate_key("u1", "  "), Err(TodoError::EmptyTodoId));
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Buy milk").is_ok());
        assert_eq!(validate_name("   "), Err(TodoError::EmptyName));
        assert_eq!(
            validate_name(&"x".repeat(MAX_NAME_LENGTH + 1)),
            Err(TodoError::NameTooLong {
                max: MAX_NAME_LENGTH
            })
        );
    }
}
