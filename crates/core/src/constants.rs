/// Maximum number of characters accepted for a birthday name
pub const MAX_NAME_LENGTH: usize = 500;

/// Calendar date format accepted from clients
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";
